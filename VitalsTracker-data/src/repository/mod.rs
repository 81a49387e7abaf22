// Repository module structure
pub mod errors;
mod backend;
mod in_memory;
mod patient;
mod reading;
mod storage;

// Re-export commonly used types
pub use backend::StorageBackend;
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use patient::{PatientRepository, PatientRepositoryTrait};
pub use reading::{ReadingRepository, ReadingRepositoryTrait};
