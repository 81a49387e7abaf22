pub mod classifier;
pub mod export;
pub mod patient;
pub mod reading;
pub mod trends;
mod validation;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use classifier::{classify, suggest_for_reading};
pub use export::CsvExport;
pub use patient::{create_patient_service, PatientService, PatientServiceError, PatientServiceTrait};
pub use reading::{create_reading_service, ReadingService, ReadingServiceError, ReadingServiceTrait};
