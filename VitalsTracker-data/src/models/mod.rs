// Storage models, one module per table
pub mod patient;
pub mod reading;

pub use patient::{CreatePatientRequest, PatientRecord};
pub use reading::{CreateReadingRequest, ReadingRecord};
