// Public entities for the Vitals Tracker API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling
pub mod common;

// Patients
pub mod patient;

// Readings and history queries
pub mod reading;

// Triage results
pub mod assessment;

pub use assessment::AssessmentResponse;
pub use common::ErrorResponse;
pub use patient::{CreatePatientRequest, DeletePatientResponse, PatientResponse};
pub use reading::{CreateReadingRequest, HistoryQueryParams, ReadingResponse};
