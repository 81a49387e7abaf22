use serde::{Deserialize, Serialize};

/// Storage model for a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique identifier for the patient
    pub id: String,

    /// Display name
    pub name: String,

    /// Optional date of birth (YYYY-MM-DD)
    pub dob: Option<String>,

    /// Optional sex
    pub sex: Option<String>,

    /// Optional free-text notes
    pub notes: Option<String>,
}

/// Input data for creating a new patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub dob: Option<String>,
    pub sex: Option<String>,
    pub notes: Option<String>,
}
