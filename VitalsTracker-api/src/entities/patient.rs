use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vitals_tracker_domain::entities::patient as domain;

/// Public representation of a patient
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientResponse {
    /// Unique identifier for the patient
    pub id: String,

    /// Display name
    pub name: String,

    /// Label used in patient pickers, `name (id:…)`
    pub label: String,

    /// Date of birth (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,

    /// Male, Female or Other
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<domain::Patient> for PatientResponse {
    fn from(patient: domain::Patient) -> Self {
        let label = patient.display_label();
        Self {
            id: patient.id,
            name: patient.name,
            label,
            dob: patient.dob,
            sex: patient.sex,
            notes: patient.notes,
        }
    }
}

/// Request payload for registering a patient
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientRequest {
    /// Display name, required
    pub name: String,

    /// Date of birth (YYYY-MM-DD)
    pub dob: Option<String>,

    /// Male, Female or Other
    pub sex: Option<String>,

    /// Free-text notes
    pub notes: Option<String>,
}

impl From<CreatePatientRequest> for domain::CreatePatientRequest {
    fn from(request: CreatePatientRequest) -> Self {
        Self {
            name: request.name,
            dob: request.dob,
            sex: request.sex,
            notes: request.notes,
        }
    }
}

/// Result of deleting a patient
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletePatientResponse {
    /// ID of the deleted patient
    pub id: String,

    /// How many readings were deleted with the patient
    pub readings_removed: usize,
}
