use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use vitals_tracker_domain::entities::reading as domain;

/// Public representation of a vital-sign reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadingResponse {
    /// Unique identifier for the reading
    pub id: String,

    /// Owning patient
    pub patient_id: String,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Systolic blood pressure in mmHg
    pub systolic: Option<i32>,

    /// Diastolic blood pressure in mmHg
    pub diastolic: Option<i32>,

    /// Blood glucose in mg/dL
    pub glucose_mg_dl: Option<f64>,

    /// Body temperature in °C
    pub temp_c: Option<f64>,

    /// Oxygen saturation in %
    pub spo2: Option<f64>,

    /// Notes about the reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<domain::Reading> for ReadingResponse {
    fn from(reading: domain::Reading) -> Self {
        let vitals = reading.vitals;
        Self {
            id: reading.id,
            patient_id: reading.patient_id,
            timestamp: reading.timestamp,
            systolic: vitals.systolic,
            diastolic: vitals.diastolic,
            glucose_mg_dl: vitals.glucose_mg_dl,
            temp_c: vitals.temp_c,
            spo2: vitals.spo2,
            notes: reading.notes,
        }
    }
}

/// Request payload for recording a reading. At least one vital is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateReadingRequest {
    /// When the reading was taken. Defaults to current time if not provided.
    pub timestamp: Option<DateTime<Utc>>,

    /// Systolic blood pressure in mmHg (0-300)
    pub systolic: Option<i32>,

    /// Diastolic blood pressure in mmHg (0-200)
    pub diastolic: Option<i32>,

    /// Blood glucose in mg/dL (0-1000)
    pub glucose_mg_dl: Option<f64>,

    /// Body temperature in °C (25-45)
    pub temp_c: Option<f64>,

    /// Oxygen saturation in % (0-100)
    pub spo2: Option<f64>,

    /// Notes about the reading
    pub notes: Option<String>,
}

impl From<CreateReadingRequest> for domain::CreateReadingRequest {
    fn from(request: CreateReadingRequest) -> Self {
        Self {
            timestamp: request.timestamp,
            systolic: request.systolic,
            diastolic: request.diastolic,
            glucose_mg_dl: request.glucose_mg_dl,
            temp_c: request.temp_c,
            spo2: request.spo2,
            notes: request.notes,
        }
    }
}

/// Query parameters for reading history
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct HistoryQueryParams {
    /// Maximum number of readings to return, newest first (default: all)
    pub limit: Option<usize>,
}
