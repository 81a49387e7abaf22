use serde::{Deserialize, Serialize};

/// Storage model for one vital-sign reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingRecord {
    /// Unique identifier for the reading
    pub id: String,

    /// Owning patient
    pub patient_id: String,

    /// When the reading was taken (RFC 3339, UTC, second precision)
    pub timestamp: String,

    /// Systolic blood pressure in mmHg
    pub systolic: Option<i32>,

    /// Diastolic blood pressure in mmHg
    pub diastolic: Option<i32>,

    /// Blood glucose in mg/dL
    pub glucose_mg_dl: Option<f64>,

    /// Body temperature in degrees Celsius
    pub temp_c: Option<f64>,

    /// Oxygen saturation in percent
    pub spo2: Option<f64>,

    /// Optional notes about the reading
    pub notes: Option<String>,
}

/// Input data for creating a new reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReadingRequest {
    pub patient_id: String,
    pub timestamp: String,
    pub systolic: Option<i32>,
    pub diastolic: Option<i32>,
    pub glucose_mg_dl: Option<f64>,
    pub temp_c: Option<f64>,
    pub spo2: Option<f64>,
    pub notes: Option<String>,
}
