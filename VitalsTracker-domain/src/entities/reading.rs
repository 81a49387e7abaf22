use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// The five measurements a reading may carry. Any of them can be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct VitalSigns {
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
}

impl VitalSigns {
    /// True when no measurement is present
    pub fn is_empty(&self) -> bool {
        self.systolic.is_none()
            && self.diastolic.is_none()
            && self.glucose_mg_dl.is_none()
            && self.temp_c.is_none()
            && self.spo2.is_none()
    }

    /// Both halves of the blood pressure, if both were captured
    pub fn blood_pressure(&self) -> Option<(i32, i32)> {
        self.systolic.zip(self.diastolic)
    }
}

/// Domain model for a stored reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique identifier for the reading
    pub id: String,

    /// Owning patient
    pub patient_id: String,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Captured measurements
    pub vitals: VitalSigns,

    /// Optional notes about the reading
    pub notes: Option<String>,
}

/// Request payload for recording a reading
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreateReadingRequest {
    /// When the reading was taken. Defaults to current time if not provided.
    pub timestamp: Option<DateTime<Utc>>,

    /// Systolic blood pressure in mmHg
    #[validate(range(min = 0, max = 300, message = "Systolic must be between 0 and 300"))]
    pub systolic: Option<i32>,

    /// Diastolic blood pressure in mmHg
    #[validate(range(min = 0, max = 200, message = "Diastolic must be between 0 and 200"))]
    pub diastolic: Option<i32>,

    /// Blood glucose in mg/dL
    #[validate(range(min = 0.0, max = 1000.0, message = "Glucose must be between 0 and 1000 mg/dL"))]
    pub glucose_mg_dl: Option<f64>,

    /// Body temperature in degrees Celsius
    #[validate(range(min = 25.0, max = 45.0, message = "Temperature must be between 25 and 45 °C"))]
    pub temp_c: Option<f64>,

    /// Oxygen saturation in percent
    #[validate(range(min = 0.0, max = 100.0, message = "SpO2 must be between 0 and 100 %"))]
    pub spo2: Option<f64>,

    /// Optional notes about the reading
    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,
}

impl CreateReadingRequest {
    /// The measurements carried by this request
    pub fn vitals(&self) -> VitalSigns {
        VitalSigns {
            systolic: self.systolic,
            diastolic: self.diastolic,
            glucose_mg_dl: self.glucose_mg_dl,
            temp_c: self.temp_c,
            spo2: self.spo2,
        }
    }
}
