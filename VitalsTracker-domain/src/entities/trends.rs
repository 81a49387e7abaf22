use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// How many of the newest readings feed the trend series
pub const TREND_WINDOW: usize = 30;

/// A single point in a numeric series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// A blood pressure point; only readings with both halves produce one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressurePoint {
    pub timestamp: DateTime<Utc>,
    pub systolic: i32,
    pub diastolic: i32,
}

/// Chart series for a patient, oldest point first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ReadingTrends {
    pub blood_pressure: Vec<BloodPressurePoint>,
    pub glucose: Vec<TrendPoint>,
    pub spo2: Vec<TrendPoint>,
    pub temperature: Vec<TrendPoint>,
}

impl ReadingTrends {
    /// True when no series has a single point
    pub fn is_empty(&self) -> bool {
        self.blood_pressure.is_empty()
            && self.glucose.is_empty()
            && self.spo2.is_empty()
            && self.temperature.is_empty()
    }
}
