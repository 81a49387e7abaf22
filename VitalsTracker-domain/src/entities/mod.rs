// Domain entities and value objects
pub mod assessment;
pub mod conversions;
pub mod patient;
pub mod reading;
pub mod trends;

// Re-export common types for easier imports
pub use assessment::{Assessment, Finding, Severity, VitalSign};
pub use patient::{CreatePatientRequest, Patient};
pub use reading::{CreateReadingRequest, Reading, VitalSigns};
pub use trends::{BloodPressurePoint, ReadingTrends, TrendPoint};
