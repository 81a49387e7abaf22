pub mod assessments;
pub mod errors;
pub mod health;
pub mod patients;
pub mod readings;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use assessments::{assess_latest, assess_vitals};
pub use health::health_check;
pub use patients::{create_patient, delete_patient, get_patient, list_patients};
pub use readings::{create_reading, delete_reading, export_history, get_reading_history, get_trends};
