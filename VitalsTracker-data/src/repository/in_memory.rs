use std::sync::{Arc, Mutex};

use crate::models::{PatientRecord, ReadingRecord};
use super::errors::RepositoryError;

#[derive(Debug, Default)]
struct Tables {
    patients: Vec<PatientRecord>,
    // Insertion order stands in for SQLite's rowid
    readings: Vec<ReadingRecord>,
}

/// In-memory storage for patients and readings
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a patient in memory
    pub fn insert_patient(&self, patient: &PatientRecord) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock()?;
        tables.patients.push(patient.clone());
        Ok(())
    }

    /// All patients ordered by name
    pub fn list_patients(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        let tables = self.tables.lock()?;
        let mut patients = tables.patients.clone();
        patients.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(patients)
    }

    /// Get a patient by ID
    pub fn get_patient(&self, id: &str) -> Result<Option<PatientRecord>, RepositoryError> {
        let tables = self.tables.lock()?;
        Ok(tables.patients.iter().find(|p| p.id == id).cloned())
    }

    /// Delete a patient and its readings. Returns the number of readings removed.
    pub fn delete_patient(&self, id: &str) -> Result<usize, RepositoryError> {
        let mut tables = self.tables.lock()?;

        let before = tables.patients.len();
        tables.patients.retain(|p| p.id != id);
        if tables.patients.len() == before {
            return Err(RepositoryError::NotFound(format!("patient {}", id)));
        }

        let readings_before = tables.readings.len();
        tables.readings.retain(|r| r.patient_id != id);
        Ok(readings_before - tables.readings.len())
    }

    /// Store a reading. Fails with `NotFound` when the patient is missing.
    pub fn insert_reading(&self, reading: &ReadingRecord) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock()?;

        if !tables.patients.iter().any(|p| p.id == reading.patient_id) {
            return Err(RepositoryError::NotFound(format!("patient {}", reading.patient_id)));
        }

        tables.readings.push(reading.clone());
        Ok(())
    }

    /// Readings for one patient, newest first. Ties keep the latest insert first.
    pub fn readings_for_patient(
        &self,
        patient_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ReadingRecord>, RepositoryError> {
        let tables = self.tables.lock()?;

        let mut readings: Vec<ReadingRecord> = tables
            .readings
            .iter()
            .rev()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();

        // Stable sort, so equal timestamps stay in reverse insertion order
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if let Some(limit) = limit {
            readings.truncate(limit);
        }

        Ok(readings)
    }

    /// Get a reading by ID
    pub fn get_reading(&self, id: &str) -> Result<Option<ReadingRecord>, RepositoryError> {
        let tables = self.tables.lock()?;
        Ok(tables.readings.iter().find(|r| r.id == id).cloned())
    }

    /// Delete one reading. Returns whether a row was removed.
    pub fn delete_reading(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock()?;
        let before = tables.readings.len();
        tables.readings.retain(|r| r.id != id);
        Ok(tables.readings.len() != before)
    }
}
