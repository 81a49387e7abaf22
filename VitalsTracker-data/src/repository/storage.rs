use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::{PatientRecord, ReadingRecord};
use super::errors::RepositoryError;

const PATIENT_COLUMNS: &str = "id, name, dob, sex, notes";

const READING_COLUMNS: &str =
    "id, patient_id, timestamp, systolic, diastolic, glucose_mg_dl, temp_c, spo2, notes";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        dob: row.get(2)?,
        sex: row.get(3)?,
        notes: row.get(4)?,
    })
}

fn reading_from_row(row: &Row<'_>) -> rusqlite::Result<ReadingRecord> {
    Ok(ReadingRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        timestamp: row.get(2)?,
        systolic: row.get(3)?,
        diastolic: row.get(4)?,
        glucose_mg_dl: row.get(5)?,
        temp_c: row.get(6)?,
        spo2: row.get(7)?,
        notes: row.get(8)?,
    })
}

fn patient_exists(conn: &rusqlite::Connection, id: &str) -> Result<bool, RepositoryError> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM patients WHERE id = ?1)",
        [id],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}

/// SQLite storage operations for patients and readings
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Store a patient
    pub fn insert_patient(pool: &DatabasePool, patient: &PatientRecord) -> Result<(), RepositoryError> {
        debug!("Storing patient in database: id={}", patient.id);

        let conn = pool.get()?;
        conn.execute(
            "INSERT INTO patients (id, name, dob, sex, notes) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &patient.id,
                &patient.name,
                &patient.dob,
                &patient.sex,
                &patient.notes,
            ],
        )?;

        Ok(())
    }

    /// All patients ordered by name
    pub fn list_patients(pool: &DatabasePool) -> Result<Vec<PatientRecord>, RepositoryError> {
        debug!("Listing patients from database");

        let conn = pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM patients ORDER BY name, id",
            PATIENT_COLUMNS
        ))?;

        let patients = stmt
            .query_map([], patient_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(patients)
    }

    /// Get a patient by ID
    pub fn get_patient(pool: &DatabasePool, id: &str) -> Result<Option<PatientRecord>, RepositoryError> {
        debug!("Getting patient by ID from database: id={}", id);

        let conn = pool.get()?;
        let patient = conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?1", PATIENT_COLUMNS),
                [id],
                patient_from_row,
            )
            .optional()?;

        Ok(patient)
    }

    /// Delete a patient and all of its readings in one transaction.
    /// Returns the number of readings removed.
    pub fn delete_patient(pool: &DatabasePool, id: &str) -> Result<usize, RepositoryError> {
        debug!("Deleting patient from database: id={}", id);

        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        if !patient_exists(&tx, id)? {
            return Err(RepositoryError::NotFound(format!("patient {}", id)));
        }

        let removed = tx.execute("DELETE FROM readings WHERE patient_id = ?1", [id])?;
        tx.execute("DELETE FROM patients WHERE id = ?1", [id])?;
        tx.commit()?;

        Ok(removed)
    }

    /// Store a reading. Fails with `NotFound` when the patient is missing.
    pub fn insert_reading(pool: &DatabasePool, reading: &ReadingRecord) -> Result<(), RepositoryError> {
        debug!("Storing reading in database: id={}, patient_id={}", reading.id, reading.patient_id);

        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        if !patient_exists(&tx, &reading.patient_id)? {
            return Err(RepositoryError::NotFound(format!("patient {}", reading.patient_id)));
        }

        tx.execute(
            &format!(
                "INSERT INTO readings ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                READING_COLUMNS
            ),
            params![
                &reading.id,
                &reading.patient_id,
                &reading.timestamp,
                reading.systolic,
                reading.diastolic,
                reading.glucose_mg_dl,
                reading.temp_c,
                reading.spo2,
                &reading.notes,
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    /// Readings for one patient, newest first. Ties keep the latest insert first.
    pub fn readings_for_patient(
        pool: &DatabasePool,
        patient_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ReadingRecord>, RepositoryError> {
        debug!("Getting readings from database: patient_id={}, limit={:?}", patient_id, limit);

        // SQLite treats a negative LIMIT as "no limit"
        let limit_val: i64 = limit.map(|l| l as i64).unwrap_or(-1);

        let conn = pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM readings WHERE patient_id = ?1
             ORDER BY timestamp DESC, rowid DESC LIMIT ?2",
            READING_COLUMNS
        ))?;

        let readings = stmt
            .query_map(params![patient_id, limit_val], reading_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(readings)
    }

    /// Get a reading by ID
    pub fn get_reading(pool: &DatabasePool, id: &str) -> Result<Option<ReadingRecord>, RepositoryError> {
        debug!("Getting reading by ID from database: id={}", id);

        let conn = pool.get()?;
        let reading = conn
            .query_row(
                &format!("SELECT {} FROM readings WHERE id = ?1", READING_COLUMNS),
                [id],
                reading_from_row,
            )
            .optional()?;

        Ok(reading)
    }

    /// Delete one reading. Returns whether a row was removed.
    pub fn delete_reading(pool: &DatabasePool, id: &str) -> Result<bool, RepositoryError> {
        debug!("Deleting reading from database: id={}", id);

        let conn = pool.get()?;
        let removed = conn.execute("DELETE FROM readings WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }
}
