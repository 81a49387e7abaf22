use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_patients_table(conn)?;
    create_readings_table(conn)?;
    create_readings_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the patients table
fn create_patients_table(conn: &Connection) -> Result<(), String> {
    info!("Creating patients table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS patients (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            dob TEXT,
            sex TEXT,
            notes TEXT
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Create the readings table. Rows go away with their patient.
fn create_readings_table(conn: &Connection) -> Result<(), String> {
    info!("Creating readings table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS readings (
            id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
            timestamp TEXT NOT NULL,
            systolic INTEGER,
            diastolic INTEGER,
            glucose_mg_dl REAL,
            temp_c REAL,
            spo2 REAL,
            notes TEXT
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Create index for per-patient history lookups, newest first
fn create_readings_index(conn: &Connection) -> Result<(), String> {
    info!("Creating index on readings (patient_id, timestamp)");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_readings_patient_timestamp
        ON readings (patient_id, timestamp DESC)",
        [],
    ).map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
