use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use vitals_tracker_data::models as data;

use crate::entities::patient::{CreatePatientRequest, Patient};
use crate::entities::reading::{CreateReadingRequest, Reading, VitalSigns};

/// Conversion functions between domain entities and storage models.
/// Named convert_to_[target_layer]_[model_name].

/// Parse a string ID into a UUID, with a message naming the bad input
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Storage form of a timestamp: RFC 3339, UTC, whole seconds.
/// Lexical order of these strings matches chronological order.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored timestamp back into UTC
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("Invalid stored timestamp {:?}: {}", value, e))
}

pub fn convert_to_domain_patient(record: data::PatientRecord) -> Patient {
    Patient {
        id: record.id,
        name: record.name,
        dob: record.dob,
        sex: record.sex,
        notes: record.notes,
    }
}

pub fn convert_to_data_create_patient(request: &CreatePatientRequest) -> data::CreatePatientRequest {
    data::CreatePatientRequest {
        name: request.name.clone(),
        dob: request.dob.clone(),
        sex: request.sex.clone(),
        notes: request.notes.clone(),
    }
}

/// Convert a stored reading. Fails only if the stored timestamp is corrupt.
pub fn convert_to_domain_reading(record: data::ReadingRecord) -> Result<Reading, String> {
    let timestamp = parse_timestamp(&record.timestamp)?;
    Ok(Reading {
        id: record.id,
        patient_id: record.patient_id,
        timestamp,
        vitals: VitalSigns {
            systolic: record.systolic,
            diastolic: record.diastolic,
            glucose_mg_dl: record.glucose_mg_dl,
            temp_c: record.temp_c,
            spo2: record.spo2,
        },
        notes: record.notes,
    })
}

/// Build the storage request for a reading; `now` fills a missing timestamp
pub fn convert_to_data_create_reading(
    patient_id: Uuid,
    request: &CreateReadingRequest,
    now: DateTime<Utc>,
) -> data::CreateReadingRequest {
    let timestamp = request.timestamp.unwrap_or(now);
    data::CreateReadingRequest {
        patient_id: patient_id.to_string(),
        timestamp: format_timestamp(&timestamp),
        systolic: request.systolic,
        diastolic: request.diastolic,
        glucose_mg_dl: request.glucose_mg_dl,
        temp_c: request.temp_c,
        spo2: request.spo2,
        notes: request
            .notes
            .as_ref()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    }
}
