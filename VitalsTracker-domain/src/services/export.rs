use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::entities::conversions::format_timestamp;
use crate::entities::patient::Patient;
use crate::entities::reading::Reading;

/// Column order of the history export
pub const CSV_HEADER: [&str; 8] = [
    "id",
    "timestamp",
    "systolic",
    "diastolic",
    "glucose_mg_dl",
    "temp_c",
    "spo2",
    "notes",
];

/// A rendered history export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvExport {
    /// Suggested download name, `<patient name>_history.csv`
    pub file_name: String,
    pub content: String,
}

/// Render readings as CSV, one row per reading in the given order
pub fn render_csv(readings: &[Reading]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');

    for reading in readings {
        let vitals = &reading.vitals;
        let row = [
            escape_field(&reading.id),
            escape_field(&format_timestamp(&reading.timestamp)),
            optional(vitals.systolic),
            optional(vitals.diastolic),
            optional(vitals.glucose_mg_dl),
            optional(vitals.temp_c),
            optional(vitals.spo2),
            reading.notes.as_deref().map(escape_field).unwrap_or_default(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Download name for a patient's history. Characters that would break a
/// header or a path are replaced with `_`.
pub fn export_file_name(patient: &Patient) -> String {
    let name: String = patient
        .name
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' | ':' | ';' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_history.csv", name)
}

fn optional<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
