//! Decoders for raw attendance records.
//!
//! The attendance server answers with a JSON array of
//! `{ "RollNo": .., "Name": .., "IsPresent": .. }` objects; uploads may also
//! arrive as CSV with the same column names.

use serde::Deserialize;
use serde_json::{Number, Value};
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::ReportError;
use crate::report::types::{RawAttendanceEvent, RollNo};

/// Encoding of a raw attendance payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Picks the format from a file name or URL: `.csv` means CSV, anything
    /// else is treated as JSON.
    pub fn from_source(source: &str) -> Self {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }

    fn label(self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Deserialize)]
struct JsonRecord {
    #[serde(rename = "RollNo", alias = "rollNo", alias = "roll_no", default)]
    roll_no: Value,
    #[serde(rename = "Name", alias = "name", default)]
    name: Value,
    #[serde(rename = "IsPresent", alias = "isPresent", alias = "is_present", default)]
    is_present: Value,
}

#[derive(Deserialize)]
struct CsvRecord {
    #[serde(rename = "RollNo", alias = "rollNo", alias = "roll_no", default)]
    roll_no: Option<String>,
    #[serde(rename = "Name", alias = "name", default)]
    name: Option<String>,
    #[serde(rename = "IsPresent", alias = "isPresent", alias = "is_present", default)]
    is_present: Option<String>,
}

/// Decodes `bytes` according to `format`.
pub fn parse_events(bytes: &[u8], format: InputFormat) -> Result<Vec<RawAttendanceEvent>, ReportError> {
    match format {
        InputFormat::Json => parse_json(bytes),
        InputFormat::Csv => parse_csv_events(bytes),
    }
}

/// Decodes a JSON array of attendance records.
///
/// Only a JSON `true` marks a student present. Elements that are not objects
/// decode to events without a roll number, which aggregation skips.
///
/// # Errors
///
/// Returns [`ReportError::Decode`] if the body is not a JSON array.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<RawAttendanceEvent>, ReportError> {
    let rows: Vec<Value> = serde_json::from_slice(bytes)
        .map_err(|e| ReportError::decode(InputFormat::Json.label(), e.to_string()))?;

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(position, row)| match serde_json::from_value::<JsonRecord>(row) {
            Ok(record) => RawAttendanceEvent {
                roll_no: roll_no_from_json(&record.roll_no),
                name: name_from_json(record.name),
                is_present: matches!(record.is_present, Value::Bool(true)),
            },
            Err(e) => {
                debug!(position, error = %e, "Attendance row is not a record");
                RawAttendanceEvent {
                    roll_no: None,
                    name: String::new(),
                    is_present: false,
                }
            }
        })
        .collect())
}

/// Decodes CSV attendance records with a `RollNo,Name,IsPresent` header.
///
/// `IsPresent` must read `true` (any case) to count as present. Short rows are
/// tolerated; a row missing its roll number is skipped during aggregation.
pub fn parse_csv_events(bytes: &[u8]) -> Result<Vec<RawAttendanceEvent>, ReportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let mut events = Vec::new();
    for result in rdr.deserialize() {
        let record: CsvRecord = result?;
        events.push(RawAttendanceEvent {
            roll_no: record.roll_no.and_then(RollNo::new),
            name: record.name.unwrap_or_default(),
            is_present: record
                .is_present
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
        });
    }

    Ok(events)
}

fn roll_no_from_json(value: &Value) -> Option<RollNo> {
    match value {
        Value::String(s) => RollNo::new(s),
        Value::Number(n) => RollNo::new(number_key(n)),
        _ => None,
    }
}

/// Numerically equal roll numbers (`1`, `1.0`, `1e0`) share one key.
fn number_key(n: &Number) -> String {
    if let Some(i) = n.as_u64() {
        return i.to_string();
    }
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

fn name_from_json(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
