//! Data types shared by the aggregation, filtering and export stages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::report::bucket::{Bucket, BucketCounts, filter_by_bucket};
use crate::report::percentage::Percentage;

/// A student's roll number, the sole aggregation key.
///
/// Surrounding whitespace is trimmed. Zero padding is kept as-is, so `"007"`
/// and `"7"` name different students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RollNo(String);

impl RollNo {
    /// Returns `None` for blank input.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(RollNo(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RollNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One lecture-level attendance observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttendanceEvent {
    /// `None` when the source record carried no usable roll number.
    pub roll_no: Option<RollNo>,
    pub name: String,
    pub is_present: bool,
}

impl RawAttendanceEvent {
    pub fn new(roll_no: impl AsRef<str>, name: impl Into<String>, is_present: bool) -> Self {
        Self {
            roll_no: RollNo::new(roll_no),
            name: name.into(),
            is_present,
        }
    }
}

/// Per-student attendance totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub roll_no: RollNo,
    /// Name from the first record seen for this roll number.
    pub name: String,
    pub total_lectures: u32,
    pub attended: u32,
    pub percentage: Percentage,
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Summaries in first-seen order of their roll numbers.
    pub summaries: Vec<StudentSummary>,
    /// Records dropped for lacking a roll number.
    pub skipped: usize,
}

/// A filtered summary view, as handed to a presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub bucket: Bucket,
    /// Counts over the whole summary set, not just the filtered students.
    pub counts: BucketCounts,
    pub skipped: usize,
    pub students: Vec<StudentSummary>,
}

impl SummaryReport {
    pub fn new(aggregation: &Aggregation, bucket: Bucket) -> Self {
        Self {
            generated_at: Utc::now(),
            bucket,
            counts: BucketCounts::tally(&aggregation.summaries),
            skipped: aggregation.skipped,
            students: filter_by_bucket(&aggregation.summaries, bucket),
        }
    }
}
