//! Attendance aggregation and summary views.
//!
//! Raw per-lecture records are collapsed into one summary per roll number,
//! which can then be filtered by attendance bucket or rendered as a table.

pub mod aggregate;
pub mod bucket;
pub mod percentage;
pub mod table;
pub mod types;

pub use aggregate::{aggregate, aggregate_events};
pub use bucket::{Bucket, BucketCounts, filter_by_bucket, filter_by_name};
pub use percentage::Percentage;
pub use types::{Aggregation, RawAttendanceEvent, RollNo, StudentSummary, SummaryReport};
