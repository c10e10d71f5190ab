use thiserror::Error;

/// Errors surfaced by the attendance library.
///
/// Records without a roll number are not an error: they are skipped with a
/// warning and counted in [`crate::report::types::Aggregation::skipped`].
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unknown attendance filter bucket '{name}'")]
    InvalidFilterBucket { name: String },

    #[error("failed to decode {format} attendance records: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    #[error("malformed export row {line}: {reason}")]
    MalformedExport { line: u64, reason: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub fn decode(format: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            format,
            message: message.into(),
        }
    }

    pub fn malformed_export(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedExport {
            line,
            reason: reason.into(),
        }
    }
}
