//! Runtime settings read from the environment (and `.env`, loaded by the binary).

/// Endpoint the attendance server exposes.
pub const DEFAULT_SOURCE: &str = "http://127.0.0.1:8000/get-attendance";
pub const DEFAULT_EXPORT_PATH: &str = "student_attendance.csv";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/attendance_report.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `ATTENDANCE_SOURCE`: URL or file path of the raw records.
    pub source: String,
    /// `ATTENDANCE_API_TOKEN`: sent as a bearer token when set.
    pub api_token: Option<String>,
    /// `ATTENDANCE_EXPORT_PATH`
    pub export_path: String,
    /// `LOG_FILE_PATH`
    pub log_file_path: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            source: get("ATTENDANCE_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            api_token: get("ATTENDANCE_API_TOKEN"),
            export_path: get("ATTENDANCE_EXPORT_PATH")
                .unwrap_or_else(|| DEFAULT_EXPORT_PATH.to_string()),
            log_file_path: get("LOG_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
