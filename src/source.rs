//! Loads raw attendance records from a URL or a local file.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::fetch::{HttpClient, fetch_bytes};
use crate::parser::{InputFormat, parse_events};
use crate::report::types::RawAttendanceEvent;

/// Returns `true` for `http://` and `https://` sources.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Reads the full payload behind `source` and decodes it.
///
/// Remote sources go through `client`; anything else is a filesystem path.
/// The whole body is read before decoding, so callers always aggregate a
/// complete record set.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn load(source: &str, client: &dyn HttpClient) -> Result<Vec<RawAttendanceEvent>> {
    let format = InputFormat::from_source(source);

    let bytes = if is_remote(source) {
        fetch_bytes(client, source)
            .await
            .with_context(|| format!("failed to fetch attendance from {source}"))?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read attendance file {source}"))?
    };
    debug!(bytes = bytes.len(), %format, "Attendance payload received");

    let events = parse_events(&bytes, format)
        .with_context(|| format!("failed to decode attendance from {source}"))?;
    info!(records = events.len(), "Attendance records decoded");

    Ok(events)
}
