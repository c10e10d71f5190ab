//! Output formatting and persistence for attendance summaries.
//!
//! Supports CSV export (pure [`to_csv`], file-backed [`write_csv`]), JSON
//! output and debug pretty-printing.

use anyhow::{Context, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::path::Path;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::report::percentage::Percentage;
use crate::report::types::{RollNo, StudentSummary, SummaryReport};

pub const HEADER: [&str; 5] = ["Roll No", "Name", "Total Lectures", "Attended", "Percentage"];

/// Serializes summaries as CSV, in input order.
///
/// Every line ends in `\n`. Fields containing a comma, a quote or a line
/// break are quoted, with embedded quotes doubled. Percentages carry a `%`
/// suffix, e.g. `50.00%`.
pub fn to_csv(summaries: &[StudentSummary]) -> Result<String, ReportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for s in summaries {
        let total_lectures = s.total_lectures.to_string();
        let attended = s.attended.to_string();
        let percentage = format!("{}%", s.percentage);
        writer.write_record([
            s.roll_no.as_str(),
            s.name.as_str(),
            total_lectures.as_str(),
            attended.as_str(),
            percentage.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;
    // Every field written above is a `&str`, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parses CSV produced by [`to_csv`] back into summaries.
///
/// # Errors
///
/// Returns [`ReportError::MalformedExport`] for a header that differs from
/// [`HEADER`], and for rows with a blank roll number, unparseable counts, or a
/// percentage that disagrees with the counts. Structural problems surface as
/// [`ReportError::Csv`].
pub fn parse_csv(text: &str) -> Result<Vec<StudentSummary>, ReportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    if !headers.iter().map(str::trim).eq(HEADER) {
        return Err(ReportError::malformed_export(
            1,
            format!("unexpected header {:?}", headers.iter().collect::<Vec<_>>()),
        ));
    }

    let mut summaries = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |i: usize| record.get(i).unwrap_or_default();

        let count = |i: usize| {
            field(i).trim().parse::<u32>().map_err(|e| {
                ReportError::malformed_export(line, format!("{}: {e}", HEADER[i]))
            })
        };

        let roll_no = RollNo::new(field(0))
            .ok_or_else(|| ReportError::malformed_export(line, "blank roll number"))?;
        let total_lectures = count(2)?;
        let attended = count(3)?;
        let percentage: Percentage = field(4)
            .parse()
            .map_err(|e| ReportError::malformed_export(line, format!("{e}")))?;

        if total_lectures == 0 {
            return Err(ReportError::malformed_export(line, "no lectures recorded"));
        }
        if attended > total_lectures {
            return Err(ReportError::malformed_export(
                line,
                "attended exceeds total lectures",
            ));
        }
        let expected = Percentage::of(attended, total_lectures);
        if percentage != expected {
            return Err(ReportError::malformed_export(
                line,
                format!("percentage {percentage} does not match {attended}/{total_lectures} ({expected})"),
            ));
        }

        summaries.push(StudentSummary {
            roll_no,
            name: field(1).to_string(),
            total_lectures,
            attended,
            percentage,
        });
    }

    Ok(summaries)
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SummaryReport) {
    debug!("{:#?}", report);
}

/// Prints a report to stdout as pretty JSON.
pub fn print_json(report: &SummaryReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the CSV export to `path`, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), rows = summaries.len()))]
pub fn write_csv(path: impl AsRef<Path>, summaries: &[StudentSummary]) -> Result<()> {
    let path = path.as_ref();

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let content = to_csv(summaries)?;
    debug!(bytes = content.len(), "CSV export rendered");

    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Attendance CSV written");

    Ok(())
}
