use std::fmt::Write;

use crate::report::types::SummaryReport;

const HEADERS: [&str; 5] = ["Roll No", "Name", "Total Lectures", "Attended", "Percentage (%)"];

/// Renders a report as a fixed-width text table for terminal display.
pub fn render_table(report: &SummaryReport) -> String {
    let rows: Vec<[String; 5]> = report
        .students
        .iter()
        .map(|s| {
            [
                s.roll_no.to_string(),
                s.name.replace(['\r', '\n'], " "),
                s.total_lectures.to_string(),
                s.attended.to_string(),
                format!("{}%", s.percentage),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let _ = writeln!(
        output,
        "Attendance ({}): {} full, {} at least 75%, {} below 75%",
        report.bucket,
        report.counts.full,
        report.counts.at_least_three_quarters,
        report.counts.below_three_quarters
    );
    if report.skipped > 0 {
        let _ = writeln!(output, "Skipped {} records without a roll number", report.skipped);
    }
    let _ = writeln!(output);

    write_row(&mut output, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(output, "{}", rule.join("-+-"));

    if rows.is_empty() {
        let _ = writeln!(output, "No Data Available");
    } else {
        for row in &rows {
            write_row(&mut output, row, &widths);
        }
    }

    output
}

fn write_row(output: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(output, "{}", padded.join(" | ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregate::aggregate_events;
    use crate::report::bucket::Bucket;
    use crate::report::types::RawAttendanceEvent;

    #[test]
    fn test_render_table_rows() {
        let aggregation = aggregate_events(&[
            RawAttendanceEvent::new("1", "Asha", true),
            RawAttendanceEvent::new("1", "Asha", false),
            RawAttendanceEvent::new("2", "Ben", true),
        ]);
        let table = render_table(&SummaryReport::new(&aggregation, Bucket::All));

        assert!(table.contains("Roll No | Name"));
        assert!(table.contains("1       | Asha"));
        assert!(table.contains("50.00%"));
        assert!(table.contains("100.00%"));
        assert!(!table.contains("No Data Available"));
    }

    #[test]
    fn test_render_table_empty_view() {
        let aggregation = aggregate_events(&[RawAttendanceEvent::new("1", "Asha", true)]);
        let table = render_table(&SummaryReport::new(&aggregation, Bucket::BelowThreeQuarters));

        assert!(table.contains("No Data Available"));
        assert!(table.contains("1 full"));
    }

    #[test]
    fn test_render_table_mentions_skipped_records() {
        let aggregation = aggregate_events(&[RawAttendanceEvent::new("", "Ghost", true)]);
        let table = render_table(&SummaryReport::new(&aggregation, Bucket::All));

        assert!(table.contains("Skipped 1 records"));
    }
}
