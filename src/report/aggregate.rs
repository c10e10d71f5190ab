use crate::report::percentage::Percentage;
use crate::report::types::{Aggregation, RawAttendanceEvent, RollNo, StudentSummary};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Running totals for one roll number while the events are consumed.
struct Tally<'a> {
    roll_no: &'a RollNo,
    name: &'a str,
    total_lectures: u32,
    attended: u32,
}

/// Collapses raw attendance events into one [`StudentSummary`] per roll number.
///
/// See [`aggregate_events`] for the ordering and malformed-record rules.
pub fn aggregate(events: &[RawAttendanceEvent]) -> Vec<StudentSummary> {
    aggregate_events(events).summaries
}

/// Collapses raw attendance events into per-student summaries.
///
/// Summaries come back in the order their roll numbers were first seen, and
/// each keeps the name from that first record. Every event counts as a
/// lecture; only `is_present` events count as attended. Events without a
/// roll number are skipped with a warning and counted in
/// [`Aggregation::skipped`].
pub fn aggregate_events(events: &[RawAttendanceEvent]) -> Aggregation {
    let mut slots: HashMap<&RollNo, usize> = HashMap::new();
    let mut tallies: Vec<Tally<'_>> = Vec::new();
    let mut skipped = 0usize;

    for (position, event) in events.iter().enumerate() {
        let Some(roll_no) = event.roll_no.as_ref() else {
            warn!(
                position,
                name = %event.name,
                "Skipping attendance record without a roll number"
            );
            skipped += 1;
            continue;
        };

        let slot = *slots.entry(roll_no).or_insert_with(|| {
            tallies.push(Tally {
                roll_no,
                name: &event.name,
                total_lectures: 0,
                attended: 0,
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        tally.total_lectures += 1;
        if event.is_present {
            tally.attended += 1;
        }
    }

    let summaries: Vec<StudentSummary> = tallies
        .into_iter()
        .map(|t| StudentSummary {
            roll_no: t.roll_no.clone(),
            name: t.name.to_string(),
            total_lectures: t.total_lectures,
            attended: t.attended,
            percentage: Percentage::of(t.attended, t.total_lectures),
        })
        .collect();

    debug!(
        events = events.len(),
        students = summaries.len(),
        skipped,
        "Attendance aggregated"
    );

    Aggregation { summaries, skipped }
}
