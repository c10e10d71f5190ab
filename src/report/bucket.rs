use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;
use crate::report::percentage::Percentage;
use crate::report::types::StudentSummary;

/// Named attendance-rate ranges used to filter the summary view.
///
/// | Bucket                 | Range                  |
/// |------------------------|------------------------|
/// | `all`                  | everything             |
/// | `full`                 | == 100.00              |
/// | `atLeastThreeQuarters` | >= 75.00 and < 100.00  |
/// | `belowThreeQuarters`   | < 75.00                |
///
/// Ranges test the rounded two-decimal percentage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    #[default]
    All,
    Full,
    AtLeastThreeQuarters,
    BelowThreeQuarters,
}

impl Bucket {
    pub const VALUES: [Bucket; 4] = [
        Bucket::All,
        Bucket::Full,
        Bucket::AtLeastThreeQuarters,
        Bucket::BelowThreeQuarters,
    ];

    /// The single non-`All` bucket a percentage falls into.
    pub fn of(p: Percentage) -> Bucket {
        match p {
            p if p >= Percentage::FULL => Bucket::Full,
            p if p >= Percentage::THREE_QUARTERS => Bucket::AtLeastThreeQuarters,
            _ => Bucket::BelowThreeQuarters,
        }
    }

    pub fn matches(self, p: Percentage) -> bool {
        self == Bucket::All || self == Bucket::of(p)
    }

    pub fn name(self) -> &'static str {
        match self {
            Bucket::All => "all",
            Bucket::Full => "full",
            Bucket::AtLeastThreeQuarters => "atLeastThreeQuarters",
            Bucket::BelowThreeQuarters => "belowThreeQuarters",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the canonical names, their kebab-case spellings, and the
/// dashboard's select values (`100`, `75`, `less75`).
impl FromStr for Bucket {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Bucket::All),
            "full" | "100" => Ok(Bucket::Full),
            "atLeastThreeQuarters" | "at-least-three-quarters" | "75" => {
                Ok(Bucket::AtLeastThreeQuarters)
            }
            "belowThreeQuarters" | "below-three-quarters" | "less75" => {
                Ok(Bucket::BelowThreeQuarters)
            }
            other => Err(ReportError::InvalidFilterBucket {
                name: other.to_string(),
            }),
        }
    }
}

/// Returns the summaries whose percentage falls in `bucket`, in input order.
pub fn filter_by_bucket(summaries: &[StudentSummary], bucket: Bucket) -> Vec<StudentSummary> {
    summaries
        .iter()
        .filter(|s| bucket.matches(s.percentage))
        .cloned()
        .collect()
}

/// Like [`filter_by_bucket`], but takes the bucket by name.
///
/// # Errors
///
/// Returns [`ReportError::InvalidFilterBucket`] for unrecognized names rather
/// than falling back to `all`.
pub fn filter_by_name(
    summaries: &[StudentSummary],
    name: &str,
) -> Result<Vec<StudentSummary>, ReportError> {
    let bucket: Bucket = name.parse()?;
    Ok(filter_by_bucket(summaries, bucket))
}

/// Number of students in each bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCounts {
    pub full: usize,
    pub at_least_three_quarters: usize,
    pub below_three_quarters: usize,
}

impl BucketCounts {
    pub fn tally(summaries: &[StudentSummary]) -> Self {
        let mut counts = BucketCounts::default();
        for s in summaries {
            match Bucket::of(s.percentage) {
                Bucket::Full => counts.full += 1,
                Bucket::AtLeastThreeQuarters => counts.at_least_three_quarters += 1,
                Bucket::BelowThreeQuarters => counts.below_three_quarters += 1,
                Bucket::All => {}
            }
        }
        counts
    }

    pub fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::All => self.total(),
            Bucket::Full => self.full,
            Bucket::AtLeastThreeQuarters => self.at_least_three_quarters,
            Bucket::BelowThreeQuarters => self.below_three_quarters,
        }
    }

    pub fn total(&self) -> usize {
        self.full + self.at_least_three_quarters + self.below_three_quarters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregate::aggregate;
    use crate::report::types::RawAttendanceEvent;

    fn pct(hundredths: u32) -> Percentage {
        Percentage::from_hundredths(hundredths).unwrap()
    }

    fn sample_summaries() -> Vec<StudentSummary> {
        aggregate(&[
            RawAttendanceEvent::new("1", "A", true),
            RawAttendanceEvent::new("1", "A", false),
            RawAttendanceEvent::new("2", "B", true),
            RawAttendanceEvent::new("3", "C", true),
            RawAttendanceEvent::new("3", "C", true),
            RawAttendanceEvent::new("3", "C", true),
            RawAttendanceEvent::new("3", "C", false),
        ])
    }

    fn roll_numbers(summaries: &[StudentSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.roll_no.as_str()).collect()
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(Bucket::of(pct(10_000)), Bucket::Full);
        assert_eq!(Bucket::of(pct(9_999)), Bucket::AtLeastThreeQuarters);
        assert_eq!(Bucket::of(pct(7_500)), Bucket::AtLeastThreeQuarters);
        assert_eq!(Bucket::of(pct(7_499)), Bucket::BelowThreeQuarters);
        assert_eq!(Bucket::of(pct(0)), Bucket::BelowThreeQuarters);
    }

    #[test]
    fn test_bucket_uses_rounded_percentage() {
        // 74.995 rounds to 75.00
        assert_eq!(
            Bucket::of(Percentage::of(14_999, 20_000)),
            Bucket::AtLeastThreeQuarters
        );
        // 99.995 rounds to 100.00
        assert_eq!(Bucket::of(Percentage::of(19_999, 20_000)), Bucket::Full);
    }

    #[test]
    fn test_parse_bucket_names() {
        assert_eq!("all".parse::<Bucket>().unwrap(), Bucket::All);
        assert_eq!("full".parse::<Bucket>().unwrap(), Bucket::Full);
        assert_eq!("100".parse::<Bucket>().unwrap(), Bucket::Full);
        assert_eq!(
            "atLeastThreeQuarters".parse::<Bucket>().unwrap(),
            Bucket::AtLeastThreeQuarters
        );
        assert_eq!("75".parse::<Bucket>().unwrap(), Bucket::AtLeastThreeQuarters);
        assert_eq!(
            "below-three-quarters".parse::<Bucket>().unwrap(),
            Bucket::BelowThreeQuarters
        );
        assert_eq!("less75".parse::<Bucket>().unwrap(), Bucket::BelowThreeQuarters);
    }

    #[test]
    fn test_parse_unknown_bucket_fails() {
        let err = "most".parse::<Bucket>().unwrap_err();
        assert!(matches!(err, ReportError::InvalidFilterBucket { ref name } if name == "most"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for bucket in Bucket::VALUES {
            assert_eq!(bucket.to_string().parse::<Bucket>().unwrap(), bucket);
        }
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let summaries = sample_summaries();
        assert_eq!(filter_by_bucket(&summaries, Bucket::All), summaries);
    }

    #[test]
    fn test_filter_scenarios() {
        let summaries = sample_summaries();

        assert_eq!(roll_numbers(&filter_by_bucket(&summaries, Bucket::Full)), vec!["2"]);
        assert_eq!(
            roll_numbers(&filter_by_bucket(&summaries, Bucket::AtLeastThreeQuarters)),
            vec!["3"]
        );
        assert_eq!(
            roll_numbers(&filter_by_bucket(&summaries, Bucket::BelowThreeQuarters)),
            vec!["1"]
        );
    }

    #[test]
    fn test_filter_buckets_partition_summaries() {
        let summaries = sample_summaries();
        let mut seen: Vec<StudentSummary> = [
            Bucket::Full,
            Bucket::AtLeastThreeQuarters,
            Bucket::BelowThreeQuarters,
        ]
        .into_iter()
        .flat_map(|b| filter_by_bucket(&summaries, b))
        .collect();

        seen.sort_by(|a, b| a.roll_no.cmp(&b.roll_no));
        let mut all = filter_by_bucket(&summaries, Bucket::All);
        all.sort_by(|a, b| a.roll_no.cmp(&b.roll_no));

        assert_eq!(seen, all);
    }

    #[test]
    fn test_filter_empty_result_is_not_an_error() {
        let summaries = aggregate(&[RawAttendanceEvent::new("1", "A", true)]);
        assert!(filter_by_bucket(&summaries, Bucket::BelowThreeQuarters).is_empty());
    }

    #[test]
    fn test_filter_by_name() {
        let summaries = sample_summaries();

        assert_eq!(roll_numbers(&filter_by_name(&summaries, "full").unwrap()), vec!["2"]);
        assert!(filter_by_name(&summaries, "everyone").is_err());
    }

    #[test]
    fn test_bucket_counts() {
        let counts = BucketCounts::tally(&sample_summaries());

        assert_eq!(counts.full, 1);
        assert_eq!(counts.at_least_three_quarters, 1);
        assert_eq!(counts.below_three_quarters, 1);
        assert_eq!(counts.get(Bucket::All), 3);
    }
}
