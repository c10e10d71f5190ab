use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An attendance rate held as hundredths of a percent (`0..=10_000`).
///
/// Keeping the value as an integer makes the two-decimal rounding exact and
/// lets bucket boundaries (`100.00`, `75.00`) compare without float drift.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid percentage '{0}'")]
pub struct ParsePercentageError(String);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const THREE_QUARTERS: Percentage = Percentage(7_500);
    pub const FULL: Percentage = Percentage(10_000);

    /// Computes `part / total * 100`, rounded half-up to two decimals.
    ///
    /// A zero `total` yields [`Percentage::ZERO`].
    pub fn of(part: u32, total: u32) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let part = u64::from(part.min(total));
        let total = u64::from(total);
        // round(part * 10_000 / total) == floor((2 * part * 10_000 + total) / (2 * total))
        let hundredths = (2 * part * 10_000 + total) / (2 * total);
        Percentage(hundredths as u32)
    }

    pub fn from_hundredths(hundredths: u32) -> Option<Self> {
        (hundredths <= Self::FULL.0).then_some(Percentage(hundredths))
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Accepts `50`, `50.5`, `50.00` and the exported `50.00%` form.
impl FromStr for Percentage {
    type Err = ParsePercentageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePercentageError(s.to_string());

        let text = s.trim();
        let text = text.strip_suffix('%').unwrap_or(text).trim_end();
        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || frac.len() > 2 || !all_digits(whole) || !all_digits(frac) {
            return Err(invalid());
        }

        let whole: u32 = whole.parse().map_err(|_| invalid())?;
        let frac: u32 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u32>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac))
            .and_then(Percentage::from_hundredths)
            .ok_or_else(invalid)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}
