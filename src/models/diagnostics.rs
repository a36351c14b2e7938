//! Per-row skip accounting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why a row was left out of aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A score cell was empty
    MissingScore,
    /// A score cell did not parse as a finite number
    NonNumericScore,
    /// Home or away name was empty
    MissingEntity,
    /// A lineup row had no usable round
    MissingRound,
    /// Season was empty or "nan"
    InvalidSeason,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::MissingScore => "missing score",
            SkipReason::NonNumericScore => "non-numeric score",
            SkipReason::MissingEntity => "missing entity",
            SkipReason::MissingRound => "missing round",
            SkipReason::InvalidSeason => "invalid season",
        };
        write!(f, "{}", s)
    }
}

/// Aggregate skip counts. Rows are counted, not individually reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub skipped: BTreeMap<SkipReason, u32>,
}

impl Diagnostics {
    pub fn record(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    /// Number of rows skipped for `reason`.
    pub fn count(&self, reason: SkipReason) -> u32 {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.skipped.values().sum()
    }

    pub fn merge(&mut self, other: &Diagnostics) {
        for (reason, n) in &other.skipped {
            *self.skipped.entry(*reason).or_default() += n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_counts() {
        let mut d = Diagnostics::default();
        d.record(SkipReason::MissingScore);
        d.record(SkipReason::MissingScore);
        d.record(SkipReason::NonNumericScore);

        assert_eq!(d.count(SkipReason::MissingScore), 2);
        assert_eq!(d.count(SkipReason::MissingEntity), 0);
        assert_eq!(d.total(), 3);
    }

    #[test]
    fn test_diagnostics_merge() {
        let mut a = Diagnostics::default();
        a.record(SkipReason::InvalidSeason);
        let mut b = Diagnostics::default();
        b.record(SkipReason::InvalidSeason);
        b.record(SkipReason::MissingRound);

        a.merge(&b);
        assert_eq!(a.count(SkipReason::InvalidSeason), 2);
        assert_eq!(a.total(), 3);
    }

    #[test]
    fn test_diagnostics_serialization() {
        let mut d = Diagnostics::default();
        d.record(SkipReason::NonNumericScore);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["skipped"]["non_numeric_score"], 1);
    }
}
