//! Match rows and fixtures.

use serde::{Deserialize, Serialize};

/// Competition name used when the results sheet has no competition column.
pub const DEFAULT_COMPETITION: &str = "Geral";

/// One canonical row of the results sheet, after column aliasing and season
/// coercion but before score validation.
///
/// Scores are kept as raw cell text so the outcome resolver can decide
/// whether the fixture is usable and why not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    /// Season token, e.g. "2025"
    pub season: String,

    /// Competition name ("Geral" when the sheet has none)
    pub competition: String,

    /// Round number, `None` when absent or unparseable
    pub round: Option<u32>,

    /// Home entity name
    pub home: Option<String>,

    /// Away entity name
    pub away: Option<String>,

    /// Raw home score cell
    pub home_score: Option<String>,

    /// Raw away score cell
    pub away_score: Option<String>,
}

/// A validated fixture: both entities named, both scores numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub season: String,
    pub competition: String,
    pub round: Option<u32>,
    pub home: String,
    pub away: String,
    pub home_score: f64,
    pub away_score: f64,
}

impl Fixture {
    /// Absolute score difference between the two sides.
    pub fn margin(&self) -> f64 {
        (self.home_score - self.away_score).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_margin_is_symmetric() {
        let mut f = Fixture {
            season: "2025".to_string(),
            competition: DEFAULT_COMPETITION.to_string(),
            round: Some(1),
            home: "A".to_string(),
            away: "B".to_string(),
            home_score: 55.0,
            away_score: 50.0,
        };
        assert_eq!(f.margin(), 5.0);

        std::mem::swap(&mut f.home_score, &mut f.away_score);
        assert_eq!(f.margin(), 5.0);
    }
}
