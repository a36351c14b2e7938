//! Outcome resolution: one fixture in, two sides out.
//!
//! House rule: a fixture decided by `draw_margin` points or less (3.0 by
//! default) is a draw for both sides. Only a wider margin produces a winner.

use tracing::debug;

use crate::models::{Diagnostics, Fixture, MatchRow, Outcome, Side, SkipReason};
use crate::normalize::parse_score;

/// Sides produced from a batch of rows, plus what was skipped.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub sides: Vec<Side>,
    pub diagnostics: Diagnostics,
}

/// Validate a normalized row into a fixture.
pub fn fixture_from_row(row: &MatchRow) -> Result<Fixture, SkipReason> {
    let home_score = parse_score(row.home_score.as_deref())?;
    let away_score = parse_score(row.away_score.as_deref())?;

    let (Some(home), Some(away)) = (row.home.as_ref(), row.away.as_ref()) else {
        return Err(SkipReason::MissingEntity);
    };

    Ok(Fixture {
        season: row.season.clone(),
        competition: row.competition.clone(),
        round: row.round,
        home: home.clone(),
        away: away.clone(),
        home_score,
        away_score,
    })
}

/// Home side's outcome under the draw-margin rule.
pub fn home_outcome(fixture: &Fixture, draw_margin: f64) -> Outcome {
    if fixture.margin() <= draw_margin {
        Outcome::Draw
    } else if fixture.home_score > fixture.away_score {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

/// Emit the home-as-subject and away-as-subject sides of a fixture.
pub fn resolve(fixture: &Fixture, draw_margin: f64) -> [Side; 2] {
    let home = home_outcome(fixture, draw_margin);
    let away = home.flipped();

    [
        Side {
            entity: fixture.home.clone(),
            opponent: fixture.away.clone(),
            round: fixture.round,
            points: home.points(),
            outcome: home,
            score_for: fixture.home_score,
            score_against: fixture.away_score,
            competition: fixture.competition.clone(),
        },
        Side {
            entity: fixture.away.clone(),
            opponent: fixture.home.clone(),
            round: fixture.round,
            points: away.points(),
            outcome: away,
            score_for: fixture.away_score,
            score_against: fixture.home_score,
            competition: fixture.competition.clone(),
        },
    ]
}

/// Validate and resolve a single row.
pub fn resolve_row(row: &MatchRow, draw_margin: f64) -> Result<[Side; 2], SkipReason> {
    fixture_from_row(row).map(|f| resolve(&f, draw_margin))
}

/// Resolve every row; unusable fixtures are skipped and counted.
pub fn resolve_all<'a, I>(rows: I, draw_margin: f64) -> Resolved
where
    I: IntoIterator<Item = &'a MatchRow>,
{
    let mut resolved = Resolved::default();
    for row in rows {
        match resolve_row(row, draw_margin) {
            Ok(sides) => resolved.sides.extend(sides),
            Err(reason) => {
                debug!(
                    "Skipping fixture {:?} x {:?} (round {:?}): {}",
                    row.home, row.away, row.round, reason
                );
                resolved.diagnostics.record(reason);
            }
        }
    }
    resolved
}
