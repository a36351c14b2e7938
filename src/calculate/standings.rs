//! League table aggregation.

use std::collections::BTreeMap;

use crate::models::{Outcome, Side, StandingsRow};

/// Build the league table from resolved sides.
///
/// Entities are grouped in name order, then stably sorted by points, wins
/// and score-for total, all descending. Entities tied on all three keep the
/// grouping order.
pub fn standings(sides: &[Side]) -> Vec<StandingsRow> {
    let mut groups: BTreeMap<&str, StandingsRow> = BTreeMap::new();

    for side in sides {
        let row = groups
            .entry(side.entity.as_str())
            .or_insert_with(|| StandingsRow {
                position: 0,
                entity: side.entity.clone(),
                points: 0,
                wins: 0,
                draws: 0,
                losses: 0,
                score_for: 0.0,
                games: 0,
            });

        row.points += side.points;
        row.score_for += side.score_for;
        row.games += 1;
        match side.outcome {
            Outcome::Win => row.wins += 1,
            Outcome::Draw => row.draws += 1,
            Outcome::Loss => row.losses += 1,
        }
    }

    let mut table: Vec<StandingsRow> = groups.into_values().collect();
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| b.score_for.total_cmp(&a.score_for))
    });

    for (i, row) in table.iter_mut().enumerate() {
        row.position = i as u32 + 1;
    }

    table
}
