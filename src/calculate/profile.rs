//! Per-team summary ("Raio-X").

use std::collections::BTreeSet;

use crate::models::{HistoryEntry, Outcome, Side, TeamProfile};

/// Share of available points earned, as a percentage.
pub fn performance_pct(points: u32, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        points as f64 / (games as f64 * 3.0) * 100.0
    }
}

/// Distinct entity names, alphabetical.
pub fn entities(sides: &[Side]) -> Vec<String> {
    let set: BTreeSet<&str> = sides.iter().map(|s| s.entity.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Summarize one entity's fixtures. `None` if the entity has no sides.
pub fn team_profile(sides: &[Side], entity: &str) -> Option<TeamProfile> {
    let own: Vec<&Side> = sides.iter().filter(|s| s.entity == entity).collect();
    if own.is_empty() {
        return None;
    }

    let games = own.len() as u32;
    let points: u32 = own.iter().map(|s| s.points).sum();
    let total_score: f64 = own.iter().map(|s| s.score_for).sum();
    let count = |o: Outcome| own.iter().filter(|s| s.outcome == o).count() as u32;

    let mut history: Vec<HistoryEntry> = own
        .iter()
        .map(|s| HistoryEntry {
            round: s.round,
            outcome: s.outcome,
            result: s.outcome.label().to_string(),
            score_for: s.score_for,
            score_against: s.score_against,
            opponent: s.opponent.clone(),
            competition: s.competition.clone(),
        })
        .collect();
    // Option orders None first; reversing puts latest rounds on top and None last
    history.sort_by(|a, b| b.round.cmp(&a.round));

    Some(TeamProfile {
        entity: entity.to_string(),
        points,
        average_score: total_score / games as f64,
        games,
        performance_pct: performance_pct(points, games),
        wins: count(Outcome::Win),
        draws: count(Outcome::Draw),
        losses: count(Outcome::Loss),
        history,
    })
}
