//! Round leaderboards: Hall of Fame, Round Champions and Round Kings.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::config::ScoringConfig;
use crate::models::{LeaderboardEntry, Side};

/// Round champions of one league.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueChampions {
    pub competition: String,
    pub champions: Vec<LeaderboardEntry>,
}

fn to_entries<'a>(sides: impl IntoIterator<Item = &'a Side>) -> Vec<LeaderboardEntry> {
    sides
        .into_iter()
        .enumerate()
        .map(|(i, s)| LeaderboardEntry {
            position: i as u32 + 1,
            entity: s.entity.clone(),
            score: s.score_for,
            round: s.round,
            competition: s.competition.clone(),
            opponent: s.opponent.clone(),
        })
        .collect()
}

/// Highest single-round scores, best first.
///
/// Each (entity, round) pair appears once, with its best score, so a team
/// playing two competitions in the same round is not listed twice.
pub fn hall_of_fame(sides: &[Side], limit: usize) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&Side> = sides.iter().collect();
    ranked.sort_by(|a, b| b.score_for.total_cmp(&a.score_for));

    let mut seen: HashSet<(&str, Option<u32>)> = HashSet::new();
    let best = ranked
        .into_iter()
        .filter(|s| seen.insert((s.entity.as_str(), s.round)))
        .take(limit);

    to_entries(best)
}

/// Sides scoring their round's maximum. Ties are all kept; output is in
/// round order. Sides without a round are ignored.
fn top_per_round<'a>(sides: impl IntoIterator<Item = &'a Side>) -> Vec<&'a Side> {
    let sides: Vec<&Side> = sides.into_iter().filter(|s| s.round.is_some()).collect();

    let mut best: BTreeMap<u32, f64> = BTreeMap::new();
    for side in &sides {
        if let Some(round) = side.round {
            best.entry(round)
                .and_modify(|m| *m = m.max(side.score_for))
                .or_insert(side.score_for);
        }
    }

    let mut winners: Vec<&Side> = sides
        .into_iter()
        .filter(|s| s.round.and_then(|r| best.get(&r)) == Some(&s.score_for))
        .collect();
    winners.sort_by_key(|s| s.round);
    winners
}

/// League competitions present in the sides, alphabetical.
pub fn league_competitions(sides: &[Side], scoring: &ScoringConfig) -> Vec<String> {
    let set: BTreeSet<&str> = sides
        .iter()
        .map(|s| s.competition.as_str())
        .filter(|c| scoring.is_league(c))
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Top scorer(s) of every round in one league. Empty when `competition` is
/// not a league.
pub fn round_champions(
    sides: &[Side],
    competition: &str,
    scoring: &ScoringConfig,
) -> Vec<LeaderboardEntry> {
    if !scoring.is_league(competition) {
        return Vec::new();
    }
    to_entries(top_per_round(
        sides.iter().filter(|s| s.competition == competition),
    ))
}

/// Round champions for every league.
pub fn round_champions_by_league(sides: &[Side], scoring: &ScoringConfig) -> Vec<LeagueChampions> {
    league_competitions(sides, scoring)
        .into_iter()
        .map(|competition| {
            let champions = round_champions(sides, &competition, scoring);
            LeagueChampions {
                competition,
                champions,
            }
        })
        .collect()
}

/// Top scorer(s) of every round across all leagues jointly.
pub fn round_kings(sides: &[Side], scoring: &ScoringConfig) -> Vec<LeaderboardEntry> {
    to_entries(top_per_round(
        sides.iter().filter(|s| scoring.is_league(&s.competition)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use pretty_assertions::assert_eq;

    fn side(entity: &str, round: u32, score: f64, competition: &str) -> Side {
        Side {
            entity: entity.to_string(),
            opponent: format!("{}-opp", entity),
            round: Some(round),
            points: 1,
            outcome: Outcome::Draw,
            score_for: score,
            score_against: 0.0,
            competition: competition.to_string(),
        }
    }

    fn summary(entries: &[LeaderboardEntry]) -> Vec<(String, Option<u32>, f64)> {
        entries
            .iter()
            .map(|e| (e.entity.clone(), e.round, e.score))
            .collect()
    }

    #[test]
    fn test_hall_of_fame_sorted_and_deduplicated() {
        let sides = vec![
            side("A", 1, 70.0, "Liga A"),
            side("A", 1, 90.0, "Copa"),
            side("B", 1, 80.0, "Liga A"),
            side("A", 2, 60.0, "Liga A"),
        ];

        let hof = hall_of_fame(&sides, 50);

        assert_eq!(
            summary(&hof),
            vec![
                ("A".to_string(), Some(1), 90.0),
                ("B".to_string(), Some(1), 80.0),
                ("A".to_string(), Some(2), 60.0),
            ]
        );
        assert_eq!(hof[0].position, 1);
        assert_eq!(hof[0].competition, "Copa");
        assert_eq!(hof[2].position, 3);
    }

    #[test]
    fn test_hall_of_fame_limit() {
        let sides: Vec<Side> = (1..=10).map(|r| side("A", r, r as f64, "Liga A")).collect();
        let hof = hall_of_fame(&sides, 3);

        assert_eq!(hof.len(), 3);
        assert_eq!(hof[0].round, Some(10));
    }

    #[test]
    fn test_round_champions_keep_ties() {
        let scoring = ScoringConfig::default();
        let sides = vec![
            side("A", 2, 80.0, "Liga A"),
            side("B", 1, 75.0, "Liga A"),
            side("C", 1, 75.0, "Liga A"),
            side("D", 1, 50.0, "Liga A"),
            side("E", 1, 99.0, "Liga B"),
        ];

        let champions = round_champions(&sides, "Liga A", &scoring);

        assert_eq!(
            summary(&champions),
            vec![
                ("B".to_string(), Some(1), 75.0),
                ("C".to_string(), Some(1), 75.0),
                ("A".to_string(), Some(2), 80.0),
            ]
        );
    }

    #[test]
    fn test_round_champions_non_league_is_empty() {
        let scoring = ScoringConfig::default();
        let sides = vec![side("A", 1, 80.0, "Copa do Brasil")];

        assert!(round_champions(&sides, "Copa do Brasil", &scoring).is_empty());
        assert!(league_competitions(&sides, &scoring).is_empty());
    }

    #[test]
    fn test_round_champions_by_league() {
        let scoring = ScoringConfig::default();
        let sides = vec![
            side("A", 1, 80.0, "Liga B"),
            side("B", 1, 60.0, "Liga B"),
            side("C", 1, 70.0, "liga a"),
            side("D", 1, 99.0, "Copa"),
        ];

        let by_league = round_champions_by_league(&sides, &scoring);

        assert_eq!(by_league.len(), 2);
        assert_eq!(by_league[0].competition, "Liga B");
        assert_eq!(by_league[0].champions[0].entity, "A");
        assert_eq!(by_league[1].competition, "liga a");
        assert_eq!(by_league[1].champions[0].entity, "C");
    }

    #[test]
    fn test_round_kings_across_leagues() {
        let scoring = ScoringConfig::default();
        let sides = vec![
            side("A", 1, 80.0, "Liga A"),
            side("B", 1, 85.0, "Liga B"),
            side("C", 1, 99.0, "Copa"),
            side("D", 2, 70.0, "Liga A"),
            side("E", 2, 70.0, "Liga B"),
            side("F", 2, 40.0, "Liga B"),
        ];

        let kings = round_kings(&sides, &scoring);

        assert_eq!(
            summary(&kings),
            vec![
                ("B".to_string(), Some(1), 85.0),
                ("D".to_string(), Some(2), 70.0),
                ("E".to_string(), Some(2), 70.0),
            ]
        );
        assert_eq!(kings[2].competition, "Liga B");
    }

    #[test]
    fn test_sides_without_round_are_not_champions() {
        let scoring = ScoringConfig::default();
        let mut s = side("A", 1, 80.0, "Liga A");
        s.round = None;

        assert!(round_kings(&[s], &scoring).is_empty());
    }
}
