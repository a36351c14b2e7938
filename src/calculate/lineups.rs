//! Lineup statistics: favourite picks, captains and per-position comparisons.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use serde::Serialize;

use super::filter::NoData;
use crate::models::{AthleteCount, LineupDataset, LineupSelection, PositionComparison, POSITIONS};

const MOST_SELECTED_LIMIT: usize = 50;
const TOP_CAPTAINS_LIMIT: usize = 30;
const PER_POSITION_LIMIT: usize = 5;

/// Everything the lineup view needs for one season and round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupReport {
    pub season: String,

    /// Round shown, `None` when the sheet has no round column
    pub round: Option<u32>,

    /// Rounds available for the season, ascending
    pub rounds: Vec<u32>,

    pub teams: Vec<String>,
    pub focus_team: Option<String>,
    pub most_selected: Vec<AthleteCount>,
    pub top_captains: Vec<AthleteCount>,
    pub positions: Vec<PositionComparison>,
}

/// Count keys, highest first. Equal counts keep first-appearance order.
fn count_by<K, I>(keys: I) -> Vec<(K, u32)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, u32)> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Seasons with lineups, most recent first.
pub fn lineup_seasons(ds: &LineupDataset) -> Vec<String> {
    let set: BTreeSet<&str> = ds.rows.iter().filter_map(|r| r.season.as_deref()).collect();
    set.into_iter().rev().map(str::to_string).collect()
}

/// Rounds with lineups in a season, ascending.
pub fn lineup_rounds(ds: &LineupDataset, season: &str) -> Vec<u32> {
    let set: BTreeSet<u32> = ds
        .rows
        .iter()
        .filter(|r| r.season.as_deref() == Some(season))
        .filter_map(|r| r.round)
        .collect();
    set.into_iter().collect()
}

/// Lineups of a season, optionally narrowed to one round.
pub fn select_lineups<'a>(
    ds: &'a LineupDataset,
    season: &str,
    round: Option<u32>,
) -> Result<Vec<&'a LineupSelection>, NoData> {
    let rows: Vec<&LineupSelection> = ds
        .rows
        .iter()
        .filter(|r| r.season.as_deref() == Some(season))
        .collect();

    if rows.is_empty() {
        return Err(NoData::NoLineups {
            season: season.to_string(),
        });
    }

    let (Some(n), true) = (round, ds.schema.has_round) else {
        return Ok(rows);
    };

    let rows: Vec<&LineupSelection> = rows.into_iter().filter(|r| r.round == Some(n)).collect();
    if rows.is_empty() {
        return Err(NoData::NoLineupsInRound {
            season: season.to_string(),
            round: n,
        });
    }
    Ok(rows)
}

/// Most picked (athlete, position) pairs.
pub fn most_selected(rows: &[&LineupSelection], limit: usize) -> Vec<AthleteCount> {
    count_by(
        rows.iter()
            .filter(|r| !r.position.is_empty())
            .map(|r| (r.athlete.as_str(), r.position.as_str())),
    )
    .into_iter()
    .take(limit)
    .map(|((athlete, position), count)| AthleteCount {
        athlete: athlete.to_string(),
        position: Some(position.to_string()),
        count,
    })
    .collect()
}

/// Athletes most often chosen as captain.
pub fn top_captains(rows: &[&LineupSelection], limit: usize) -> Vec<AthleteCount> {
    count_by(rows.iter().filter(|r| r.captain).map(|r| r.athlete.as_str()))
        .into_iter()
        .take(limit)
        .map(|(athlete, count)| AthleteCount {
            athlete: athlete.to_string(),
            position: None,
            count,
        })
        .collect()
}

/// Most picked athletes at one position.
pub fn top_by_position(rows: &[&LineupSelection], position: &str, limit: usize) -> Vec<AthleteCount> {
    count_by(
        rows.iter()
            .filter(|r| r.position == position)
            .map(|r| r.athlete.as_str()),
    )
    .into_iter()
    .take(limit)
    .map(|(athlete, count)| AthleteCount {
        athlete: athlete.to_string(),
        position: None,
        count,
    })
    .collect()
}

/// Top five per position for `team` next to the whole selection.
pub fn position_comparison(rows: &[&LineupSelection], team: &str) -> Vec<PositionComparison> {
    let team_rows: Vec<&LineupSelection> = rows.iter().copied().filter(|r| r.team == team).collect();
    POSITIONS
        .iter()
        .map(|pos| PositionComparison {
            position: pos.to_string(),
            team: top_by_position(&team_rows, pos, PER_POSITION_LIMIT),
            overall: top_by_position(rows, pos, PER_POSITION_LIMIT),
        })
        .collect()
}

/// Build the lineup view. Without an explicit round, the season's latest
/// round is shown; without a known focus team, the first team alphabetically.
pub fn lineup_report(
    ds: &LineupDataset,
    season: &str,
    round: Option<u32>,
    team: Option<&str>,
) -> Result<LineupReport, NoData> {
    let rounds = lineup_rounds(ds, season);
    let round = round.or_else(|| rounds.last().copied());
    let rows = select_lineups(ds, season, round)?;

    let teams: Vec<String> = rows
        .iter()
        .map(|r| r.team.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let focus_team = team
        .filter(|t| teams.iter().any(|known| known == t))
        .map(str::to_string)
        .or_else(|| teams.first().cloned());

    let positions = match &focus_team {
        Some(t) => position_comparison(&rows, t),
        None => Vec::new(),
    };

    Ok(LineupReport {
        season: season.to_string(),
        round: if ds.schema.has_round { round } else { None },
        rounds,
        most_selected: most_selected(&rows, MOST_SELECTED_LIMIT),
        top_captains: top_captains(&rows, TOP_CAPTAINS_LIMIT),
        teams,
        focus_team,
        positions,
    })
}
