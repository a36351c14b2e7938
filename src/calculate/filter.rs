//! Range filtering and the cascading filter options (season, competition, rounds).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MatchRow, ResultsDataset};

/// Competition selector label meaning "every competition".
pub const ALL_COMPETITIONS: &str = "Todas";

/// Why a filter produced nothing to show. Rendered as a neutral message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoData {
    #[error("No results loaded yet")]
    NoDataset,

    #[error("No fixtures for {competition} in season {season}")]
    NoFixtures { season: String, competition: String },

    #[error("No round data for {competition} in season {season}")]
    NoRoundData { season: String, competition: String },

    #[error("No fixtures for {competition} in season {season}, rounds {from} to {to}")]
    NoFixturesInRounds {
        season: String,
        competition: String,
        from: u32,
        to: u32,
    },

    #[error("No lineups for season {season}")]
    NoLineups { season: String },

    #[error("No lineups for season {season}, round {round}")]
    NoLineupsInRound { season: String, round: u32 },
}

/// Which competitions to include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionFilter {
    #[default]
    All,
    Named(String),
}

impl CompetitionFilter {
    /// `None`, empty and "Todas" select every competition.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CompetitionFilter::All,
            Some(s) if s.eq_ignore_ascii_case(ALL_COMPETITIONS) => CompetitionFilter::All,
            Some(s) => CompetitionFilter::Named(s.to_string()),
        }
    }

    pub fn matches(&self, competition: &str) -> bool {
        match self {
            CompetitionFilter::All => true,
            CompetitionFilter::Named(name) => name == competition,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CompetitionFilter::All => ALL_COMPETITIONS,
            CompetitionFilter::Named(name) => name,
        }
    }
}

/// Inclusive round interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRange {
    pub from: u32,
    pub to: u32,
}

impl RoundRange {
    /// Build an interval; bounds given in the wrong order are swapped.
    pub fn new(from: u32, to: u32) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    pub fn single(round: u32) -> Self {
        Self::new(round, round)
    }

    pub fn contains(&self, round: u32) -> bool {
        (self.from..=self.to).contains(&round)
    }

    pub fn is_single(&self) -> bool {
        self.from == self.to
    }

    /// Narrow `self` to whatever the caller supplied.
    pub fn with_overrides(&self, from: Option<u32>, to: Option<u32>) -> Self {
        Self::new(from.unwrap_or(self.from), to.unwrap_or(self.to))
    }
}

/// Request-scoped filter parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    pub season: String,
    pub competition: CompetitionFilter,

    /// `None` disables round filtering
    pub rounds: Option<RoundRange>,
}

impl RangeQuery {
    pub fn season(season: impl Into<String>) -> Self {
        Self {
            season: season.into(),
            competition: CompetitionFilter::All,
            rounds: None,
        }
    }

    pub fn with_competition(mut self, competition: CompetitionFilter) -> Self {
        self.competition = competition;
        self
    }

    pub fn with_rounds(mut self, rounds: RoundRange) -> Self {
        self.rounds = Some(rounds);
        self
    }
}

/// Distinct seasons, most recent first.
pub fn seasons(ds: &ResultsDataset) -> Vec<String> {
    let set: BTreeSet<&str> = ds.rows.iter().map(|r| r.season.as_str()).collect();
    set.into_iter().rev().map(str::to_string).collect()
}

/// Distinct competitions of a season, alphabetical.
pub fn competitions(ds: &ResultsDataset, season: &str) -> Vec<String> {
    let set: BTreeSet<&str> = ds
        .rows
        .iter()
        .filter(|r| r.season == season)
        .map(|r| r.competition.as_str())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Lowest and highest round played in a season, across all competitions.
pub fn round_bounds(ds: &ResultsDataset, season: &str) -> Option<RoundRange> {
    let mut rounds = ds
        .rows
        .iter()
        .filter(|r| r.season == season)
        .filter_map(|r| r.round);
    let first = rounds.next()?;
    let (lo, hi) = rounds.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r)));
    Some(RoundRange::new(lo, hi))
}

/// Rows matching the season, competition and round interval.
///
/// Without a round column no round filtering happens. With one, a
/// season/competition whose rounds are all empty is `NoRoundData`, and an
/// interval that matches no fixture is `NoFixturesInRounds`.
pub fn select<'a>(ds: &'a ResultsDataset, query: &RangeQuery) -> Result<Vec<&'a MatchRow>, NoData> {
    let rows: Vec<&MatchRow> = ds
        .rows
        .iter()
        .filter(|r| r.season == query.season && query.competition.matches(&r.competition))
        .collect();

    if rows.is_empty() {
        return Err(NoData::NoFixtures {
            season: query.season.clone(),
            competition: query.competition.label().to_string(),
        });
    }

    if !ds.schema.has_round {
        return Ok(rows);
    }

    if rows.iter().all(|r| r.round.is_none()) {
        return Err(NoData::NoRoundData {
            season: query.season.clone(),
            competition: query.competition.label().to_string(),
        });
    }

    let Some(range) = query.rounds else {
        return Ok(rows);
    };

    let rows: Vec<&MatchRow> = rows
        .into_iter()
        .filter(|r| r.round.is_some_and(|n| range.contains(n)))
        .collect();

    if rows.is_empty() {
        return Err(NoData::NoFixturesInRounds {
            season: query.season.clone(),
            competition: query.competition.label().to_string(),
            from: range.from,
            to: range.to,
        });
    }

    Ok(rows)
}
