//! Row normalization.
//!
//! Turns a [`RawTable`] into a canonical dataset: headers go through a fixed
//! alias table, absent optional columns get documented defaults, and season
//! tokens are collapsed so that "2025" and "2025.0" are the same season.
//! Malformed rows are dropped and counted, never fatal.

mod coerce;

pub use coerce::{coerce_season, is_captain, parse_round, parse_score};

use chrono::Datelike;
use tracing::{debug, info};

use crate::ingest::{cell, RawTable};
use crate::models::{
    Diagnostics, LineupDataset, LineupSchema, LineupSelection, MatchRow, ResultsDataset,
    ResultsSchema, SkipReason, DEFAULT_COMPETITION,
};

pub const SEASON: &str = "Temporada";
pub const COMPETITION: &str = "Competição";
pub const ROUND: &str = "Rodada";
pub const HOME: &str = "Mandante";
pub const AWAY: &str = "Visitante";
pub const ATHLETE: &str = "Atleta";
pub const POSITION: &str = "Posição";
pub const TEAM: &str = "Time";
pub const CAPTAIN: &str = "Capitao";

/// Header aliases for the results sheet.
const RESULTS_ALIASES: &[(&str, &str)] = &[("Competicao", COMPETITION), ("Ano", SEASON)];

/// Header aliases for the lineup sheet.
const LINEUP_ALIASES: &[(&str, &str)] = &[
    ("Nome", ATHLETE),
    ("Posicao", POSITION),
    ("Time Cartola", TEAM),
    ("ime Cartola", TEAM),
    ("Capitão", CAPTAIN),
    ("Ano", SEASON),
];

/// Candidate headers for each score column, in priority order.
const HOME_SCORE_COLUMNS: &[&str] = &["Pontuação", "Pontuacao_Mandante"];
const AWAY_SCORE_COLUMNS: &[&str] = &["Pontuação.1", "Pontuacao_Visitante"];

/// Builds canonical datasets from raw tables.
#[derive(Debug, Clone)]
pub struct Normalizer {
    default_season: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Normalizer whose missing-season default is the current year.
    pub fn new() -> Self {
        Self::with_default_season(chrono::Local::now().year().to_string())
    }

    /// Normalizer with an explicit default season.
    pub fn with_default_season(season: impl Into<String>) -> Self {
        Self {
            default_season: season.into(),
        }
    }

    /// Normalize the results sheet.
    pub fn results(&self, table: &RawTable) -> ResultsDataset {
        let headers = apply_aliases(&table.headers, RESULTS_ALIASES);
        let column = |name: &str| headers.iter().position(|h| h == name);
        let first_of = |names: &[&str]| {
            names
                .iter()
                .find(|n| column(**n).is_some())
                .map(|n| n.to_string())
        };

        let schema = ResultsSchema {
            has_season: column(SEASON).is_some(),
            has_competition: column(COMPETITION).is_some(),
            has_round: column(ROUND).is_some(),
            home_score_column: first_of(HOME_SCORE_COLUMNS),
            away_score_column: first_of(AWAY_SCORE_COLUMNS),
        };
        debug!("Resolved results schema: {:?}", schema);

        let season_idx = column(SEASON);
        let competition_idx = column(COMPETITION);
        let round_idx = column(ROUND);
        let home_idx = column(HOME);
        let away_idx = column(AWAY);
        let home_score_idx = schema.home_score_column.as_deref().and_then(column);
        let away_score_idx = schema.away_score_column.as_deref().and_then(column);

        let mut diagnostics = Diagnostics::default();
        let mut rows = Vec::with_capacity(table.rows.len());

        for raw in &table.rows {
            let season = if schema.has_season {
                match cell(raw, season_idx).and_then(coerce_season) {
                    Some(s) => s,
                    None => {
                        diagnostics.record(SkipReason::InvalidSeason);
                        continue;
                    }
                }
            } else {
                self.default_season.clone()
            };

            rows.push(MatchRow {
                season,
                competition: cell(raw, competition_idx)
                    .unwrap_or(DEFAULT_COMPETITION)
                    .to_string(),
                round: cell(raw, round_idx).and_then(parse_round),
                home: cell(raw, home_idx).map(str::to_string),
                away: cell(raw, away_idx).map(str::to_string),
                home_score: cell(raw, home_score_idx).map(str::to_string),
                away_score: cell(raw, away_score_idx).map(str::to_string),
            });
        }

        info!(
            "Normalized results: {} rows kept, {} dropped",
            rows.len(),
            diagnostics.total()
        );

        ResultsDataset {
            schema,
            rows,
            diagnostics,
        }
    }

    /// Normalize the lineup sheet.
    pub fn lineups(&self, table: &RawTable) -> LineupDataset {
        let headers = apply_aliases(&table.headers, LINEUP_ALIASES);
        let column = |name: &str| headers.iter().position(|h| h == name);

        let schema = LineupSchema {
            has_season: column(SEASON).is_some(),
            has_round: column(ROUND).is_some(),
            has_captain: column(CAPTAIN).is_some(),
        };

        let season_idx = column(SEASON);
        let round_idx = column(ROUND);
        let team_idx = column(TEAM);
        let athlete_idx = column(ATHLETE);
        let position_idx = column(POSITION);
        let captain_idx = column(CAPTAIN);

        let mut diagnostics = Diagnostics::default();
        let mut rows = Vec::with_capacity(table.rows.len());

        for raw in &table.rows {
            let season = if schema.has_season {
                match cell(raw, season_idx).and_then(coerce_season) {
                    Some(s) => Some(s),
                    None => {
                        diagnostics.record(SkipReason::InvalidSeason);
                        continue;
                    }
                }
            } else {
                None
            };

            let round = if schema.has_round {
                match cell(raw, round_idx).and_then(parse_round) {
                    Some(r) => Some(r),
                    None => {
                        diagnostics.record(SkipReason::MissingRound);
                        continue;
                    }
                }
            } else {
                None
            };

            let (Some(team), Some(athlete)) = (cell(raw, team_idx), cell(raw, athlete_idx))
            else {
                diagnostics.record(SkipReason::MissingEntity);
                continue;
            };

            rows.push(LineupSelection {
                season,
                round,
                team: team.to_string(),
                athlete: athlete.to_string(),
                position: cell(raw, position_idx).unwrap_or_default().to_string(),
                captain: cell(raw, captain_idx).is_some_and(is_captain),
            });
        }

        info!(
            "Normalized lineups: {} rows kept, {} dropped",
            rows.len(),
            diagnostics.total()
        );

        LineupDataset {
            schema,
            rows,
            diagnostics,
        }
    }
}

/// Rename headers found in `aliases`; others pass through unchanged.
fn apply_aliases(headers: &[String], aliases: &[(&str, &str)]) -> Vec<String> {
    headers
        .iter()
        .map(|h| {
            let h = h.trim();
            aliases
                .iter()
                .find(|(from, _)| *from == h)
                .map(|(_, to)| to.to_string())
                .unwrap_or_else(|| h.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_results_aliases_and_season_coercion() {
        let raw = table(
            &["Ano", "Competicao", "Rodada", "Mandante", "Pontuação", "Visitante", "Pontuação.1"],
            &[
                &["2025.0", "Liga A", "1", "A", "55.0", "B", "50.0"],
                &["2025", "Liga A", "1", "C", "40", "D", "41"],
            ],
        );

        let ds = Normalizer::with_default_season("1999").results(&raw);

        assert!(ds.schema.has_season);
        assert!(ds.schema.has_competition);
        assert_eq!(ds.schema.home_score_column.as_deref(), Some("Pontuação"));
        assert_eq!(ds.schema.away_score_column.as_deref(), Some("Pontuação.1"));
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.rows[0].season, "2025");
        assert_eq!(ds.rows[1].season, "2025");
        assert_eq!(ds.rows[0].competition, "Liga A");
        assert_eq!(ds.rows[0].home_score.as_deref(), Some("55.0"));
        assert_eq!(ds.rows[0].away.as_deref(), Some("B"));
    }

    #[test]
    fn test_results_defaults_when_columns_missing() {
        let raw = table(
            &["Rodada", "Mandante", "Pontuacao_Mandante", "Visitante", "Pontuacao_Visitante"],
            &[&["3", "A", "60", "B", "50"]],
        );

        let ds = Normalizer::with_default_season("2026").results(&raw);

        assert!(!ds.schema.has_season);
        assert!(!ds.schema.has_competition);
        assert_eq!(ds.schema.home_score_column.as_deref(), Some("Pontuacao_Mandante"));
        assert_eq!(ds.rows[0].season, "2026");
        assert_eq!(ds.rows[0].competition, DEFAULT_COMPETITION);
        assert_eq!(ds.rows[0].round, Some(3));
    }

    #[test]
    fn test_results_drops_nan_seasons() {
        let raw = table(
            &["Temporada", "Mandante", "Visitante"],
            &[&["nan", "A", "B"], &["", "C", "D"], &["2024", "E", "F"]],
        );

        let ds = Normalizer::with_default_season("2026").results(&raw);

        assert_eq!(ds.rows.len(), 1);
        assert_eq!(ds.rows[0].season, "2024");
        assert_eq!(ds.diagnostics.count(SkipReason::InvalidSeason), 2);
    }

    #[test]
    fn test_results_without_round_column() {
        let raw = table(&["Temporada", "Mandante", "Visitante"], &[&["2025", "A", "B"]]);
        let ds = Normalizer::with_default_season("2026").results(&raw);

        assert!(!ds.schema.has_round);
        assert_eq!(ds.rows[0].round, None);
        assert_eq!(ds.rows[0].home_score, None);
    }

    #[test]
    fn test_results_empty_table() {
        let ds = Normalizer::new().results(&RawTable::default());
        assert!(ds.is_empty());
        assert_eq!(ds.diagnostics.total(), 0);
    }

    #[test]
    fn test_lineups_aliases_and_filters() {
        let raw = table(
            &["Ano", "Rodada", "Time Cartola", "Nome", "Posicao", "Capitão"],
            &[
                &["2025.0", "1", "Time A", "Hulk", "Atacante", "CAP"],
                &["2025", "x", "Time A", "Arrascaeta", "Meia", ""],
                &["2025", "2", "", "Pedro", "Atacante", ""],
                &["nan", "2", "Time B", "Gerson", "Meia", ""],
                &["2025", "2.0", "Time B", "Everson", "Goleiro", "cap."],
            ],
        );

        let ds = Normalizer::new().lineups(&raw);

        assert!(ds.schema.has_captain);
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.rows[0].season.as_deref(), Some("2025"));
        assert_eq!(ds.rows[0].athlete, "Hulk");
        assert_eq!(ds.rows[0].team, "Time A");
        assert!(ds.rows[0].captain);
        assert_eq!(ds.rows[1].round, Some(2));
        assert!(ds.rows[1].captain);
        assert_eq!(ds.diagnostics.count(SkipReason::MissingRound), 1);
        assert_eq!(ds.diagnostics.count(SkipReason::MissingEntity), 1);
        assert_eq!(ds.diagnostics.count(SkipReason::InvalidSeason), 1);
    }

    #[test]
    fn test_lineups_misspelled_team_header() {
        let raw = table(&["ime Cartola", "Atleta", "Posição"], &[&["Time C", "Bruno Henrique", "Atacante"]]);
        let ds = Normalizer::new().lineups(&raw);

        assert!(!ds.schema.has_season);
        assert!(!ds.schema.has_round);
        assert_eq!(ds.rows[0].team, "Time C");
        assert_eq!(ds.rows[0].season, None);
        assert!(!ds.rows[0].captain);
    }

    #[test]
    fn test_apply_aliases_passthrough() {
        let headers = vec![" Ano ".to_string(), "Mandante".to_string()];
        assert_eq!(apply_aliases(&headers, RESULTS_ALIASES), vec!["Temporada", "Mandante"]);
    }
}
