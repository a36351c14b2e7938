//! Statistics calculation engine.
//!
//! Pure transforms from the normalized datasets to dashboard tables:
//! - Range filtering and cascading filter options
//! - Outcome resolution (two sides per fixture)
//! - League table, team profiles and round leaderboards
//! - Lineup popularity

pub mod filter;
pub mod legends;
pub mod lineups;
pub mod outcome;
pub mod profile;
pub mod standings;

pub use filter::{
    competitions, round_bounds, seasons, select, CompetitionFilter, NoData, RangeQuery,
    RoundRange, ALL_COMPETITIONS,
};
pub use legends::{
    hall_of_fame, league_competitions, round_champions, round_champions_by_league, round_kings,
    LeagueChampions,
};
pub use lineups::{lineup_report, lineup_rounds, lineup_seasons, LineupReport};
pub use outcome::{resolve, resolve_all, resolve_row, Resolved};
pub use profile::{entities, performance_pct, team_profile};
pub use standings::standings;

use crate::models::ResultsDataset;

/// Filter the dataset and resolve every selected fixture into sides.
///
/// The returned diagnostics include rows dropped during normalization.
pub fn sides_for(
    ds: &ResultsDataset,
    query: &RangeQuery,
    draw_margin: f64,
) -> Result<Resolved, NoData> {
    let rows = select(ds, query)?;
    let mut resolved = resolve_all(rows, draw_margin);
    resolved.diagnostics.merge(&ds.diagnostics);
    Ok(resolved)
}
