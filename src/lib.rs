//! # Cartola Dashboard
//!
//! A fantasy-football league dashboard: standings, team profiles and round
//! leaderboards computed from match-result and lineup spreadsheets.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (fixtures, sides, tables, lineups)
//! - **ingest**: Spreadsheet loading (CSV, XLSX)
//! - **normalize**: Column aliasing and value coercion into canonical rows
//! - **storage**: Content-hashed dataset memoization
//! - **calculate**: Filtering, outcome resolution and aggregation
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod storage;

pub use models::*;
