//! Derived ranking tables.

use serde::{Deserialize, Serialize};

use super::Outcome;

/// One row of the league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// 1-based position after sorting
    #[serde(rename = "Pos")]
    pub position: u32,

    #[serde(rename = "Time")]
    pub entity: String,

    #[serde(rename = "Pontos")]
    pub points: u32,

    #[serde(rename = "V")]
    pub wins: u32,

    #[serde(rename = "E")]
    pub draws: u32,

    #[serde(rename = "D")]
    pub losses: u32,

    /// Sum of the entity's own scores, the third tie-breaker
    #[serde(rename = "Pts Cartola")]
    pub score_for: f64,

    #[serde(rename = "Jogos")]
    pub games: u32,
}

/// One performance in a leaderboard (Hall of Fame, round champions, round kings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "Pos")]
    pub position: u32,

    #[serde(rename = "Time")]
    pub entity: String,

    #[serde(rename = "Pontuação")]
    pub score: f64,

    #[serde(rename = "Rodada")]
    pub round: Option<u32>,

    #[serde(rename = "Competição")]
    pub competition: String,

    #[serde(rename = "Adversário")]
    pub opponent: String,
}

/// A past fixture in a team's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub round: Option<u32>,
    pub outcome: Outcome,

    /// Display label, e.g. "VITÓRIA"
    pub result: String,

    pub score_for: f64,
    pub score_against: f64,
    pub opponent: String,
    pub competition: String,
}

/// Per-team summary ("Raio-X").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub entity: String,
    pub points: u32,
    pub average_score: f64,
    pub games: u32,

    /// Share of available points earned, 0 to 100
    pub performance_pct: f64,

    pub wins: u32,
    pub draws: u32,
    pub losses: u32,

    /// Most recent round first
    pub history: Vec<HistoryEntry>,
}
