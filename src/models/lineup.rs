//! Lineup selections and their aggregates.

use serde::{Deserialize, Serialize};

/// Positions shown in the per-position comparison, in display order.
pub const POSITIONS: [&str; 6] = [
    "Goleiro", "Lateral", "Zagueiro", "Meia", "Atacante", "Técnico",
];

/// One athlete picked by one team in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSelection {
    /// `None` when the lineup sheet has no season column
    pub season: Option<String>,
    pub round: Option<u32>,
    pub team: String,
    pub athlete: String,
    pub position: String,
    pub captain: bool,
}

/// Times an athlete (optionally at a position) was selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteCount {
    pub athlete: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub count: u32,
}

/// Top athletes of one position for a focus team and for the whole season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionComparison {
    pub position: String,
    pub team: Vec<AthleteCount>,
    pub overall: Vec<AthleteCount>,
}
