//! Normalized datasets and the schemas resolved while building them.

use serde::{Deserialize, Serialize};

use super::{Diagnostics, LineupSelection, MatchRow};

/// Which optional columns the results sheet carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSchema {
    pub has_season: bool,
    pub has_competition: bool,
    pub has_round: bool,

    /// Header used for the home score, if any was found
    pub home_score_column: Option<String>,

    /// Header used for the away score, if any was found
    pub away_score_column: Option<String>,
}

/// Canonical results sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsDataset {
    pub schema: ResultsSchema,
    pub rows: Vec<MatchRow>,

    /// Rows dropped during normalization
    pub diagnostics: Diagnostics,
}

impl ResultsDataset {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Which optional columns the lineup sheet carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSchema {
    pub has_season: bool,
    pub has_round: bool,
    pub has_captain: bool,
}

/// Canonical lineup sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineupDataset {
    pub schema: LineupSchema,
    pub rows: Vec<LineupSelection>,
    pub diagnostics: Diagnostics,
}

impl LineupDataset {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
