//! One entity's participation in one fixture.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a fixture from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// League points awarded for this outcome.
    pub fn points(&self) -> u32 {
        match self {
            Outcome::Win => 3,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        }
    }

    /// Single-letter tag used in the league table (V/E/D).
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Win => "V",
            Outcome::Draw => "E",
            Outcome::Loss => "D",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win => "VITÓRIA",
            Outcome::Draw => "EMPATE",
            Outcome::Loss => "DERROTA",
        }
    }

    /// The same fixture seen from the opponent's side.
    pub fn flipped(&self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One entity's derived record for a fixture. Two are emitted per fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Side {
    /// Entity (manager team) name
    pub entity: String,

    /// Opposing entity name
    pub opponent: String,

    /// Round number
    pub round: Option<u32>,

    /// Points earned (0, 1 or 3)
    pub points: u32,

    pub outcome: Outcome,

    /// This side's score
    pub score_for: f64,

    /// The opponent's score
    pub score_against: f64,

    pub competition: String,
}
