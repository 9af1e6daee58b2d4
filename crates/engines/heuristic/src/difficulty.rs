use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AI strength tier, chosen when a game starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Random moves, but grabs material 70% of the time.
    Easy,
    /// One-ply lookahead through the evaluator, top-K sampling.
    #[default]
    Medium,
    /// Heuristic move ordering without lookahead, top-K sampling.
    Hard,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Share of the ranked candidates that top-K sampling draws from.
    pub fn top_k_fraction(self) -> Option<f64> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(0.3),
            Difficulty::Hard => Some(0.4),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// `clamp(round(fraction * n), 3, 5)`; callers cap it at `n`.
pub fn top_k(n: usize, fraction: f64) -> usize {
    ((fraction * n as f64).round() as usize).clamp(3, 5)
}
