//! Match results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result of a single game from one player's perspective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

impl GameOutcome {
    pub fn flipped(self) -> GameOutcome {
        match self {
            GameOutcome::Win => GameOutcome::Loss,
            GameOutcome::Loss => GameOutcome::Win,
            GameOutcome::Draw => GameOutcome::Draw,
        }
    }

    /// PGN-style result string, reading the outcome as White's.
    pub fn as_pgn(self) -> &'static str {
        match self {
            GameOutcome::Win => "1-0",
            GameOutcome::Loss => "0-1",
            GameOutcome::Draw => "1/2-1/2",
        }
    }
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from the first player's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// A single match entry in the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub engine1: String,
    pub engine2: String,
    pub result: MatchResult,
    /// Seed the match was played with, for replaying it
    pub seed: u64,
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// All recorded matches, persisted as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchLog {
    pub matches: Vec<MatchEntry>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_match(&mut self, engine1: &str, engine2: &str, result: MatchResult, seed: u64) {
        self.matches.push(MatchEntry {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            result,
            seed,
        });
    }

    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the log if it exists, start a new one otherwise.
    pub fn load_or_new(path: &Path) -> Result<Self, ReportError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Totals for `engine` across every match it played, from its side.
    pub fn totals_for(&self, engine: &str) -> MatchResult {
        let mut total = MatchResult::new();
        for entry in &self.matches {
            let r = &entry.result;
            if entry.engine1 == engine {
                total.wins += r.wins;
                total.losses += r.losses;
                total.draws += r.draws;
            }
            if entry.engine2 == engine {
                total.wins += r.losses;
                total.losses += r.wins;
                total.draws += r.draws;
            }
        }
        total
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== ChessMate match results ===\n\n");
        report.push_str(&format!(
            "{:<12} vs {:<12} {:>5}-{:<5}-{:<5} {:>7}\n",
            "Engine 1", "Engine 2", "W", "L", "D", "Score"
        ));
        report.push_str(&"-".repeat(56));
        report.push('\n');

        for entry in &self.matches {
            report.push_str(&format!(
                "{:<12} vs {:<12} {:>5}-{:<5}-{:<5} {:>6.1}%\n",
                entry.engine1,
                entry.engine2,
                entry.result.wins,
                entry.result.losses,
                entry.result.draws,
                entry.result.score() * 100.0
            ));
        }

        report
    }

    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
