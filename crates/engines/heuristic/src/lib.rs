//! ChessMate Heuristic Engine
//!
//! The AI opponent: a positional evaluator plus a move selector whose
//! strength depends on the chosen [`Difficulty`].
//! - Easy plays almost randomly but usually takes free material
//! - Medium looks one ply ahead through the evaluator
//! - Hard ranks moves by captures, checks, center control and development
//!
//! Both scored tiers sample among their top few candidates, so the engine
//! never plays the same game twice.

mod difficulty;
mod eval;
mod pst;
mod selector;

#[cfg(test)]
mod lib_tests;

use chessmate_core::{Engine, Position, SearchResult};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use difficulty::{top_k, Difficulty, UnknownDifficulty};
pub use eval::{
    evaluate, evaluate_static, is_center, material_value, relative_to, CENTER_SQUARES, NOISE,
};
pub use pst::positional_value;
pub use selector::{
    capture_value, heuristic_score, piece_activity, MoveSelector, ScoredMove,
    EASY_CAPTURE_PROBABILITY,
};

/// The ChessMate AI opponent.
#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    difficulty: Difficulty,
    selector: MoveSelector<StdRng>,
    /// Node counter for statistics
    nodes: u64,
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl HeuristicEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            selector: MoveSelector::new(StdRng::from_entropy()),
            nodes: 0,
        }
    }

    /// Reproducible engine: the same seed replays the same choices.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            selector: MoveSelector::new(StdRng::seed_from_u64(seed)),
            nodes: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Positions evaluated since the last `new_game`.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for HeuristicEngine {
    fn search(&mut self, pos: &mut Position) -> SearchResult {
        let stm = pos.side_to_move();
        let score = relative_to(evaluate_static(pos), stm);
        let legal = pos.legal_moves();
        if legal.is_empty() {
            return SearchResult {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
            };
        }

        let before = self.selector.evaluations();
        let mv = self.selector.select_move(&legal, pos, self.difficulty);
        let nodes = self.selector.evaluations() - before;
        self.nodes += nodes;

        SearchResult {
            best_move: Some(mv),
            score,
            depth: u8::from(self.difficulty == Difficulty::Medium),
            nodes,
        }
    }

    fn name(&self) -> &str {
        "ChessMate Heuristic v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "difficulty" | "skill" => match value.parse() {
                Ok(d) => {
                    self.difficulty = d;
                    true
                }
                Err(e) => {
                    tracing::warn!("{e}");
                    false
                }
            },
            "seed" => match value.trim().parse::<u64>() {
                Ok(seed) => {
                    self.selector = MoveSelector::new(StdRng::seed_from_u64(seed));
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }
}
