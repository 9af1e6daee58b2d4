//! Match runner for playing AI-vs-AI games between difficulty tiers

use chessmate_core::{Color, Engine, GameStatus, Position};
use heuristic_engine::{Difficulty, HeuristicEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::results::{GameOutcome, MatchResult};

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Maximum plies per game before declaring a draw
    pub max_moves: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Seed for both engines (random when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_moves: 200,
            alternate_colors: true,
            seed: None,
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play `tier_a` against `tier_b` with seeded engines.
    ///
    /// Returns the result from `tier_a`'s perspective and the seed used.
    pub fn run_tiers(&self, tier_a: Difficulty, tier_b: Difficulty) -> (MatchResult, u64) {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        info!("{} vs {} (seed {})", tier_a, tier_b, seed);

        let mut engine_a = HeuristicEngine::with_seed(tier_a, seed);
        let mut engine_b = HeuristicEngine::with_seed(tier_b, seed.wrapping_add(1));
        let result = self.run_match(&mut engine_a, &mut engine_b);
        (result, seed)
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;

            let white_outcome = if engine1_white {
                self.play_game(engine1, engine2)
            } else {
                self.play_game(engine2, engine1)
            };
            let outcome = if engine1_white {
                white_outcome
            } else {
                white_outcome.flipped()
            };
            result.record(outcome);

            info!(
                "Game {}/{}: {} ({}) - Score: {}-{}-{}",
                game_num + 1,
                self.config.num_games,
                white_outcome.as_pgn(),
                if engine1_white { "W" } else { "B" },
                result.wins,
                result.losses,
                result.draws
            );
        }

        result
    }

    /// Play a single game, returns result from white's perspective
    pub fn play_game(&self, white: &mut dyn Engine, black: &mut dyn Engine) -> GameOutcome {
        let mut pos = Position::startpos();
        white.new_game();
        black.new_game();

        for _ply in 0..self.config.max_moves {
            let mover = pos.side_to_move();
            let search = match mover {
                Color::White => white.search(&mut pos),
                Color::Black => black.search(&mut pos),
            };

            let Some(mv) = search.best_move else {
                return outcome_for(pos.status(), mover);
            };
            if let Err(e) = pos.make_move(&mv) {
                // An engine that plays an illegal move forfeits
                warn!("{} forfeits: {}", mover, e);
                return loss_for(mover);
            }

            let status = pos.status();
            if status.is_over() {
                debug!("game over after {} plies: {:?}", pos.move_history().count(), status);
                return outcome_for(status, pos.side_to_move());
            }
        }

        // Max moves reached
        GameOutcome::Draw
    }
}

fn loss_for(color: Color) -> GameOutcome {
    match color {
        Color::White => GameOutcome::Loss,
        Color::Black => GameOutcome::Win,
    }
}

/// Outcome from White's side once no move was produced or the game ended.
fn outcome_for(status: GameStatus, to_move: Color) -> GameOutcome {
    match status {
        GameStatus::Checkmate { winner: Color::White } => GameOutcome::Win,
        GameStatus::Checkmate { winner: Color::Black } => GameOutcome::Loss,
        GameStatus::Ongoing => {
            // Engine gave up with moves still available
            warn!("{} returned no move in an ongoing game", to_move);
            loss_for(to_move)
        }
        _ => GameOutcome::Draw,
    }
}

/// Quick utility to run a single match
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
) -> MatchResult {
    let config = MatchConfig {
        num_games,
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    runner.run_match(engine1, engine2)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
