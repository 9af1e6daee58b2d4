pub mod error;
pub mod notation;
pub mod oracle;
pub mod position;
pub mod types;

#[cfg(test)]
mod position_tests;

// Re-export the rules surface (legality itself lives in the `chess` crate)
pub use error::*;
pub use notation::*;
pub use oracle::*;
pub use position::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by the AI opponents
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move (None if no legal moves)
    pub best_move: Option<Move>,
    /// Static evaluation in centipawns from the side to move's perspective
    pub score: i32,
    /// Lookahead depth used by the strategy (0 = no lookahead)
    pub depth: u8,
    /// Number of positions evaluated
    pub nodes: u64,
}

/// Trait that all ChessMate opponents implement.
///
/// The position is borrowed mutably so engines can try candidate moves through
/// [`MoveGuard`]; it must be handed back unchanged.
pub trait Engine: Send {
    /// Choose a move for the side to move.
    fn search(&mut self, pos: &mut Position) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "ChessMate"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
