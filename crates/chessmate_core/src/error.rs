//! Error types for the rules oracle.

use thiserror::Error;

/// Errors reported by [`crate::Position`] and other oracle implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// FEN string could not be parsed or describes an impossible position
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Move is not legal in the current position
    #[error("Illegal move: {uci}")]
    IllegalMove { uci: String },

    /// Undo requested with an empty move history
    #[error("No move to undo")]
    NothingToUndo,

    /// Square name could not be parsed
    #[error("Invalid square: {name}")]
    InvalidSquare { name: String },
}

/// Result type alias for oracle operations
pub type RulesResult<T> = Result<T, RulesError>;
