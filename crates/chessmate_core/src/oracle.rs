//! The rules oracle seam and scoped move application.
//!
//! Engines never touch the board directly. They ask the oracle for legal moves
//! and try candidates through [`MoveGuard`] / [`with_move`], which guarantee
//! the position is restored on every exit path.

use std::ops::Deref;

use crate::error::RulesResult;
use crate::position::Position;
use crate::types::{Color, Move, Piece, Square};

/// Everything an engine may ask of the chess rules.
pub trait RulesOracle {
    fn side_to_move(&self) -> Color;

    fn piece_at(&self, sq: Square) -> Option<Piece>;

    /// Legal moves for the side to move.
    fn legal_moves(&self) -> Vec<Move>;

    /// Number of moves available to `color`, whether or not it is their turn.
    fn move_count(&self, color: Color) -> usize;

    /// Whether the side to move is in check.
    fn is_in_check(&self) -> bool;

    fn apply_move(&mut self, mv: &Move) -> RulesResult<()>;

    fn undo_move(&mut self) -> RulesResult<Move>;

    fn fen(&self) -> String;
}

impl RulesOracle for Position {
    fn side_to_move(&self) -> Color {
        Position::side_to_move(self)
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        Position::piece_at(self, sq)
    }

    fn legal_moves(&self) -> Vec<Move> {
        Position::legal_moves(self)
    }

    fn move_count(&self, color: Color) -> usize {
        Position::move_count(self, color)
    }

    fn is_in_check(&self) -> bool {
        self.in_check()
    }

    fn apply_move(&mut self, mv: &Move) -> RulesResult<()> {
        self.make_move(mv)
    }

    fn undo_move(&mut self) -> RulesResult<Move> {
        self.unmake_move()
    }

    fn fen(&self) -> String {
        Position::fen(self)
    }
}

/// A move applied to an oracle that is taken back when the guard goes away.
///
/// Only shared access to the oracle is handed out while the guard lives, so
/// nothing can stack further moves on top of the one being tried.
pub struct MoveGuard<'a, O: RulesOracle + ?Sized> {
    oracle: &'a mut O,
    armed: bool,
}

impl<'a, O: RulesOracle + ?Sized> MoveGuard<'a, O> {
    pub fn apply(oracle: &'a mut O, mv: &Move) -> RulesResult<Self> {
        oracle.apply_move(mv)?;
        Ok(MoveGuard {
            oracle,
            armed: true,
        })
    }

    /// Undo now and report the outcome instead of leaving it to `Drop`.
    pub fn undo(mut self) -> RulesResult<Move> {
        self.armed = false;
        self.oracle.undo_move()
    }

    /// Keep the move on the board.
    pub fn commit(mut self) {
        self.armed = false;
    }
}

impl<O: RulesOracle + ?Sized> Deref for MoveGuard<'_, O> {
    type Target = O;

    fn deref(&self) -> &O {
        self.oracle
    }
}

impl<O: RulesOracle + ?Sized> Drop for MoveGuard<'_, O> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.oracle.undo_move() {
                tracing::error!("failed to restore position after scoped move: {e}");
            }
        }
    }
}

/// Apply `mv`, run `f` on the resulting position, then undo.
///
/// Errors from either the apply or the undo are returned; a panic inside `f`
/// still undoes through the guard's `Drop`.
pub fn with_move<O, T, F>(oracle: &mut O, mv: &Move, f: F) -> RulesResult<T>
where
    O: RulesOracle + ?Sized,
    F: FnOnce(&O) -> T,
{
    let guard = MoveGuard::apply(oracle, mv)?;
    let out = f(&*guard);
    guard.undo()?;
    Ok(out)
}
