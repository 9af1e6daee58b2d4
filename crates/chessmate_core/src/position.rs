//! Position wrapper over `chess::Board`.
//!
//! The `chess` crate owns move legality and check detection. This module adds
//! what the AI and the game session need on top of it:
//! - rich [`Move`] records with capture/castle/check flags
//! - an undo stack so candidate moves can be tried and taken back
//! - half-move clock, full-move number and repetition history
//! - draw detection (fifty-move rule, threefold repetition, insufficient material)

use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, ChessMove, MoveGen, EMPTY};

use crate::error::{RulesError, RulesResult};
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Game state as reported by [`Position::status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::FiftyMoveRule
                | GameStatus::ThreefoldRepetition
                | GameStatus::InsufficientMaterial
        )
    }
}

#[derive(Clone, Debug)]
struct Undo {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    mv: Move,
}

#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<Undo>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Position {
            board: Board::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let invalid = |reason: String| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        if parts.len() < 4 {
            return Err(invalid("expected at least 4 fields".to_string()));
        }

        let board = Board::from_str(&parts[..4].join(" ")).map_err(|e| invalid(e.to_string()))?;

        let halfmove_clock = match parts.get(4) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| invalid(format!("bad half-move clock '{s}'")))?,
            None => 0,
        };
        let fullmove_number = match parts.get(5) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| invalid(format!("bad full-move number '{s}'")))?,
            None => 1,
        };

        Ok(Position {
            board,
            halfmove_clock,
            fullmove_number: fullmove_number.max(1),
            history: Vec::new(),
        })
    }

    pub fn fen(&self) -> String {
        // Board's Display always prints "0 1" for the clocks; substitute ours.
        let rendered = self.board.to_string();
        let fields: Vec<&str> = rendered.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move().into()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let s = to_chess_square(sq);
        let kind = self.board.piece_on(s)?;
        let color = self.board.color_on(s)?;
        Some(Piece {
            color: color.into(),
            kind: kind.into(),
        })
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Moves applied since this position was created, oldest first.
    pub fn move_history(&self) -> impl Iterator<Item = &Move> {
        self.history.iter().map(|u| &u.mv)
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|u| &u.mv)
    }

    pub fn position_hash(&self) -> u64 {
        self.board.get_hash()
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.board)
            .map(|cm| self.describe(cm))
            .collect()
    }

    /// Number of moves `color` could make from this position.
    ///
    /// For the side to move this is the exact legal move count. For the other
    /// side the turn is passed with a null move; when that is impossible
    /// (side to move is in check) a pseudo-legal count is used instead.
    pub fn move_count(&self, color: Color) -> usize {
        if color == self.side_to_move() {
            return MoveGen::new_legal(&self.board).len();
        }
        match self.board.null_move() {
            Some(flipped) => MoveGen::new_legal(&flipped).len(),
            None => self.pseudo_mobility(color),
        }
    }

    fn pseudo_mobility(&self, color: Color) -> usize {
        let c: chess::Color = color.into();
        let own = *self.board.color_combined(c);
        let enemy = *self.board.color_combined(!c);
        let occupied = *self.board.combined();

        let mut count = 0u32;
        for s in own {
            let targets = match self.board.piece_on(s) {
                Some(chess::Piece::Pawn) => {
                    chess::get_pawn_attacks(s, c, enemy) | chess::get_pawn_quiets(s, c, occupied)
                }
                Some(chess::Piece::Knight) => chess::get_knight_moves(s),
                Some(chess::Piece::Bishop) => chess::get_bishop_moves(s, occupied),
                Some(chess::Piece::Rook) => chess::get_rook_moves(s, occupied),
                Some(chess::Piece::Queen) => {
                    chess::get_bishop_moves(s, occupied) | chess::get_rook_moves(s, occupied)
                }
                Some(chess::Piece::King) => chess::get_king_moves(s),
                None => EMPTY,
            };
            count += (targets & !own).popcnt();
        }
        count as usize
    }

    /// Build the full move record for a move produced by the generator.
    fn describe(&self, cm: ChessMove) -> Move {
        let src = cm.get_source();
        let dst = cm.get_dest();
        let from = from_chess_square(src);
        let to = from_chess_square(dst);

        // Only legal moves reach here, so the source square holds the mover
        let moving = self.board.piece_on(src);
        debug_assert!(moving.is_some(), "legal move {cm} from an empty square");
        let piece = moving.map_or(PieceKind::Pawn, PieceKind::from);
        let mut captured = self.board.piece_on(dst).map(PieceKind::from);
        let mut flags = MoveFlags::empty();

        if piece == PieceKind::Pawn && captured.is_none() && file_of(from) != file_of(to) {
            captured = Some(PieceKind::Pawn);
            flags.insert(MoveFlags::EN_PASSANT);
        }
        if captured.is_some() {
            flags.insert(MoveFlags::CAPTURE);
        }
        if piece == PieceKind::King {
            match file_of(to) - file_of(from) {
                2 => flags.insert(MoveFlags::CASTLE_KINGSIDE),
                -2 => flags.insert(MoveFlags::CASTLE_QUEENSIDE),
                _ => {}
            }
        }
        let promotion = cm.get_promotion().map(PieceKind::from);
        if promotion.is_some() {
            flags.insert(MoveFlags::PROMOTION);
        }
        if *self.board.make_move_new(cm).checkers() != EMPTY {
            flags.insert(MoveFlags::CHECK);
        }

        Move {
            from,
            to,
            piece,
            captured,
            promotion,
            flags,
        }
    }

    fn to_chess_move(mv: &Move) -> ChessMove {
        ChessMove::new(
            to_chess_square(mv.from),
            to_chess_square(mv.to),
            mv.promotion.map(chess::Piece::from),
        )
    }

    /// Play `mv`, recording enough state to undo it.
    pub fn make_move(&mut self, mv: &Move) -> RulesResult<()> {
        let cm = Self::to_chess_move(mv);
        if !self.board.legal(cm) {
            return Err(RulesError::IllegalMove {
                uci: crate::notation::move_to_uci(mv),
            });
        }
        // Re-describe so the recorded move reflects this board, whatever the caller passed.
        let recorded = self.describe(cm);

        self.history.push(Undo {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            mv: recorded,
        });

        if recorded.piece == PieceKind::Pawn || recorded.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move() == Color::Black {
            self.fullmove_number += 1;
        }
        self.board = self.board.make_move_new(cm);
        Ok(())
    }

    /// Take back the most recent move.
    pub fn unmake_move(&mut self) -> RulesResult<Move> {
        let undo = self.history.pop().ok_or(RulesError::NothingToUndo)?;
        self.board = undo.board;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        Ok(undo.mv)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Current position has occurred at least three times in this game.
    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.board.get_hash();
        let earlier = self
            .history
            .iter()
            .filter(|u| u.board.get_hash() == current)
            .count();
        earlier + 1 >= 3
    }

    /// Neither side can possibly deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = *b.pieces(chess::Piece::Pawn)
            | *b.pieces(chess::Piece::Rook)
            | *b.pieces(chess::Piece::Queen);
        if heavy != EMPTY {
            return false;
        }

        let knights = *b.pieces(chess::Piece::Knight);
        let bishops = *b.pieces(chess::Piece::Bishop);
        if (knights | bishops).popcnt() <= 1 {
            return true;
        }
        // Bishops only, all on one square color
        if knights == EMPTY {
            let light = count_light_squares(bishops);
            return light == 0 || light == bishops.popcnt();
        }
        false
    }

    pub fn status(&self) -> GameStatus {
        match self.board.status() {
            BoardStatus::Checkmate => GameStatus::Checkmate {
                winner: self.side_to_move().other(),
            },
            BoardStatus::Stalemate => GameStatus::Stalemate,
            BoardStatus::Ongoing => {
                if self.is_fifty_move_draw() {
                    GameStatus::FiftyMoveRule
                } else if self.is_threefold_repetition() {
                    GameStatus::ThreefoldRepetition
                } else if self.is_insufficient_material() {
                    GameStatus::InsufficientMaterial
                } else {
                    GameStatus::Ongoing
                }
            }
        }
    }
}

fn count_light_squares(bb: BitBoard) -> u32 {
    bb.filter(|s| (s.get_file().to_index() + s.get_rank().to_index()) % 2 == 1)
        .count() as u32
}
