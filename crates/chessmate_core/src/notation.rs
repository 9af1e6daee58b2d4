//! UCI and SAN move notation.

use crate::error::{RulesError, RulesResult};
use crate::position::{GameStatus, Position};
use crate::types::*;

pub fn move_to_uci(mv: &Move) -> String {
    let mut s = String::new();
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promotion {
        let ch = match p {
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => 'q',
        };
        s.push(ch);
    }
    s
}

pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    // Parse the squares, then match against legal moves so the flags are right.
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = if txt.len() >= 5 {
        match txt.as_bytes()[4] as char {
            'q' | 'Q' => Some(PieceKind::Queen),
            'r' | 'R' => Some(PieceKind::Rook),
            'b' | 'B' => Some(PieceKind::Bishop),
            'n' | 'N' => Some(PieceKind::Knight),
            _ => return None,
        }
    } else {
        None
    };

    pos.legal_moves().into_iter().find(|m| {
        // A bare promotion without a suffix means queen
        let wanted = promo.or(m.promotion.map(|_| PieceKind::Queen));
        m.from == from && m.to == to && m.promotion == wanted
    })
}

/// Parse a move typed by a player: UCI (`e2e4`) or SAN (`Nf3`, `exd5`, `O-O`).
pub fn parse_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if let Some(mv) = parse_uci_move(pos, txt) {
        return Some(mv);
    }
    let wanted = strip_annotations(&txt.replace('0', "O"));
    pos.legal_moves()
        .into_iter()
        .find(|m| strip_annotations(&to_san(pos, m)) == wanted)
}

fn strip_annotations(san: &str) -> String {
    san.trim_end_matches(['+', '#', '!', '?']).to_string()
}

/// Standard Algebraic Notation for a legal move in `pos`.
pub fn to_san(pos: &Position, mv: &Move) -> String {
    let mut san = String::new();

    if mv.flags.contains(MoveFlags::CASTLE_KINGSIDE) {
        san.push_str("O-O");
    } else if mv.flags.contains(MoveFlags::CASTLE_QUEENSIDE) {
        san.push_str("O-O-O");
    } else {
        match mv.piece.san_letter() {
            Some(letter) => {
                san.push(letter);
                san.push_str(&disambiguation(pos, mv));
            }
            None => {
                if mv.is_capture() {
                    san.push((b'a' + (mv.from % 8)) as char);
                }
            }
        }

        if mv.is_capture() {
            san.push('x');
        }
        san.push_str(&sq_to_coord(mv.to));

        if let Some(promo) = mv.promotion.and_then(PieceKind::san_letter) {
            san.push('=');
            san.push(promo);
        }
    }

    if mv.is_check() {
        let mut next = pos.clone();
        let mate = next.make_move(mv).is_ok()
            && matches!(next.status(), GameStatus::Checkmate { .. });
        san.push(if mate { '#' } else { '+' });
    }
    san
}

fn disambiguation(pos: &Position, mv: &Move) -> String {
    let rivals: Vec<Move> = pos
        .legal_moves()
        .into_iter()
        .filter(|m| m.piece == mv.piece && m.to == mv.to && m.from != mv.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }

    let same_file = rivals.iter().any(|m| file_of(m.from) == file_of(mv.from));
    let same_rank = rivals.iter().any(|m| rank_of(m.from) == rank_of(mv.from));
    let coord = sq_to_coord(mv.from);
    if !same_file {
        coord[0..1].to_string()
    } else if !same_rank {
        coord[1..2].to_string()
    } else {
        coord
    }
}

/// Build a position from the arguments of a UCI `position` command.
///
/// Supports `startpos [moves ...]` and `fen <fields> [moves ...]`.
pub fn set_position_from_uci(args: &[&str]) -> RulesResult<Position> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let mut pos = match args.first() {
        None | Some(&"startpos") => Position::startpos(),
        Some(&"fen") => Position::from_fen(&args[1..moves_at].join(" "))?,
        Some(other) => {
            return Err(RulesError::InvalidFen {
                fen: other.to_string(),
                reason: "expected 'startpos' or 'fen'".to_string(),
            })
        }
    };

    for txt in args.iter().skip(moves_at + 1) {
        let mv = parse_uci_move(&pos, txt).ok_or_else(|| RulesError::IllegalMove {
            uci: txt.to_string(),
        })?;
        pos.make_move(&mv)?;
    }
    Ok(pos)
}
