//! Positional evaluation.
//!
//! Scores are in centipawns and White-relative: positive favors White.

use chessmate_core::{Color, PieceKind, RulesOracle, Square};
use rand::Rng;

use crate::pst::positional_value;

/// Weight of each move of mobility difference.
const MOBILITY_WEIGHT: i32 = 10;

/// Bonus per occupied center square, signed by the occupant's color.
const CENTER_BONUS: i32 = 20;

/// Half-width of the uniform jitter added by [`evaluate`].
pub const NOISE: i32 = 10;

/// d4, e4, d5, e5
pub const CENTER_SQUARES: [Square; 4] = [27, 28, 35, 36];

/// Material value of a piece in centipawns.
pub fn material_value(kind: PieceKind) -> i32 {
    kind.value() * 100
}

pub fn is_center(sq: Square) -> bool {
    CENTER_SQUARES.contains(&sq)
}

/// Deterministic part of the evaluation.
pub fn evaluate_static<O: RulesOracle + ?Sized>(pos: &O) -> i32 {
    let mut score = 0i32;

    for sq in 0..64u8 {
        if let Some(pc) = pos.piece_at(sq) {
            let value = material_value(pc.kind) + positional_value(pc.kind, pc.color, sq);
            score += pc.color.sign() * value;
            if is_center(sq) {
                score += pc.color.sign() * CENTER_BONUS;
            }
        }
    }

    let stm = pos.side_to_move();
    let ours = pos.move_count(stm) as i32;
    let theirs = pos.move_count(stm.other()) as i32;
    score += stm.sign() * (ours - theirs) * MOBILITY_WEIGHT;

    score
}

/// Static evaluation plus uniform noise in `[-NOISE, NOISE]` so that equal
/// positions are not always resolved the same way.
pub fn evaluate<O, R>(pos: &O, rng: &mut R) -> i32
where
    O: RulesOracle + ?Sized,
    R: Rng,
{
    evaluate_static(pos) + rng.gen_range(-NOISE..=NOISE)
}

/// Evaluation from `color`'s point of view.
pub fn relative_to(score: i32, color: Color) -> i32 {
    score * color.sign()
}

