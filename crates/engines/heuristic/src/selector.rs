//! Move selection by difficulty tier.
//!
//! - Easy: uniform choice, biased toward captures
//! - Medium: one-ply lookahead through [`evaluate`], top-K sampling
//! - Hard: heuristic move scoring without lookahead, top-K sampling
//!
//! Selection never fails when a legal move exists. A tier that hits an oracle
//! error falls back to Easy, and Easy falls back to the first legal move.

use chessmate_core::{rank_of, with_move, Color, Move, PieceKind, RulesOracle, RulesResult, Square};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, warn};

use crate::difficulty::{top_k, Difficulty};
use crate::eval::{evaluate, is_center, relative_to};

/// Chance that Easy restricts itself to captures when any exist.
pub const EASY_CAPTURE_PROBABILITY: f64 = 0.7;

const CHECK_BONUS: i32 = 50;
const CENTER_BONUS: i32 = 30;
const PAWN_DEVELOPMENT_BONUS: i32 = 20;
const CASTLE_BONUS: i32 = 40;
const PAWN_ADVANCE_PER_RANK: i32 = 10;
const ACTIVE_CENTER_BONUS: i32 = 20;
const ADVANCED_SQUARE_BONUS: i32 = 10;

/// Undo retries when a failed selection left a candidate on the board.
const MAX_RESTORE_ATTEMPTS: usize = 4;

/// A candidate move with its score for the side that plays it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

#[derive(Debug, Clone)]
pub struct MoveSelector<R> {
    rng: R,
    evaluations: u64,
}

impl<R: Rng> MoveSelector<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            evaluations: 0,
        }
    }

    /// Positions evaluated by Medium lookahead so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Choose one of `legal` for the side to move in `pos`.
    ///
    /// `legal` must not be empty; callers check for game over first. The
    /// position is returned exactly as it was passed in.
    pub fn select_move<O>(&mut self, legal: &[Move], pos: &mut O, tier: Difficulty) -> Move
    where
        O: RulesOracle + ?Sized,
    {
        assert!(!legal.is_empty(), "select_move requires at least one legal move");

        let before = pos.fen();
        let picked = match tier {
            Difficulty::Easy => Ok(self.pick_easy(legal)),
            Difficulty::Medium | Difficulty::Hard => self
                .score_candidates(legal, pos, tier)
                .map(|scored| self.pick_top_k(&scored, tier)),
        };

        match picked {
            Ok(Some(mv)) => {
                debug!("{tier}: chose {mv} from {} candidates", legal.len());
                mv
            }
            Ok(None) => legal[0],
            Err(e) => {
                warn!("{tier} selection failed ({e}), falling back to easy");
                restore(pos, &before);
                self.pick_easy(legal).unwrap_or(legal[0])
            }
        }
    }

    /// Rank `legal` the way `tier` does, best first.
    ///
    /// Easy does not rank; its candidates come back in input order with a
    /// score of zero.
    pub fn score_candidates<O>(
        &mut self,
        legal: &[Move],
        pos: &mut O,
        tier: Difficulty,
    ) -> RulesResult<Vec<ScoredMove>>
    where
        O: RulesOracle + ?Sized,
    {
        let mut scored = match tier {
            Difficulty::Easy => {
                return Ok(legal.iter().map(|&mv| ScoredMove { mv, score: 0 }).collect())
            }
            Difficulty::Medium => self.lookahead_scores(legal, pos)?,
            Difficulty::Hard => legal
                .iter()
                .map(|&mv| ScoredMove {
                    mv,
                    score: heuristic_score(&mv, &*pos),
                })
                .collect(),
        };
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(scored)
    }

    fn lookahead_scores<O>(&mut self, legal: &[Move], pos: &mut O) -> RulesResult<Vec<ScoredMove>>
    where
        O: RulesOracle + ?Sized,
    {
        let mover = pos.side_to_move();
        let mut scored = Vec::with_capacity(legal.len());
        for &mv in legal {
            let rng = &mut self.rng;
            let score = with_move(pos, &mv, |after| evaluate(after, rng))?;
            self.evaluations += 1;
            scored.push(ScoredMove {
                mv,
                score: relative_to(score, mover),
            });
        }
        Ok(scored)
    }

    fn pick_easy(&mut self, legal: &[Move]) -> Option<Move> {
        let captures: Vec<Move> = legal.iter().copied().filter(Move::is_capture).collect();
        if !captures.is_empty() && self.rng.gen_bool(EASY_CAPTURE_PROBABILITY) {
            return captures.choose(&mut self.rng).copied();
        }
        legal.choose(&mut self.rng).copied()
    }

    fn pick_top_k(&mut self, ranked: &[ScoredMove], tier: Difficulty) -> Option<Move> {
        let fraction = tier.top_k_fraction()?;
        let k = top_k(ranked.len(), fraction).min(ranked.len());
        debug!("{tier}: sampling top {k} of {}", ranked.len());
        ranked[..k].choose(&mut self.rng).map(|s| s.mv)
    }
}

/// Take back moves left on `pos` by a failed undo until it reads `fen` again.
fn restore<O: RulesOracle + ?Sized>(pos: &mut O, fen: &str) {
    for _ in 0..MAX_RESTORE_ATTEMPTS {
        if pos.fen() == fen {
            return;
        }
        if let Err(e) = pos.undo_move() {
            warn!("undo while restoring position failed: {e}");
        }
    }
    if pos.fen() != fen {
        error!("position not restored after failed selection: {} != {}", pos.fen(), fen);
    }
}

/// Hard-tier score of a move, from the mover's point of view.
pub fn heuristic_score<O: RulesOracle + ?Sized>(mv: &Move, pos: &O) -> i32 {
    let mut score = capture_value(mv, pos) * 100;

    if mv.is_check() {
        score += CHECK_BONUS;
    }
    if is_center(mv.to) {
        score += CENTER_BONUS;
    }
    if mv.piece == PieceKind::Pawn {
        let start_rank = match pos.side_to_move() {
            Color::White => 1,
            Color::Black => 6,
        };
        if rank_of(mv.from) == start_rank {
            score += PAWN_DEVELOPMENT_BONUS;
        }
        score += PAWN_ADVANCE_PER_RANK * i32::from((rank_of(mv.to) - rank_of(mv.from)).abs());
    }
    if mv.is_castle() {
        score += CASTLE_BONUS;
    }

    score + piece_activity(mv.to)
}

/// Material value (1..9 scale) of whatever `mv` captures, 0 for quiet moves.
pub fn capture_value<O: RulesOracle + ?Sized>(mv: &Move, pos: &O) -> i32 {
    let mover = pos.side_to_move();
    mv.captured
        .or_else(|| {
            pos.piece_at(mv.to)
                .filter(|p| p.color != mover)
                .map(|p| p.kind)
        })
        .map(PieceKind::value)
        .unwrap_or(0)
}

/// Bonus for landing on an active square: the c3-f6 block, and rank 4 or
/// higher as seen from White.
pub fn piece_activity(to: Square) -> i32 {
    let file = to % 8;
    let rank = to / 8;
    let mut bonus = 0;
    if (2..=5).contains(&file) && (2..=5).contains(&rank) {
        bonus += ACTIVE_CENTER_BONUS;
    }
    if rank >= 3 {
        bonus += ADVANCED_SQUARE_BONUS;
    }
    bonus
}
