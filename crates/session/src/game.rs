//! Game state management for a human playing the AI

use chessmate_core::{
    move_to_uci, parse_move, sq, to_san, Color, Engine, GameStatus, Move, PieceKind, Position,
    RulesError,
};
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

use crate::clock::ChessClock;
use crate::config::SessionConfig;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Game is over: {0}")]
    GameOver(GameResult),
    #[error("It is {to_move}'s turn")]
    NotYourTurn { to_move: Color },
    #[error("Illegal or unrecognized move: {input}")]
    IllegalMove { input: String },
    #[error("The AI found no move to play")]
    NoMoveFound,
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// A recorded move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Standard Algebraic Notation representation
    pub san: String,
    pub uci: String,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    Checkmate,
    Timeout,
    Resignation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

/// Game result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Decisive { winner: Color, reason: WinReason },
    Draw(DrawReason),
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

impl From<GameStatus> for GameResult {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Ongoing => GameResult::InProgress,
            GameStatus::Checkmate { winner } => GameResult::Decisive {
                winner,
                reason: WinReason::Checkmate,
            },
            GameStatus::Stalemate => GameResult::Draw(DrawReason::Stalemate),
            GameStatus::FiftyMoveRule => GameResult::Draw(DrawReason::FiftyMoveRule),
            GameStatus::ThreefoldRepetition => GameResult::Draw(DrawReason::ThreefoldRepetition),
            GameStatus::InsufficientMaterial => GameResult::Draw(DrawReason::InsufficientMaterial),
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "in progress"),
            GameResult::Decisive { winner, reason } => {
                let how = match reason {
                    WinReason::Checkmate => "checkmate",
                    WinReason::Timeout => "timeout",
                    WinReason::Resignation => "resignation",
                };
                write!(f, "{} wins by {}", winner, how)
            }
            GameResult::Draw(reason) => {
                let why = match reason {
                    DrawReason::Stalemate => "stalemate",
                    DrawReason::FiftyMoveRule => "fifty-move rule",
                    DrawReason::ThreefoldRepetition => "threefold repetition",
                    DrawReason::InsufficientMaterial => "insufficient material",
                };
                write!(f, "draw by {}", why)
            }
        }
    }
}

/// A game between a human and the AI opponent.
pub struct GameSession {
    position: Position,
    human: Color,
    engine: Box<dyn Engine>,
    moves: Vec<MoveRecord>,
    /// Pieces taken by each side, indexed by `Color::idx()`
    captured: [Vec<PieceKind>; 2],
    result: GameResult,
    clock: ChessClock,
    think_delay: Duration,
}

impl GameSession {
    pub fn new(config: &SessionConfig, human: Color) -> Self {
        let mut clock = ChessClock::new(config.clock);
        clock.start(Color::White);
        Self {
            position: Position::startpos(),
            human,
            engine: Box::new(config.ai.build_engine()),
            moves: Vec::new(),
            captured: [Vec::new(), Vec::new()],
            result: GameResult::InProgress,
            clock,
            think_delay: config.ai.think_delay(),
        }
    }

    /// Replace the AI opponent.
    pub fn with_engine(mut self, engine: Box<dyn Engine>) -> Self {
        self.engine = engine;
        self
    }

    /// Start from a FEN instead of the initial position.
    pub fn with_position(mut self, fen: &str) -> Result<Self, SessionError> {
        self.position = Position::from_fen(fen)?;
        self.result = self.position.status().into();
        self.clock = ChessClock::new(self.clock.time_control());
        self.clock.start(self.position.side_to_move());
        Ok(self)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_over()
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn captured_by(&self, color: Color) -> &[PieceKind] {
        &self.captured[color.idx()]
    }

    pub fn clock(&self) -> &ChessClock {
        &self.clock
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn is_human_turn(&self) -> bool {
        self.position.side_to_move() == self.human
    }

    /// Legal moves for the side to move, in SAN.
    pub fn legal_moves_san(&self) -> Vec<String> {
        self.position
            .legal_moves()
            .iter()
            .map(|mv| to_san(&self.position, mv))
            .collect()
    }

    /// Play a move typed by the human, in UCI or SAN.
    pub fn play_human(&mut self, input: &str) -> Result<MoveRecord, SessionError> {
        self.ensure_in_progress()?;
        if !self.is_human_turn() {
            return Err(SessionError::NotYourTurn {
                to_move: self.position.side_to_move(),
            });
        }
        let mv = parse_move(&self.position, input).ok_or_else(|| SessionError::IllegalMove {
            input: input.trim().to_string(),
        })?;
        self.commit(mv)
    }

    /// Let the AI choose and play its move, after the thinking delay.
    pub fn play_ai(&mut self) -> Result<MoveRecord, SessionError> {
        self.ensure_in_progress()?;
        if self.is_human_turn() {
            return Err(SessionError::NotYourTurn {
                to_move: self.position.side_to_move(),
            });
        }
        if !self.think_delay.is_zero() {
            // The delay is presentation only, so the AI's clock stands still
            let paused = self.clock.pause();
            std::thread::sleep(self.think_delay);
            if let Some(color) = paused {
                self.clock.start(color);
            }
        }

        let started = Instant::now();
        let search = self.engine.search(&mut self.position);
        if self.check_timeout() {
            return Err(SessionError::GameOver(self.result));
        }
        let mv = search.best_move.ok_or(SessionError::NoMoveFound)?;
        debug!(
            "{} chose {} in {:?} ({} nodes)",
            self.engine.name(),
            mv,
            started.elapsed(),
            search.nodes
        );
        self.commit(mv)
    }

    pub fn resign(&mut self) -> Result<GameResult, SessionError> {
        self.ensure_in_progress()?;
        self.result = GameResult::Decisive {
            winner: self.human.other(),
            reason: WinReason::Resignation,
        };
        info!("{} resigned", self.human);
        Ok(self.result)
    }

    /// Flag the side to move if its time ran out.
    pub fn check_timeout(&mut self) -> bool {
        let to_move = self.position.side_to_move();
        if !self.result.is_over() && self.clock.is_timeout(to_move) {
            self.result = GameResult::Decisive {
                winner: to_move.other(),
                reason: WinReason::Timeout,
            };
            info!("{} ran out of time", to_move);
        }
        self.result.is_over()
    }

    fn ensure_in_progress(&mut self) -> Result<(), SessionError> {
        if self.check_timeout() {
            return Err(SessionError::GameOver(self.result));
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move) -> Result<MoveRecord, SessionError> {
        let color = self.position.side_to_move();
        let san = to_san(&self.position, &mv);
        self.position.make_move(&mv)?;
        self.clock.stop_and_increment();

        if let Some(kind) = mv.captured {
            self.captured[color.idx()].push(kind);
        }
        let record = MoveRecord {
            san,
            uci: move_to_uci(&mv),
            color,
        };
        self.moves.push(record.clone());

        self.check_game_end();
        if !self.result.is_over() {
            self.clock.start(self.position.side_to_move());
        }
        Ok(record)
    }

    fn check_game_end(&mut self) {
        self.result = self.position.status().into();
        if self.result.is_over() {
            info!("game over after {} moves: {}", self.moves.len(), self.result);
        }
    }

    /// Text diagram of the board from the human's side.
    pub fn render_ascii(&self) -> String {
        let ranks: Vec<i8> = match self.human {
            Color::White => (0..8).rev().collect(),
            Color::Black => (0..8).collect(),
        };
        let files: Vec<i8> = match self.human {
            Color::White => (0..8).collect(),
            Color::Black => (0..8).rev().collect(),
        };

        let mut out = String::new();
        for &rank in &ranks {
            out.push_str(&format!("{} ", rank + 1));
            for &file in &files {
                let c = sq(file, rank)
                    .and_then(|s| self.position.piece_at(s))
                    .map(|p| {
                        let c = p.kind.san_letter().unwrap_or('P');
                        match p.color {
                            Color::White => c,
                            Color::Black => c.to_ascii_lowercase(),
                        }
                    })
                    .unwrap_or('.');
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("  ");
        for &file in &files {
            out.push(' ');
            out.push((b'a' + file as u8) as char);
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
