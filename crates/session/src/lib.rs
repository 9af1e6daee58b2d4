//! ChessMate game sessions
//!
//! This crate provides:
//! - A headless game between a human and the AI opponent, with clock,
//!   move history and captured pieces
//! - AI-vs-AI matches between difficulty tiers
//! - `chessmate.toml` settings and a JSON log of match results
//!
//! # Usage
//!
//! ```bash
//! # Play black against the hard tier
//! cargo run -p game_session -- play --tier hard --color black
//!
//! # Pit two tiers against each other
//! cargo run -p game_session -- match hard easy --games 20 --seed 7
//! ```

mod clock;
mod config;
mod game;
mod match_runner;
mod results;

pub use clock::*;
pub use config::*;
pub use game::*;
pub use match_runner::*;
pub use results::*;
