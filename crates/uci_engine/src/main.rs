use chessmate_core::{move_to_uci, set_position_from_uci, Engine, Position};
use heuristic_engine::HeuristicEngine;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Value of a `setoption name <Name> value <Value>` command.
fn parse_setoption<'a>(parts: &[&'a str]) -> Option<(&'a str, &'a str)> {
    let idx_name = parts.iter().position(|&x| x == "name")?;
    let idx_val = parts.iter().position(|&x| x == "value")?;
    let name = *parts.get(idx_name + 1..idx_val)?.first()?;
    let value = *parts.get(idx_val + 1)?;
    Some((name, value))
}

fn main() {
    // Logs go to stderr so they never mix with the protocol on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // UCI engines communicate via stdin/stdout.
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut engine = HeuristicEngine::default();
    let mut pos = Position::startpos();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                writeln!(stdout, "id name {}", engine.name()).ok();
                writeln!(stdout, "id author {}", engine.author()).ok();
                writeln!(
                    stdout,
                    "option name Difficulty type combo default {} var easy var medium var hard",
                    engine.difficulty()
                )
                .ok();
                writeln!(stdout, "option name Seed type string default <random>").ok();
                writeln!(stdout, "uciok").ok();
                stdout.flush().ok();
            }
            "isready" => {
                writeln!(stdout, "readyok").ok();
                stdout.flush().ok();
            }
            "setoption" => match parse_setoption(&parts) {
                Some((name, value)) => {
                    if !engine.set_option(name, value) {
                        warn!("ignored option {} = {}", name, value);
                    }
                }
                None => warn!("malformed setoption: {}", line),
            },
            "ucinewgame" => {
                engine.new_game();
                pos = Position::startpos();
            }
            "position" => match set_position_from_uci(&parts[1..]) {
                Ok(p) => pos = p,
                Err(e) => warn!("bad position command: {}", e),
            },
            "go" => {
                // Time controls are ignored; selection is a single pass
                let result = engine.search(&mut pos);
                debug!("score {} nodes {}", result.score, result.nodes);
                match result.best_move {
                    Some(mv) => writeln!(stdout, "bestmove {}", move_to_uci(&mv)).ok(),
                    None => writeln!(stdout, "bestmove 0000").ok(), // no moves
                };
                stdout.flush().ok();
            }
            "quit" => break,
            _ => {
                // ignore unknown commands
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setoption_parsing() {
        let parts: Vec<&str> = "setoption name Difficulty value hard"
            .split_whitespace()
            .collect();
        assert_eq!(parse_setoption(&parts), Some(("Difficulty", "hard")));

        let parts: Vec<&str> = "setoption name Seed".split_whitespace().collect();
        assert_eq!(parse_setoption(&parts), None);
    }
}
