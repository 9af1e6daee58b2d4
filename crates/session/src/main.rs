//! ChessMate CLI
//!
//! Play the AI from the terminal, run matches between tiers and show results.

use anyhow::{bail, Context, Result};
use chessmate_core::Color;
use game_session::{
    ChessClock, GameSession, MatchLog, MatchRunner, SessionConfig, DEFAULT_CONFIG_FILE,
};
use heuristic_engine::Difficulty;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_RESULTS_FILE: &str = "chessmate_results.json";

fn print_usage() {
    println!("ChessMate");
    println!();
    println!("Usage:");
    println!("  chessmate play [--tier T] [--color white|black] [--config FILE]");
    println!("  chessmate match <tierA> <tierB> [--games N] [--max-moves M] [--seed S] [--out FILE]");
    println!("  chessmate report [FILE]");
    println!();
    println!("Tiers:");
    println!("  easy     - random moves, grabs material when it can");
    println!("  medium   - one-ply lookahead through the evaluator");
    println!("  hard     - ranks captures, checks and development");
    println!();
    println!("In a game, enter moves as UCI (e2e4) or SAN (Nf3).");
    println!("Commands: moves, fen, resign, quit");
    println!();
    println!("Set RUST_LOG=debug to see how the AI picks its moves.");
}

/// Value following a flag, or an error naming the flag.
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    match args.get(i + 1) {
        Some(v) => Ok(v.as_str()),
        None => bail!("{} needs a value", flag),
    }
}

fn parse_color(s: &str) -> Result<Color> {
    match s.to_ascii_lowercase().as_str() {
        "white" | "w" => Ok(Color::White),
        "black" | "b" => Ok(Color::Black),
        _ => bail!("Unknown color '{}' (expected white or black)", s),
    }
}

fn run_play(args: &[String]) -> Result<()> {
    let mut tier: Option<Difficulty> = None;
    let mut human = Color::White;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--tier" | "-t" => {
                tier = Some(flag_value(args, i, "--tier")?.parse()?);
                i += 1;
            }
            "--color" | "-c" => {
                human = parse_color(flag_value(args, i, "--color")?)?;
                i += 1;
            }
            "--config" => {
                config_path = PathBuf::from(flag_value(args, i, "--config")?);
                i += 1;
            }
            other => bail!("Unknown option for play: {}", other),
        }
        i += 1;
    }

    let mut config = SessionConfig::load_or_default(&config_path)?;
    if let Some(tier) = tier {
        config.ai.difficulty = tier;
    }

    let mut game = GameSession::new(&config, human);
    println!(
        "=== ChessMate: you play {} against {} ({}) ===",
        human, config.ai.difficulty, config.clock
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !game.is_over() {
        if !game.is_human_turn() {
            println!("AI is thinking...");
            let record = game.play_ai()?;
            println!("AI plays {}", record.san);
            continue;
        }

        println!();
        print!("{}", game.render_ascii());
        if game.clock().is_enabled() {
            println!(
                "White {}  Black {}",
                ChessClock::format_time(game.clock().remaining_time(Color::White)),
                ChessClock::format_time(game.clock().remaining_time(Color::Black))
            );
        }
        print!("Your move: ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.context("Failed to read from stdin")?;

        match line.trim() {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "moves" => println!("{}", game.legal_moves_san().join(" ")),
            "fen" => println!("{}", game.position().fen()),
            "resign" => {
                game.resign()?;
            }
            input => match game.play_human(input) {
                Ok(record) => println!("You play {}", record.san),
                Err(e) => println!("{}", e),
            },
        }
    }

    println!();
    print!("{}", game.render_ascii());
    let history: Vec<&str> = game.moves().iter().map(|m| m.san.as_str()).collect();
    println!("Moves: {}", history.join(" "));
    println!("Result: {}", game.result());
    Ok(())
}

fn run_match(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        print_usage();
        bail!("match requires two tiers");
    }

    let tier_a: Difficulty = args[0].parse()?;
    let tier_b: Difficulty = args[1].parse()?;

    let mut config = SessionConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?.matches;
    let mut out = PathBuf::from(DEFAULT_RESULTS_FILE);

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                config.num_games = flag_value(args, i, "--games")?
                    .parse()
                    .context("--games expects a number")?;
                i += 1;
            }
            "--max-moves" | "-m" => {
                config.max_moves = flag_value(args, i, "--max-moves")?
                    .parse()
                    .context("--max-moves expects a number")?;
                i += 1;
            }
            "--seed" | "-s" => {
                config.seed = Some(
                    flag_value(args, i, "--seed")?
                        .parse()
                        .context("--seed expects a number")?,
                );
                i += 1;
            }
            "--out" | "-o" => {
                out = PathBuf::from(flag_value(args, i, "--out")?);
                i += 1;
            }
            other => bail!("Unknown option for match: {}", other),
        }
        i += 1;
    }

    println!("=== Match: {} vs {} ===", tier_a, tier_b);
    println!("Games: {}, Max plies: {}", config.num_games, config.max_moves);
    println!();

    let runner = MatchRunner::new(config);
    let (result, seed) = runner.run_tiers(tier_a, tier_b);

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        tier_a, result.wins, result.losses, result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);
    println!("Seed: {}", seed);

    let mut log = MatchLog::load_or_new(&out)?;
    log.add_match(tier_a.as_str(), tier_b.as_str(), result, seed);
    log.save(&out)?;
    println!("Results saved to {}", out.display());
    Ok(())
}

fn show_report(args: &[String]) -> Result<()> {
    let path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_FILE));

    if !path.exists() {
        println!("No match results found. Run some matches first!");
        return Ok(());
    }
    let log = MatchLog::load(&path)?;
    log.print_report();

    println!("Totals:");
    for tier in Difficulty::ALL {
        let total = log.totals_for(tier.as_str());
        if total.total_games() > 0 {
            println!(
                "  {:<8} {}-{}-{} ({:.1}%)",
                tier,
                total.wins,
                total.losses,
                total.draws,
                total.score() * 100.0
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "play" => run_play(&args[2..]),
        "match" => run_match(&args[2..]),
        "report" | "results" => show_report(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {}", other)
        }
    }
}
