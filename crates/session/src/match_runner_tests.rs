use super::*;
use chessmate_core::{parse_uci_move, Move, SearchResult};

fn config(num_games: u32, max_moves: u32, seed: u64) -> MatchConfig {
    MatchConfig {
        num_games,
        max_moves,
        seed: Some(seed),
        ..Default::default()
    }
}

/// Plays a fixed line, then resigns by returning no move.
struct Scripted {
    line: Vec<&'static str>,
    next: usize,
}

impl Scripted {
    fn new(line: &[&'static str]) -> Self {
        Self {
            line: line.to_vec(),
            next: 0,
        }
    }
}

impl Engine for Scripted {
    fn search(&mut self, pos: &mut Position) -> SearchResult {
        let best_move: Option<Move> = self
            .line
            .get(self.next)
            .and_then(|uci| parse_uci_move(pos, uci));
        self.next += 1;
        SearchResult {
            best_move,
            score: 0,
            depth: 0,
            nodes: 0,
        }
    }

    fn name(&self) -> &str {
        "Scripted"
    }

    fn new_game(&mut self) {
        self.next = 0;
    }
}

#[test]
fn test_self_play() {
    let mut engine1 = HeuristicEngine::with_seed(Difficulty::Medium, 1);
    let mut engine2 = HeuristicEngine::with_seed(Difficulty::Medium, 2);

    let runner = MatchRunner::new(config(2, 50, 0));
    let result = runner.run_match(&mut engine1, &mut engine2);

    // Self-play should complete without panic
    assert_eq!(result.total_games(), 2);
}

#[test]
fn fools_mate_is_scored_for_black() {
    let mut white = Scripted::new(&["f2f3", "g2g4"]);
    let mut black = Scripted::new(&["e7e5", "d8h4"]);

    let runner = MatchRunner::new(config(1, 200, 0));
    assert_eq!(runner.play_game(&mut white, &mut black), GameOutcome::Loss);

    let mut white = Scripted::new(&["f2f3", "g2g4"]);
    let mut black = Scripted::new(&["e7e5", "d8h4"]);
    let result = runner.run_match(&mut white, &mut black);
    assert_eq!(result, MatchResult { wins: 0, losses: 1, draws: 0 });
}

#[test]
fn giving_up_in_an_ongoing_game_loses() {
    let mut white = Scripted::new(&["e2e4"]);
    let mut black = Scripted::new(&["e7e5"]);

    let runner = MatchRunner::new(config(1, 200, 0));
    // White has no second move scripted
    assert_eq!(runner.play_game(&mut white, &mut black), GameOutcome::Loss);
}

#[test]
fn ply_limit_is_a_draw() {
    let mut white = HeuristicEngine::with_seed(Difficulty::Easy, 4);
    let mut black = HeuristicEngine::with_seed(Difficulty::Easy, 5);

    let runner = MatchRunner::new(config(1, 4, 0));
    assert_eq!(runner.play_game(&mut white, &mut black), GameOutcome::Draw);
}

#[test]
fn seeded_tier_matches_replay() {
    let runner = MatchRunner::new(config(2, 60, 99));
    let (first, seed) = runner.run_tiers(Difficulty::Hard, Difficulty::Easy);
    let (second, _) = runner.run_tiers(Difficulty::Hard, Difficulty::Easy);

    assert_eq!(seed, 99);
    assert_eq!(first, second);
    assert_eq!(first.total_games(), 2);
}

#[test]
fn quick_match_uses_defaults() {
    let mut a = HeuristicEngine::with_seed(Difficulty::Easy, 10);
    let mut b = HeuristicEngine::with_seed(Difficulty::Easy, 11);
    let result = quick_match(&mut a, &mut b, 1);
    assert_eq!(result.total_games(), 1);
}
