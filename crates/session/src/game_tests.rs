use super::*;
use crate::clock::TimeControl;
use chessmate_core::SearchResult;
use heuristic_engine::{Difficulty, HeuristicEngine};

fn quick_config() -> SessionConfig {
    let mut config = SessionConfig::default();
    config.ai.think_delay_ms = 0;
    config.ai.seed = Some(1);
    config.clock = TimeControl::unlimited();
    config
}

fn session(human: Color) -> GameSession {
    GameSession::new(&quick_config(), human)
}

#[test]
fn human_and_ai_alternate() {
    let mut game = session(Color::White);
    assert!(game.is_human_turn());

    let record = game.play_human("e2e4").unwrap();
    assert_eq!(record.san, "e4");
    assert_eq!(record.uci, "e2e4");
    assert_eq!(record.color, Color::White);

    let reply = game.play_ai().unwrap();
    assert_eq!(reply.color, Color::Black);
    assert_eq!(game.moves().len(), 2);
    assert!(game.is_human_turn());
    assert_eq!(game.result(), GameResult::InProgress);
}

#[test]
fn turns_are_enforced() {
    let mut game = session(Color::Black);
    assert!(matches!(
        game.play_human("e7e5"),
        Err(SessionError::NotYourTurn { to_move: Color::White })
    ));

    game.play_ai().unwrap();
    assert!(matches!(
        game.play_ai(),
        Err(SessionError::NotYourTurn { to_move: Color::Black })
    ));
    assert!(game.play_human("Nf6").is_ok());
}

#[test]
fn bad_input_changes_nothing() {
    let mut game = session(Color::White);
    for input in ["e2e5", "Qh5", "hello", ""] {
        assert!(matches!(
            game.play_human(input),
            Err(SessionError::IllegalMove { .. })
        ));
    }
    assert!(game.moves().is_empty());
    assert_eq!(game.position().fen(), chessmate_core::STARTPOS_FEN);
}

#[test]
fn san_input_is_accepted() {
    let mut game = session(Color::White);
    let record = game.play_human("Nf3").unwrap();
    assert_eq!(record.uci, "g1f3");
}

#[test]
fn checkmate_ends_the_game() {
    let mut game = session(Color::Black)
        .with_position("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
        .unwrap();

    let record = game.play_human("Qh4#").unwrap();
    assert_eq!(record.san, "Qh4#");
    assert_eq!(
        game.result(),
        GameResult::Decisive {
            winner: Color::Black,
            reason: WinReason::Checkmate
        }
    );
    assert_eq!(game.result().to_string(), "black wins by checkmate");
    assert!(matches!(game.play_ai(), Err(SessionError::GameOver(_))));
}

#[test]
fn captures_are_tracked() {
    let mut game = session(Color::White)
        .with_position("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
        .unwrap();

    game.play_human("exd5").unwrap();
    assert_eq!(game.captured_by(Color::White), &[PieceKind::Pawn]);
    assert!(game.captured_by(Color::Black).is_empty());
}

#[test]
fn resigning_hands_the_win_to_the_ai() {
    let mut game = session(Color::White);
    let result = game.resign().unwrap();
    assert_eq!(
        result,
        GameResult::Decisive {
            winner: Color::Black,
            reason: WinReason::Resignation
        }
    );
    assert!(game.is_over());
    assert!(matches!(game.resign(), Err(SessionError::GameOver(_))));
}

#[test]
fn finished_position_is_reported_on_load() {
    let game = session(Color::White)
        .with_position("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1")
        .unwrap();
    assert_eq!(game.result(), GameResult::Draw(DrawReason::Stalemate));
}

#[test]
fn invalid_fen_is_a_rules_error() {
    let err = session(Color::White).with_position("not a fen").err().unwrap();
    assert!(matches!(err, SessionError::Rules(RulesError::InvalidFen { .. })));
}

#[test]
fn custom_engine() {
    let game = session(Color::White).with_engine(Box::new(HeuristicEngine::with_seed(
        Difficulty::Easy,
        2,
    )));
    assert_eq!(game.engine_name(), "ChessMate Heuristic v1.0");
    assert_eq!(game.legal_moves_san().len(), 20);
}

/// Heuristic engine that takes its time before answering.
struct SlowEngine {
    inner: HeuristicEngine,
    delay: Duration,
}

impl Engine for SlowEngine {
    fn search(&mut self, pos: &mut Position) -> SearchResult {
        std::thread::sleep(self.delay);
        self.inner.search(pos)
    }

    fn name(&self) -> &str {
        "slow"
    }
}

fn one_second_config(think_delay_ms: u64) -> SessionConfig {
    let mut config = quick_config();
    config.ai.think_delay_ms = think_delay_ms;
    config.clock = TimeControl {
        initial_time: 1,
        increment: 0,
    };
    config
}

#[test]
fn think_delay_does_not_run_the_ai_clock() {
    let mut game = GameSession::new(&one_second_config(1100), Color::White);
    game.play_human("e2e4").unwrap();

    let reply = game.play_ai().unwrap();
    assert_eq!(reply.color, Color::Black);
    assert_eq!(game.result(), GameResult::InProgress);
    assert!(game.clock().remaining_time(Color::Black) > Duration::from_millis(500));
    assert_eq!(game.clock().running_for(), Some(Color::White));
}

#[test]
fn ai_flagging_during_search_does_not_move() {
    let mut game = GameSession::new(&one_second_config(0), Color::White).with_engine(Box::new(
        SlowEngine {
            inner: HeuristicEngine::with_seed(Difficulty::Medium, 1),
            delay: Duration::from_millis(1100),
        },
    ));
    game.play_human("e2e4").unwrap();

    let err = game.play_ai().unwrap_err();
    let flagged = GameResult::Decisive {
        winner: Color::White,
        reason: WinReason::Timeout,
    };
    assert!(matches!(err, SessionError::GameOver(r) if r == flagged));
    assert_eq!(game.result(), flagged);
    assert_eq!(game.moves().len(), 1);
    assert_eq!(game.position().side_to_move(), Color::Black);
    assert!(matches!(game.play_ai(), Err(SessionError::GameOver(_))));
}

#[test]
fn board_diagram_faces_the_human() {
    let white = session(Color::White).render_ascii();
    assert_eq!(white.lines().next(), Some("8  r n b q k b n r"));
    assert_eq!(white.lines().last(), Some("   a b c d e f g h"));

    let black = session(Color::Black).render_ascii();
    assert_eq!(black.lines().next(), Some("1  R N B K Q B N R"));
    assert_eq!(black.lines().last(), Some("   h g f e d c b a"));
}
