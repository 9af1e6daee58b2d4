use super::*;

#[test]
fn heuristic_engine_returns_legal_move() {
    for difficulty in Difficulty::ALL {
        let mut engine = HeuristicEngine::with_seed(difficulty, 1);
        let mut pos = Position::startpos();

        let result = engine.search(&mut pos);

        let mv = result.best_move.expect("start position has moves");
        assert!(pos.legal_moves().contains(&mv));
        assert_eq!(pos.fen(), chessmate_core::STARTPOS_FEN);
    }
}

#[test]
fn heuristic_engine_handles_checkmate() {
    let mut engine = HeuristicEngine::with_seed(Difficulty::Hard, 1);
    let mut pos =
        Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();

    let result = engine.search(&mut pos);

    assert!(result.best_move.is_none());
}

#[test]
fn heuristic_engine_handles_stalemate() {
    let mut engine = HeuristicEngine::with_seed(Difficulty::Medium, 1);
    let mut pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();

    let result = engine.search(&mut pos);

    assert!(result.best_move.is_none());
}

#[test]
fn medium_counts_one_evaluation_per_candidate() {
    let mut engine = HeuristicEngine::with_seed(Difficulty::Medium, 9);
    let mut pos = Position::startpos();

    let result = engine.search(&mut pos);

    assert_eq!(result.depth, 1);
    assert_eq!(result.nodes, 20);
    assert_eq!(engine.nodes(), 20);

    engine.new_game();
    assert_eq!(engine.nodes(), 0);
}

#[test]
fn score_is_from_side_to_move() {
    let mut engine = HeuristicEngine::with_seed(Difficulty::Easy, 3);
    // White is a queen up, black to move
    let mut pos =
        Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();

    let result = engine.search(&mut pos);

    assert!(result.score < -800);
}

#[test]
fn uci_options() {
    let mut engine = HeuristicEngine::default();
    assert_eq!(engine.difficulty(), Difficulty::Medium);

    assert!(engine.set_option("Difficulty", "hard"));
    assert_eq!(engine.difficulty(), Difficulty::Hard);

    assert!(!engine.set_option("Difficulty", "grandmaster"));
    assert_eq!(engine.difficulty(), Difficulty::Hard);

    assert!(engine.set_option("Seed", "12"));
    assert!(!engine.set_option("Hash", "64"));
}

#[test]
fn difficulty_parsing() {
    assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
    assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
    assert!("expert".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::Medium.to_string(), "medium");
    assert_eq!(Difficulty::Easy.top_k_fraction(), None);
}

#[test]
fn seeded_engines_play_the_same_game() {
    let mut white_a = HeuristicEngine::with_seed(Difficulty::Hard, 5);
    let mut white_b = HeuristicEngine::with_seed(Difficulty::Hard, 5);
    let mut pos_a = Position::startpos();
    let mut pos_b = Position::startpos();

    for _ in 0..6 {
        let a = white_a.search(&mut pos_a).best_move.unwrap();
        let b = white_b.search(&mut pos_b).best_move.unwrap();
        assert_eq!(a, b);
        pos_a.make_move(&a).unwrap();
        pos_b.make_move(&b).unwrap();
    }
}
