use super::*;

fn find(pos: &Position, uci: &str) -> Move {
    parse_uci_move(pos, uci).unwrap_or_else(|| panic!("{uci} should be legal"))
}

#[test]
fn startpos_has_twenty_moves_for_each_side() {
    let pos = Position::startpos();
    assert_eq!(pos.legal_moves().len(), 20);
    assert_eq!(pos.move_count(Color::White), 20);
    assert_eq!(pos.move_count(Color::Black), 20);
    assert_eq!(pos.side_to_move(), Color::White);
}

#[test]
fn fen_round_trip_keeps_clocks() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let pos = Position::from_fen(fen).unwrap();
    assert_eq!(pos.fen(), fen);
    assert_eq!(pos.halfmove_clock(), 2);
    assert_eq!(pos.fullmove_number(), 3);
}

#[test]
fn invalid_fen_is_rejected() {
    assert!(matches!(
        Position::from_fen("not a fen"),
        Err(RulesError::InvalidFen { .. })
    ));
    assert!(Position::from_fen("8/8/8/8 w - -").is_err());
}

#[test]
fn castling_moves_are_flagged() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    let short = find(&pos, "e1g1");
    assert!(short.flags.contains(MoveFlags::CASTLE_KINGSIDE));
    assert!(short.is_castle());
    assert!(!short.is_capture());

    let long = find(&pos, "e1c1");
    assert!(long.flags.contains(MoveFlags::CASTLE_QUEENSIDE));
}

#[test]
fn en_passant_is_a_pawn_capture() {
    let pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
    let ep = find(&pos, "e5f6");
    assert!(ep.is_en_passant());
    assert!(ep.is_capture());
    assert_eq!(ep.captured, Some(PieceKind::Pawn));
}

#[test]
fn checking_move_is_flagged() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    assert!(find(&pos, "a1a8").is_check());
    assert!(!find(&pos, "a1a2").is_check());
}

#[test]
fn promotions_list_every_piece() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let promos: Vec<Move> = pos
        .legal_moves()
        .into_iter()
        .filter(|m| m.from == coord_to_sq("a7").unwrap())
        .collect();
    assert_eq!(promos.len(), 4);
    assert!(promos.iter().all(|m| m.is_promotion()));
    assert!(promos.iter().any(|m| m.promotion == Some(PieceKind::Queen)));
}

#[test]
fn make_and_unmake_restore_position() {
    let mut pos = Position::startpos();
    let before = pos.fen();

    let mv = find(&pos, "e2e4");
    pos.make_move(&mv).unwrap();
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_ne!(pos.fen(), before);

    assert_eq!(pos.unmake_move().unwrap(), mv);
    assert_eq!(pos.fen(), before);
}

#[test]
fn unmake_without_history_fails() {
    let mut pos = Position::startpos();
    assert_eq!(pos.unmake_move(), Err(RulesError::NothingToUndo));
}

#[test]
fn illegal_move_is_rejected() {
    let mut pos = Position::startpos();
    let bogus = Move {
        from: coord_to_sq("e2").unwrap(),
        to: coord_to_sq("e5").unwrap(),
        piece: PieceKind::Pawn,
        captured: None,
        promotion: None,
        flags: MoveFlags::empty(),
    };
    assert!(matches!(
        pos.make_move(&bogus),
        Err(RulesError::IllegalMove { .. })
    ));
    assert_eq!(pos.fen(), STARTPOS_FEN);
}

#[test]
fn clocks_advance_like_fen() {
    let mut pos = Position::startpos();
    for uci in ["g1f3", "g8f6"] {
        let mv = find(&pos, uci);
        pos.make_move(&mv).unwrap();
    }
    assert_eq!(pos.halfmove_clock(), 2);
    assert_eq!(pos.fullmove_number(), 2);

    let mv = find(&pos, "e2e4");
    pos.make_move(&mv).unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 2);
}

#[test]
fn opponent_mobility_while_in_check() {
    // Black to move and in check: a null move is impossible, so White's
    // count falls back to pseudo-legal mobility.
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
    assert!(pos.in_check());
    assert!(pos.move_count(Color::White) > 0);
    assert!(pos.move_count(Color::Black) > 0);
}
