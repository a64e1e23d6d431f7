use rookery::{uci::Uci, Board, PlayError, RuleConfig, Termination};

const LINE: [&str; 12] = [
    "e2e4", "d7d5", "e4e5", "f7f5", "e5f6", "g7f6", "g1f3", "b8c6", "f1e2", "c8e6", "e1g1", "d8d7",
];

fn play_line(board: &mut Board, line: &[&str]) -> Vec<String> {
    let mut fens = vec![board.fen()];
    for uci in line {
        board.play_uci(uci).unwrap_or_else(|err| panic!("{uci}: {err}"));
        fens.push(board.fen());
    }
    fens
}

fn uci_moves(board: &Board) -> Vec<String> {
    let mut moves: Vec<String> = board
        .legal_moves()
        .iter()
        .map(|m| Uci::from_move(board, m).to_string())
        .collect();
    moves.sort();
    moves
}

fn root_variations(board: &Board) -> usize {
    let tree = board.tree();
    tree.node(tree.root()).map_or(0, |node| node.children().len())
}

#[test]
fn test_undo_and_redo_are_exact() {
    let mut board = Board::default();
    let fens = play_line(&mut board, &LINE);
    assert_eq!(board.ply(), LINE.len());
    assert_eq!(
        board.tree().movetext(),
        "1. e4 d5 2. e5 f5 3. exf6 gxf6 4. Nf3 Nc6 5. Be2 Be6 6. O-O Qd7"
    );

    for fen in fens.iter().rev().skip(1) {
        assert!(board.go_backward());
        assert_eq!(&board.fen(), fen);
    }
    assert!(!board.go_backward());
    assert_eq!(board, Board::default());

    for fen in fens.iter().skip(1) {
        assert!(board.go_forward(0));
        assert_eq!(&board.fen(), fen);
    }
    assert!(!board.go_forward(0));
}

#[test]
fn test_variations() {
    let mut board = Board::default();
    board.play_uci("e2e4").expect("legal");
    board.go_backward();
    board.play_uci("d2d4").expect("legal");
    assert_eq!(root_variations(&board), 2);

    assert!(board.go_previous());
    assert_eq!(board.tree().movetext(), "1. e4");
    assert!(board.go_next());
    assert_eq!(board.tree().movetext(), "1. d4");

    // Replaying a known move reuses its node.
    board.go_backward();
    board.play_uci("e2e4").expect("legal");
    assert_eq!(root_variations(&board), 2);
}

#[test]
fn test_en_passant_only_immediately() {
    let mut board = Board::default();
    play_line(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert!(board.en_passant().is_some());
    assert!(board.clone().play_uci("e5d6").is_ok());

    play_line(&mut board, &["g1f3", "a6a5"]);
    assert_eq!(board.en_passant(), None);
    assert_eq!(board.play_uci("e5d6"), Err(PlayError::IllegalMove));
}

#[test]
fn test_threefold_on_third_occurrence() {
    let mut board = Board::default();
    play_line(&mut board, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert!(!board.is_game_over());

    play_line(&mut board, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(
        board.check_result().map(|r| r.termination),
        Some(Termination::ThreefoldRepetition)
    );
    assert_eq!(board.play_uci("e2e4"), Err(PlayError::GameOver));

    assert!(board.go_backward());
    assert!(!board.is_game_over());
}

#[test]
fn test_repetition_resets_after_pawn_move() {
    let mut board = Board::default();
    play_line(&mut board, &["g1f3", "g8f6", "f3g1", "f6g8", "e2e3"]);
    play_line(&mut board, &["g8f6", "g1f3", "f6g8", "f3g1", "g8f6", "g1f3", "f6g8"]);
    assert!(!board.is_threefold_repetition());
}

#[test]
fn test_fen_round_trip() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 17",
        "rnbqkbnr/pp1ppppp/8/2pP4/8/8/PPP1PPPP/RNBQKBNR w KQkq c6 0 2",
        "8/8/8/8/8/8/8/K6k w - - 0 1",
    ] {
        let board = Board::from_fen(fen, RuleConfig::standard()).expect("valid fen");
        assert_eq!(board.fen(), fen);
    }
}

#[test]
fn test_flip_preserves_position() {
    let mut board = Board::default();
    let fens = play_line(&mut board, &LINE[..6]);
    let moves = uci_moves(&board);

    board.flip_board();
    assert_eq!(board.fen(), fens[6]);
    assert_eq!(uci_moves(&board), moves);

    for fen in fens.iter().rev().skip(1) {
        assert!(board.go_backward());
        assert_eq!(&board.fen(), fen);
    }

    board.go_leaf();
    assert_eq!(board.fen(), fens[6]);
    board.play_uci("g1f3").expect("legal");
    assert_eq!(board.tree().movetext(), "1. e4 d5 2. e5 f5 3. exf6 gxf6 4. Nf3");
}
