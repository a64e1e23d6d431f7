#![no_main]

use libfuzzer_sys::fuzz_target;
use rookery::{Board, RuleConfig, Square};

fuzz_target!(|data: (u8, Vec<Square>)| {
    let (bits, clicks) = data;
    let rules = RuleConfig::from_bits_truncate(bits);
    let mut board = Board::new(rules);
    let start = board.fen();
    for sq in clicks {
        board.select(sq);
        let fen = board.fen();
        assert_eq!(Board::from_fen(&fen, rules).map(|b| b.fen()), Ok(fen));
    }
    let ply = board.ply();
    board.go_root();
    assert_eq!(board.fen(), start);
    board.go_leaf();
    assert_eq!(board.ply(), ply);
});
