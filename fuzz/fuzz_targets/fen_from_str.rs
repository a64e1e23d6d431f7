#![no_main]

use libfuzzer_sys::fuzz_target;
use rookery::{Board, RuleConfig};

fuzz_target!(|data: (u8, &str)| {
    let (bits, fen) = data;
    let rules = RuleConfig::from_bits_truncate(bits);
    let Ok(board) = Board::from_fen(fen, rules) else {
        return;
    };
    let roundtripped = Board::from_fen(&board.fen(), rules).expect("roundtrip");
    assert_eq!(board, roundtripped);
});
