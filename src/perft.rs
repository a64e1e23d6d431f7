// This file is part of the rookery library.
// Copyright (C) 2026 The rookery developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use crate::board::Board;

/// Counts legal move paths of the given length.
///
/// Moves are applied and undone in place, without touching the move tree.
/// Game end conditions other than running out of moves are ignored.
///
/// # Examples
///
/// ```
/// use rookery::{perft, Board, RuleConfig};
///
/// let mut board = Board::new(RuleConfig::standard());
/// assert_eq!(perft(&mut board, 1), 20);
/// assert_eq!(perft(&mut board, 2), 400);
/// ```
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| {
            let snapshot = board.snapshot();
            m.apply(board);
            let nodes = perft(board, depth - 1);
            m.undo(board, &snapshot);
            nodes
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleConfig;

    #[test]
    fn test_perft_restores_board() {
        let mut board = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            RuleConfig::standard(),
        )
        .expect("valid fen");
        let fen = board.fen();
        assert_eq!(perft(&mut board, 1), 48);
        assert_eq!(perft(&mut board, 2), 2039);
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn test_perft_giveaway() {
        let mut board = Board::new(RuleConfig::giveaway());
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
    }
}
