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

use crate::{
    board::Board,
    color::Color,
    m::Move,
    piece::Piece,
    role::{ByRole, Role},
    square::Square,
};

/// The pieces of one side, grouped by role.
///
/// Each list is kept sorted by square, so two rosters with the same pieces
/// compare equal regardless of the order in which they were placed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Player {
    color: Color,
    pieces: ByRole<Vec<Square>>,
}

impl Player {
    pub(crate) fn new(color: Color) -> Player {
        Player {
            color,
            pieces: ByRole::default(),
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pieces(&self) -> &ByRole<Vec<Square>> {
        &self.pieces
    }

    /// All pieces with their squares, pawns first.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.pieces
            .iter_roles()
            .flat_map(move |(role, squares)| squares.iter().map(move |&sq| (role.of(self.color), sq)))
    }

    /// Square of the king. Giveaway games may have no king or several, in
    /// which case the first one is reported.
    pub fn king(&self) -> Option<Square> {
        self.pieces.king.first().copied()
    }

    pub fn count(&self) -> usize {
        self.pieces.iter().map(|squares| squares.len()).sum()
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.pieces.get(role).len()
    }

    pub(crate) fn add(&mut self, role: Role, sq: Square) {
        let squares = self.pieces.get_mut(role);
        if let Err(pos) = squares.binary_search(&sq) {
            squares.insert(pos, sq);
        }
    }

    pub(crate) fn remove(&mut self, role: Role, sq: Square) {
        let squares = self.pieces.get_mut(role);
        if let Ok(pos) = squares.binary_search(&sq) {
            squares.remove(pos);
        }
    }

    pub(crate) fn flip(&mut self) {
        for role in Role::ALL {
            let squares = self.pieces.get_mut(role);
            for sq in squares.iter_mut() {
                *sq = sq.mirrored();
            }
            squares.sort_unstable();
        }
    }

    /// Pseudo-legal moves of all pieces, one per promotion choice.
    pub fn get_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        for (piece, from) in self.iter() {
            for to in piece.calc_moves(board, from) {
                if piece.role == Role::Pawn && board.is_promotion_square(self.color, to) {
                    for &role in piece.promotion_targets(board.rules()) {
                        moves.push(Move::build(board, piece, from, to, Some(role)));
                    }
                } else {
                    moves.push(Move::build(board, piece, from, to, None));
                }
            }
        }
        moves
    }

    /// Moves that survive king safety and, in giveaway, the obligation to
    /// capture.
    pub fn get_legal_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = self.get_moves(board);
        moves.retain(|m| board.is_legal_ignoring_forced_capture(m));
        if board.rules().is_giveaway() && moves.iter().any(Move::is_capture) {
            moves.retain(Move::is_capture);
        }
        moves
    }

    /// Whether any move survives king safety. Stops at the first one.
    pub fn has_legal_move(&self, board: &Board) -> bool {
        self.iter().any(|(piece, from)| {
            piece.calc_moves(board, from).into_iter().any(|to| {
                let promotion = (piece.role == Role::Pawn
                    && board.is_promotion_square(self.color, to))
                .then(|| piece.promotion_targets(board.rules()).first().copied())
                .flatten();
                board.is_legal_ignoring_forced_capture(&Move::build(board, piece, from, to, promotion))
            })
        })
    }

    /// Whether this side's king is attacked. Always `false` in giveaway,
    /// where the king is an ordinary piece.
    pub fn is_king_check(&self, board: &Board) -> bool {
        board.rules().king_safety()
            && self
                .king()
                .is_some_and(|king| board.grid().is_attacked(king, !self.color))
    }

    /// Whether this side has any capture among its legal moves.
    pub fn has_capture(&self, board: &Board) -> bool {
        self.get_moves(board)
            .iter()
            .any(|m| m.is_capture() && board.is_legal_ignoring_forced_capture(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleConfig, STARTING_FEN};

    #[test]
    fn test_roster_sorted() {
        let mut player = Player::new(Color::White);
        let a = Square::from_row_col(6, 4);
        let b = Square::from_row_col(6, 0);
        player.add(Role::Pawn, a);
        player.add(Role::Pawn, b);
        assert_eq!(player.pieces().pawn, [b, a]);
        player.remove(Role::Pawn, b);
        assert_eq!(player.count(), 1);
    }

    #[test]
    fn test_starting_moves() {
        let board = Board::from_fen(STARTING_FEN, RuleConfig::standard()).expect("valid fen");
        let white = board.player(Color::White);
        assert_eq!(white.count(), 16);
        assert_eq!(white.get_moves(&board).len(), 20);
        assert_eq!(white.get_legal_moves(&board).len(), 20);
        assert!(!white.is_king_check(&board));
    }

    #[test]
    fn test_promotions_expanded() {
        let board = Board::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1", RuleConfig::standard())
            .expect("valid fen");
        let pawn_moves = board
            .player(Color::White)
            .get_legal_moves(&board)
            .into_iter()
            .filter(|m| m.piece().role == Role::Pawn)
            .count();
        assert_eq!(pawn_moves, 4);
    }

    #[test]
    fn test_giveaway_forced_capture() {
        let board = Board::from_fen("8/8/8/3p4/4P3/8/8/8 w - - 0 1", RuleConfig::giveaway())
            .expect("valid fen");
        let moves = board.player(Color::White).get_legal_moves(&board);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_capture());
    }
}
