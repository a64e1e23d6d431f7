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

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    role::Role,
    rules::RuleConfig,
    square::Square,
    tile::Grid,
};

/// Candidate destination squares of a single piece.
///
/// A queen in the middle of an empty board has 27 destinations, a king at
/// most 8 steps and 2 castling moves.
pub type SquareList = ArrayVec<Square, 32>;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A piece with [`Color`] and [`Role`].
///
/// Pieces do not know where they stand. The square is owned by the
/// [`Tile`](crate::Tile) holding the piece.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// FEN letter: uppercase for white, lowercase for black.
    pub fn char(self) -> char {
        self.color
            .fold_wb(self.role.upper_char(), self.role.char())
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }

    /// Roles this piece may promote to under the given rules. Empty for
    /// anything but pawns.
    pub fn promotion_targets(self, rules: RuleConfig) -> &'static [Role] {
        match self.role {
            Role::Pawn => rules.promotion_roles(),
            _ => &[],
        }
    }

    /// Pseudo-legal destinations of this piece standing on `from`.
    ///
    /// Consistent with the movement pattern and occupancy, but not yet
    /// checked for king safety or compulsory captures. Castling moves of the
    /// king are included: as the king's destination in standard chess, and
    /// as the castling rook's square in Chess960.
    pub fn calc_moves(self, board: &Board, from: Square) -> SquareList {
        let mut moves = SquareList::new();
        let grid = board.grid();
        match self.role {
            Role::Pawn => gen_pawn_moves(board, self.color, from, &mut moves),
            Role::Knight => KnightTag::gen_moves(grid, self.color, from, &mut moves),
            Role::Bishop => BishopTag::gen_moves(grid, self.color, from, &mut moves),
            Role::Rook => RookTag::gen_moves(grid, self.color, from, &mut moves),
            Role::Queen => QueenTag::gen_moves(grid, self.color, from, &mut moves),
            Role::King => {
                KingTag::gen_moves(grid, self.color, from, &mut moves);
                gen_castling_moves(board, self.color, from, &mut moves);
            }
        }
        moves
    }
}

trait Stepper {
    const OFFSETS: [(i8, i8); 8];

    fn gen_moves(grid: &Grid, color: Color, from: Square, moves: &mut SquareList) {
        for (drow, dcol) in Self::OFFSETS {
            if let Some(to) = from.offset(drow, dcol) {
                if grid.piece_at(to).is_none_or(|p| p.color != color) {
                    moves.push(to);
                }
            }
        }
    }
}

trait Slider {
    const DIRECTIONS: &'static [(i8, i8)];

    fn gen_moves(grid: &Grid, color: Color, from: Square, moves: &mut SquareList) {
        for &(drow, dcol) in Self::DIRECTIONS {
            let mut sq = from;
            while let Some(to) = sq.offset(drow, dcol) {
                match grid.piece_at(to) {
                    None => moves.push(to),
                    Some(p) => {
                        if p.color != color {
                            moves.push(to);
                        }
                        break;
                    }
                }
                sq = to;
            }
        }
    }
}

struct KingTag;
struct KnightTag;
struct BishopTag;
struct RookTag;
struct QueenTag;

const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

impl Stepper for KingTag {
    const OFFSETS: [(i8, i8); 8] = KING_OFFSETS;
}

impl Stepper for KnightTag {
    const OFFSETS: [(i8, i8); 8] = KNIGHT_OFFSETS;
}

impl Slider for BishopTag {
    const DIRECTIONS: &'static [(i8, i8)] = &BISHOP_DIRECTIONS;
}

impl Slider for RookTag {
    const DIRECTIONS: &'static [(i8, i8)] = &ROOK_DIRECTIONS;
}

impl Slider for QueenTag {
    const DIRECTIONS: &'static [(i8, i8)] = &QUEEN_DIRECTIONS;
}

fn gen_pawn_moves(board: &Board, color: Color, from: Square, moves: &mut SquareList) {
    let grid = board.grid();
    let forward = grid.forward(color);

    if let Some(single) = from.offset(forward, 0) {
        if grid.is_empty(single) {
            moves.push(single);

            let on_start_rank = grid
                .orientation()
                .relative_rank(from, color.is_white())
                == 1;
            if on_start_rank {
                if let Some(double) = single.offset(forward, 0) {
                    if grid.is_empty(double) {
                        moves.push(double);
                    }
                }
            }
        }
    }

    for dcol in [-1, 1] {
        let Some(to) = from.offset(forward, dcol) else {
            continue;
        };
        match grid.piece_at(to) {
            Some(p) if p.color != color => moves.push(to),
            Some(_) => (),
            None => {
                if is_en_passant_target(board, color, to) {
                    moves.push(to);
                }
            }
        }
    }
}

/// Whether a pawn of `color` capturing onto the empty square `to` would be
/// an en passant capture.
pub(crate) fn is_en_passant_target(board: &Board, color: Color, to: Square) -> bool {
    if board.en_passant() != Some(to) || board.turn() != color {
        return false;
    }
    let grid = board.grid();
    grid.orientation().relative_rank(to, color.is_white()) == 5
        && to
            .offset(-grid.forward(color), 0)
            .and_then(|pushed| grid.piece_at(pushed))
            == Some(Role::Pawn.of(!color))
}

/// Squares strictly between two squares on the same row.
pub(crate) fn between_on_row(a: Square, b: Square) -> impl Iterator<Item = Square> {
    let row = a.row();
    let (lo, hi) = if a.col() < b.col() {
        (a.col(), b.col())
    } else {
        (b.col(), a.col())
    };
    (lo + 1..hi).map(move |col| Square::from_row_col(row, col))
}

/// Squares from `a` to `b` inclusive, both on the same row.
pub(crate) fn span_on_row(a: Square, b: Square) -> impl Iterator<Item = Square> {
    let row = a.row();
    let (lo, hi) = if a.col() < b.col() {
        (a.col(), b.col())
    } else {
        (b.col(), a.col())
    };
    (lo..=hi).map(move |col| Square::from_row_col(row, col))
}

fn gen_castling_moves(board: &Board, color: Color, king: Square, moves: &mut SquareList) {
    for side in CastlingSide::ALL {
        if let Some(castle) = board.castling_geometry(color, king, side) {
            let grid = board.grid();
            let rook_piece = Role::Rook.of(color);
            if grid.piece_at(castle.rook_from) != Some(rook_piece) {
                continue;
            }

            // Everything strictly between king and rook must be empty.
            if !between_on_row(king, castle.rook_from).all(|sq| grid.is_empty(sq)) {
                continue;
            }

            if board.rules().is_chess960() {
                // Both paths, destinations included, may only hold the
                // castling king and rook themselves.
                let clear = |sq: Square| sq == king || sq == castle.rook_from || grid.is_empty(sq);
                if !span_on_row(king, castle.king_to).all(clear)
                    || !span_on_row(castle.rook_from, castle.rook_to).all(clear)
                {
                    continue;
                }
                moves.push(castle.rook_from);
            } else {
                moves.push(castle.king_to);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen, RuleConfig::standard()).expect("valid fen")
    }

    fn names(board: &Board, squares: &SquareList) -> Vec<String> {
        let mut names: Vec<String> = squares
            .iter()
            .map(|&sq| board.orientation().name(sq).to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(Piece::from_char('Q'), Some(Role::Queen.of(Color::White)));
        assert_eq!(Piece::from_char('n'), Some(Role::Knight.of(Color::Black)));
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Role::King.of(Color::Black).char(), 'k');
    }

    #[test]
    fn test_pawn_pushes() {
        let b = board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        let e2 = b.square("e2").expect("valid");
        let moves = b.get_piece(e2).expect("piece").calc_moves(&b, e2);
        assert_eq!(names(&b, &moves), ["e3", "e4"]);
    }

    #[test]
    fn test_pawn_blocked_double_push() {
        let b = board("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        let e2 = b.square("e2").expect("valid");
        let moves = b.get_piece(e2).expect("piece").calc_moves(&b, e2);
        assert_eq!(names(&b, &moves), ["e3"]);
    }

    #[test]
    fn test_pawn_captures_and_en_passant() {
        let b = board("4k3/8/8/3pPp2/8/8/8/4K3 w - d6 0 2");
        let e5 = b.square("e5").expect("valid");
        let moves = b.get_piece(e5).expect("piece").calc_moves(&b, e5);
        assert_eq!(names(&b, &moves), ["d6", "e6"]);
    }

    #[test]
    fn test_knight_in_corner() {
        let b = board("4k3/8/8/8/8/8/2P5/N3K3 w - - 0 1");
        let a1 = b.square("a1").expect("valid");
        let moves = b.get_piece(a1).expect("piece").calc_moves(&b, a1);
        assert_eq!(names(&b, &moves), ["b3"]);
    }

    #[test]
    fn test_rook_rays_stop() {
        let b = board("4k3/8/8/8/1p6/8/8/RN2K3 w - - 0 1");
        let a1 = b.square("a1").expect("valid");
        let moves = b.get_piece(a1).expect("piece").calc_moves(&b, a1);
        assert_eq!(
            names(&b, &moves),
            ["a2", "a3", "a4", "a5", "a6", "a7", "a8"]
        );
    }

    #[test]
    fn test_queen_on_empty_board() {
        let b = board("k7/8/8/8/3Q4/8/8/7K w - - 0 1");
        let d4 = b.square("d4").expect("valid");
        let moves = b.get_piece(d4).expect("piece").calc_moves(&b, d4);
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn test_king_castling_candidates() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let e1 = b.square("e1").expect("valid");
        let moves = b.get_piece(e1).expect("piece").calc_moves(&b, e1);
        assert_eq!(
            names(&b, &moves),
            ["c1", "d1", "d2", "e2", "f1", "f2", "g1"]
        );
    }

    #[test]
    fn test_king_castling_blocked() {
        let b = board("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        let e1 = b.square("e1").expect("valid");
        let moves = b.get_piece(e1).expect("piece").calc_moves(&b, e1);
        assert_eq!(names(&b, &moves), ["d1", "d2", "e2", "f1", "f2"]);
    }

    #[test]
    fn test_chess960_castling_targets_rook() {
        let b = Board::from_fen(
            "4k3/8/8/8/8/8/8/1R4KR w KQ - 0 1",
            RuleConfig::CHESS960,
        )
        .expect("valid fen");
        let g1 = b.square("g1").expect("valid");
        let moves = b.get_piece(g1).expect("piece").calc_moves(&b, g1);
        let names = names(&b, &moves);
        assert!(names.contains(&"h1".to_owned()));
        assert!(names.contains(&"b1".to_owned()));
    }

    #[test]
    fn test_flipped_pawn_direction() {
        let mut b = board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        b.flip_board();
        let e2 = b.square("e2").expect("valid");
        let moves = b.get_piece(e2).expect("piece").calc_moves(&b, e2);
        assert_eq!(names(&b, &moves), ["e3", "e4"]);
        assert!(moves.iter().all(|sq| sq.row() > e2.row()));
    }
}
