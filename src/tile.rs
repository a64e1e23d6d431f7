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

//! Tiles and the piece placement grid.

use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;

use crate::{
    color::Color,
    m::Move,
    piece::{Piece, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS},
    role::Role,
    square::{Orientation, Square},
};

/// A cell of the board with its optional occupant.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Tile {
    square: Square,
    piece: Option<Piece>,
}

impl Tile {
    #[inline]
    pub const fn square(self) -> Square {
        self.square
    }

    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        self.piece
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.piece.is_none()
    }

    /// Screen coordinates `(row, col)`.
    #[inline]
    pub const fn coords(self) -> (u8, u8) {
        (self.square.row(), self.square.col())
    }

    pub const fn is_light(self) -> bool {
        self.square.is_light()
    }
}

/// Squares touched by [`Grid::simulate()`], with their previous contents.
#[derive(Debug)]
#[must_use = "pass to Grid::unsimulate() to restore the grid"]
pub struct Simulation {
    saved: ArrayVec<(Square, Option<Piece>), 4>,
}

/// The 8x8 arrangement of tiles, as drawn in the current [`Orientation`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Grid {
    tiles: [Tile; 64],
    orientation: Orientation,
}

impl Grid {
    pub fn empty(orientation: Orientation) -> Grid {
        let mut tiles = [Tile {
            square: Square::from_row_col(0, 0),
            piece: None,
        }; 64];
        for sq in Square::all() {
            tiles[sq.index()].square = sq;
        }
        Grid { tiles, orientation }
    }

    #[inline]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn tile(&self, sq: Square) -> &Tile {
        &self.tiles[sq.index()]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.tiles[sq.index()].piece
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.tiles[sq.index()].piece.is_none()
    }

    /// Tiles in row-major screen order.
    pub fn tiles(&self) -> impl ExactSizeIterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Puts `piece` on `sq` (or clears it) and returns the previous occupant.
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.tiles[sq.index()].piece, piece)
    }

    /// Row direction in which pawns of `color` advance on screen.
    #[inline]
    pub const fn forward(&self, color: Color) -> i8 {
        -(color.sign() * self.orientation.sign())
    }

    /// Tests if `sq` is attacked by any piece of `attacker`.
    ///
    /// Pawns attack diagonally forward only. Castling never attacks.
    pub fn is_attacked(&self, sq: Square, attacker: Color) -> bool {
        let is = |to: Option<Square>, role: Role| {
            to.and_then(|to| self.piece_at(to)) == Some(role.of(attacker))
        };

        let behind = -self.forward(attacker);
        if is(sq.offset(behind, -1), Role::Pawn) || is(sq.offset(behind, 1), Role::Pawn) {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(dr, dc)| is(sq.offset(dr, dc), Role::Knight))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(dr, dc)| is(sq.offset(dr, dc), Role::King))
        {
            return true;
        }

        self.ray_attacked(sq, attacker, &ROOK_DIRECTIONS, Role::Rook)
            || self.ray_attacked(sq, attacker, &BISHOP_DIRECTIONS, Role::Bishop)
    }

    fn ray_attacked(&self, sq: Square, attacker: Color, directions: &[(i8, i8)], slider: Role) -> bool {
        directions.iter().any(|&(drow, dcol)| {
            let mut cur = sq;
            while let Some(next) = cur.offset(drow, dcol) {
                if let Some(piece) = self.piece_at(next) {
                    return piece.color == attacker
                        && (piece.role == slider || piece.role == Role::Queen);
                }
                cur = next;
            }
            false
        })
    }

    /// Applies the piece placement of `m` without touching any other game
    /// state. Undo with [`Grid::unsimulate()`].
    pub fn simulate(&mut self, m: &Move) -> Simulation {
        let mut saved = ArrayVec::new();
        let mut save = |grid: &Grid, sq: Square| {
            if !saved.iter().any(|&(s, _)| s == sq) {
                saved.push((sq, grid.piece_at(sq)));
            }
        };

        match m.castling() {
            Some(castle) => {
                for sq in [m.from(), castle.rook_from, castle.king_to, castle.rook_to] {
                    save(self, sq);
                }
                let rook = self.set(castle.rook_from, None);
                let king = self.set(m.from(), None);
                self.set(castle.king_to, king);
                self.set(castle.rook_to, rook);
            }
            None => {
                save(self, m.from());
                save(self, m.to());
                if let Some(capture) = m.capture_square() {
                    save(self, capture);
                    self.set(capture, None);
                }
                self.set(m.from(), None);
                self.set(m.to(), Some(m.placed_piece()));
            }
        }

        Simulation { saved }
    }

    pub fn unsimulate(&mut self, simulation: Simulation) {
        for (sq, piece) in simulation.saved {
            self.set(sq, piece);
        }
    }

    /// Rotates the grid by 180 degrees and switches the orientation.
    pub(crate) fn flip(&mut self) {
        let old = self.tiles;
        for sq in Square::all() {
            self.tiles[sq.index()].piece = old[sq.mirrored().index()].piece;
        }
        self.orientation = self.orientation.flipped();
    }

    /// Piece placement part of a FEN, from the eighth rank down to the
    /// first, regardless of orientation.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(15);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(self.orientation.square(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(fen, "{empty}");
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(fen, "{empty}");
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8usize {
            for col in 0..8usize {
                let tile = self.tiles[row * 8 + col];
                f.write_char(tile.piece.map_or('.', Piece::char))?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}
