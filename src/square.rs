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

//! Board coordinates.
//!
//! A [`Square`] is a `(row, col)` pair as seen on screen: row `0` is the top
//! edge and column `0` the left edge. Which algebraic name a square carries
//! depends on the [`Orientation`] of the board.

use std::{error::Error, fmt, str::FromStr};

/// Error when accessing a coordinate outside of the 8x8 board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidPosition {
    pub row: i16,
    pub col: i16,
}

impl fmt::Display for InvalidPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid position ({}, {})", self.row, self.col)
    }
}

impl Error for InvalidPosition {}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A cell of the board, addressed by screen `(row, col)`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Checked constructor.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPosition`] if `row` or `col` is not in `0..8`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rookery::Square;
    ///
    /// let sq = Square::new(6, 4)?;
    /// assert_eq!((sq.row(), sq.col()), (6, 4));
    /// assert!(Square::new(8, 0).is_err());
    /// # Ok::<_, rookery::InvalidPosition>(())
    /// ```
    pub fn new(row: i16, col: i16) -> Result<Square, InvalidPosition> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Square((row * 8 + col) as u8))
        } else {
            Err(InvalidPosition { row, col })
        }
    }

    #[inline]
    pub(crate) const fn from_row_col(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Moves by the given number of rows and columns, if the result is still
    /// on the board.
    #[inline]
    pub fn offset(self, drow: i8, dcol: i8) -> Option<Square> {
        let row = self.row() as i8 + drow;
        let col = self.col() as i8 + dcol;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::from_row_col(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Point reflection through the board centre.
    #[must_use]
    #[inline]
    pub const fn mirrored(self) -> Square {
        Square(63 - self.0)
    }

    /// Light squares are those of a1's opposite color, e.g. h1 and a8.
    /// Independent of orientation.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.row(), self.col())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

impl From<Square> for (u8, u8) {
    fn from(sq: Square) -> (u8, u8) {
        (sq.row(), sq.col())
    }
}

impl TryFrom<(i16, i16)> for Square {
    type Error = InvalidPosition;

    fn try_from((row, col): (i16, i16)) -> Result<Square, InvalidPosition> {
        Square::new(row, col)
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Square> {
        u.int_in_range::<u8>(0..=63).map(Square)
    }

    #[inline]
    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

/// Which side of the board is drawn at the bottom of the screen.
///
/// The sign is the multiplier applied to row directions: with `+1` white
/// pawns advance towards row `0`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Orientation {
    #[default]
    WhiteBottom,
    BlackBottom,
}

impl Orientation {
    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            Orientation::WhiteBottom => 1,
            Orientation::BlackBottom => -1,
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Orientation {
        match self {
            Orientation::WhiteBottom => Orientation::BlackBottom,
            Orientation::BlackBottom => Orientation::WhiteBottom,
        }
    }

    /// Square for an absolute file and rank, both in `0..8` (`0` is the
    /// a-file and the first rank).
    pub const fn square(self, file: u8, rank: u8) -> Square {
        match self {
            Orientation::WhiteBottom => Square::from_row_col(7 - rank, file),
            Orientation::BlackBottom => Square::from_row_col(rank, 7 - file),
        }
    }

    pub const fn file(self, sq: Square) -> u8 {
        match self {
            Orientation::WhiteBottom => sq.col(),
            Orientation::BlackBottom => 7 - sq.col(),
        }
    }

    pub const fn rank(self, sq: Square) -> u8 {
        match self {
            Orientation::WhiteBottom => 7 - sq.row(),
            Orientation::BlackBottom => sq.row(),
        }
    }

    /// Rank counted from `color`'s own back rank (`0`) forwards.
    pub const fn relative_rank(self, sq: Square, white: bool) -> u8 {
        let rank = self.rank(sq);
        if white {
            rank
        } else {
            7 - rank
        }
    }

    /// Algebraic name of a square, such as `e4`.
    pub fn name(self, sq: Square) -> SquareName {
        SquareName {
            file: self.file(sq),
            rank: self.rank(sq),
        }
    }

    /// Parses an algebraic square name such as `e4`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] for anything but a file letter `a`-`h`
    /// followed by a rank digit `1`-`8`.
    pub fn parse(self, name: &str) -> Result<Square, ParseSquareError> {
        name.parse().map(|name| self.resolve(name))
    }

    /// Screen square carrying the given name.
    pub const fn resolve(self, name: SquareName) -> Square {
        self.square(name.file, name.rank)
    }
}

/// Display adapter for algebraic square names.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct SquareName {
    file: u8,
    rank: u8,
}

impl SquareName {
    /// File index (`0` is the a-file).
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Rank index (`0` is the first rank).
    pub const fn rank(self) -> u8 {
        self.rank
    }

    pub fn file_char(self) -> char {
        char::from(b'a' + self.file)
    }

    pub fn rank_char(self) -> char {
        char::from(b'1' + self.rank)
    }
}

impl FromStr for SquareName {
    type Err = ParseSquareError;

    fn from_str(name: &str) -> Result<SquareName, ParseSquareError> {
        match *name.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(SquareName {
                file: file - b'a',
                rank: rank - b'1',
            }),
            _ => Err(ParseSquareError),
        }
    }
}

impl fmt::Display for SquareName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col).expect("on board");
                assert_eq!(i16::from(sq.row()), row);
                assert_eq!(i16::from(sq.col()), col);
            }
        }
        assert_eq!(
            Square::new(-1, 3),
            Err(InvalidPosition { row: -1, col: 3 })
        );
    }

    #[test]
    fn test_orientation_names() {
        let white = Orientation::WhiteBottom;
        let black = Orientation::BlackBottom;

        let e2 = white.parse("e2").expect("valid");
        assert_eq!((e2.row(), e2.col()), (6, 4));
        assert_eq!(white.name(e2).to_string(), "e2");

        let e2 = black.parse("e2").expect("valid");
        assert_eq!((e2.row(), e2.col()), (1, 3));
        assert_eq!(black.name(e2).to_string(), "e2");

        assert_eq!(white.parse("e2").map(Square::mirrored), black.parse("e2"));
        assert!(white.parse("i1").is_err());
        assert!(white.parse("e9").is_err());
    }

    #[test]
    fn test_colors() {
        let white = Orientation::WhiteBottom;
        assert!(!white.parse("a1").expect("valid").is_light());
        assert!(white.parse("h1").expect("valid").is_light());
        assert!(white.parse("d1").expect("valid").is_light());
        assert!(!white.parse("d8").expect("valid").is_light());
    }
}
