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

//! Parse and write moves in the notation of the Universal Chess Interface.
//!
//! Squares are named absolutely, so the same string means the same move
//! however the board is oriented. Chess960 castling is written as the king
//! moving onto its own rook.
//!
//! # Examples
//!
//! ```
//! use rookery::{uci::Uci, Board, RuleConfig};
//!
//! let mut board = Board::new(RuleConfig::standard());
//! let uci: Uci = "g1f3".parse()?;
//! let m = uci.to_move(&board)?;
//! board.play(m)?;
//! assert_eq!(board.tree().movetext(), "1. Nf3");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board,
    errors::PlayError,
    m::Move,
    role::Role,
    square::{ParseSquareError, SquareName},
    tree::NodeId,
};

/// Error when parsing a syntactically invalid UCI move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

impl From<ParseSquareError> for ParseUciError {
    fn from(_: ParseSquareError) -> ParseUciError {
        ParseUciError
    }
}

/// Error when a UCI move is not legal on the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalUciError;

impl fmt::Display for IllegalUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal uci")
    }
}

impl Error for IllegalUciError {}

/// A move as `e2e4` or `e7e8q`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Uci {
    pub from: SquareName,
    pub to: SquareName,
    pub promotion: Option<Role>,
}

impl FromStr for Uci {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Uci, ParseUciError> {
        if !uci.is_ascii() || !(4..=5).contains(&uci.len()) {
            return Err(ParseUciError);
        }
        let from = uci[0..2].parse()?;
        let to = uci[2..4].parse()?;
        let promotion = match uci[4..].chars().next() {
            Some(ch) if ch.is_ascii_lowercase() => {
                Some(Role::from_char(ch).filter(|&r| r != Role::Pawn).ok_or(ParseUciError)?)
            }
            Some(_) => return Err(ParseUciError),
            None => None,
        };
        Ok(Uci {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

impl Uci {
    /// Names the squares of `m` on `board`.
    pub fn from_move(board: &Board, m: &Move) -> Uci {
        Uci {
            from: board.square_name(m.from()),
            to: board.square_name(m.to()),
            promotion: m.promotion(),
        }
    }

    /// Converts to a legal move on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUciError`] if there is no such legal move.
    pub fn to_move(&self, board: &Board) -> Result<Move, IllegalUciError> {
        let orientation = board.orientation();
        let m = Move::new(
            board,
            orientation.resolve(self.from),
            orientation.resolve(self.to),
            self.promotion,
        )
        .map_err(|_| IllegalUciError)?;
        if m.is_legal(board) {
            Ok(m)
        } else {
            Err(IllegalUciError)
        }
    }
}

impl Board {
    /// Parses and plays a UCI move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::IllegalMove`] for malformed or illegal moves.
    pub fn play_uci(&mut self, uci: &str) -> Result<NodeId, PlayError> {
        let m = uci
            .parse::<Uci>()
            .ok()
            .and_then(|uci| uci.to_move(self).ok())
            .ok_or(PlayError::IllegalMove)?;
        self.play(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleConfig;

    #[test]
    fn test_parse_uci() {
        assert_eq!("e2e4".parse::<Uci>().map(|u| u.to_string()).as_deref(), Ok("e2e4"));
        assert_eq!("e7e8q".parse::<Uci>().map(|u| u.promotion), Ok(Some(Role::Queen)));
        assert_eq!("e7e8p".parse::<Uci>(), Err(ParseUciError));
        assert_eq!("e7e8Q".parse::<Uci>(), Err(ParseUciError));
        assert_eq!("e2e9".parse::<Uci>(), Err(ParseUciError));
        assert_eq!("e2".parse::<Uci>(), Err(ParseUciError));
    }

    #[test]
    fn test_uci_independent_of_orientation() {
        let mut board = Board::new(RuleConfig::standard());
        board.flip_board();
        let uci: Uci = "e2e4".parse().expect("valid uci");
        let m = uci.to_move(&board).expect("legal");
        assert_eq!(Uci::from_move(&board, &m), uci);
        assert!(board.play(m).is_ok());
        assert_eq!(board.play_uci("e2e4"), Err(PlayError::IllegalMove));
        assert!(board.play_uci("e7e5").is_ok());
    }

    #[test]
    fn test_chess960_castling_uci() {
        let mut board = Board::from_fen(
            "4k3/8/8/8/8/8/8/1R4KR w KQ - 0 1",
            RuleConfig::CHESS960,
        )
        .expect("valid fen");
        board.play_uci("g1h1").expect("castles");
        assert_eq!(board.fen(), "4k3/8/8/8/8/8/8/1R3RK1 b - - 0 1");
    }

    #[test]
    fn test_standard_castling_uci() {
        let mut board = Board::from_fen(
            "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1",
            RuleConfig::standard(),
        )
        .expect("valid fen");
        board.play_uci("e1c1").expect("castles");
        assert_eq!(board.fen(), "4k3/8/8/8/8/8/8/2KR3R b - - 0 1");
    }
}
