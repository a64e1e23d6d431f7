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

use std::{error::Error, fmt};

use crate::square::InvalidPosition;

/// Error when constructing a [`Move`](crate::Move) that can not describe
/// anything on the given board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveError {
    /// A coordinate is off the board.
    InvalidPosition(InvalidPosition),
    /// There is no piece on the origin square.
    EmptySquare,
    /// A promotion was requested for something other than a pawn reaching
    /// the last rank, or to a role the rules do not offer.
    InvalidPromotion,
    /// A pawn reaches the last rank but no promotion was chosen.
    MissingPromotion,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidPosition(err) => fmt::Display::fmt(err, f),
            MoveError::EmptySquare => f.write_str("no piece on origin square"),
            MoveError::InvalidPromotion => f.write_str("invalid promotion"),
            MoveError::MissingPromotion => f.write_str("missing promotion"),
        }
    }
}

impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveError::InvalidPosition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidPosition> for MoveError {
    fn from(err: InvalidPosition) -> MoveError {
        MoveError::InvalidPosition(err)
    }
}

/// Error when trying to play an illegal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// The move is not legal in the current position.
    IllegalMove,
    /// The game has already ended.
    GameOver,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayError::IllegalMove => "illegal move",
            PlayError::GameOver => "game is over",
        })
    }
}

impl Error for PlayError {}
