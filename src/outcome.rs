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

use std::{error::Error, fmt, str::FromStr};

use crate::color::Color;

/// Outcome of a game.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }

    pub const fn from_winner(winner: Option<Color>) -> Outcome {
        match winner {
            Some(winner) => Outcome::Decisive { winner },
            None => Outcome::Draw,
        }
    }

    /// PGN style result: `1-0`, `0-1` or `1/2-1/2`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing the result of a game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        match s {
            "1-0" => Ok(Outcome::Decisive {
                winner: Color::White,
            }),
            "0-1" => Ok(Outcome::Decisive {
                winner: Color::Black,
            }),
            "1/2-1/2" => Ok(Outcome::Draw),
            _ => Err(ParseOutcomeError),
        }
    }
}

/// Why a game ended.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Termination {
    Checkmate,
    Stalemate,
    FiftyMoves,
    InsufficientMaterial,
    ThreefoldRepetition,
    /// A king reached the centre.
    KingOfTheHill,
    /// A side gave its third check.
    ThreeChecks,
    /// A side ran out of pieces or moves in giveaway.
    Giveaway,
}

impl Termination {
    pub const fn name(self) -> &'static str {
        match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::FiftyMoves => "fifty-moves",
            Termination::InsufficientMaterial => "insufficient-material",
            Termination::ThreefoldRepetition => "threefold-repetition",
            Termination::KingOfTheHill => "king-of-the-hill",
            Termination::ThreeChecks => "three-checks",
            Termination::Giveaway => "giveaway",
        }
    }

    pub fn from_name(name: &str) -> Option<Termination> {
        [
            Termination::Checkmate,
            Termination::Stalemate,
            Termination::FiftyMoves,
            Termination::InsufficientMaterial,
            Termination::ThreefoldRepetition,
            Termination::KingOfTheHill,
            Termination::ThreeChecks,
            Termination::Giveaway,
        ]
        .into_iter()
        .find(|t| t.name() == name)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Termination {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Termination, ParseOutcomeError> {
        Termination::from_name(s).ok_or(ParseOutcomeError)
    }
}

/// Final state of a finished game.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct GameResult {
    pub outcome: Outcome,
    pub termination: Termination,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.outcome, self.termination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_strings() {
        for s in ["1-0", "0-1", "1/2-1/2"] {
            assert_eq!(s.parse::<Outcome>().map(|o| o.to_string()).as_deref(), Ok(s));
        }
        assert_eq!("*".parse::<Outcome>(), Err(ParseOutcomeError));
        assert_eq!(Outcome::from_winner(None), Outcome::Draw);
    }

    #[test]
    fn test_termination_names() {
        assert_eq!(
            "threefold-repetition".parse(),
            Ok(Termination::ThreefoldRepetition)
        );
        assert_eq!(Termination::Giveaway.to_string(), "giveaway");
    }
}
