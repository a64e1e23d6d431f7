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

//! Rule variants.
//!
//! Variants are games played with normal chess pieces but special rules.
//! A [`RuleConfig`] is a set of flags that is consulted by move generation,
//! move execution and game end detection.
//!
//! # Examples
//!
//! ```
//! use rookery::RuleConfig;
//!
//! let rules: RuleConfig = "chess960+threecheck".parse()?;
//! assert!(rules.is_chess960());
//! assert!(rules.contains(RuleConfig::THREE_CHECK));
//! assert_eq!(rules.to_string(), "chess960+threecheck");
//! # Ok::<_, rookery::rules::ParseRulesError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use bitflags::bitflags;
use rand::Rng;

use crate::role::Role;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Scharnagl number of the standard back rank among the 960 starting
/// positions.
pub const STANDARD_CHESS960_NUMBER: u16 = 518;

const NORMAL_PROMOTIONS: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];
const GIVEAWAY_PROMOTIONS: [Role; 1] = [Role::King];

bitflags! {
    /// Variant flags.
    ///
    /// The empty set is standard chess.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct RuleConfig: u8 {
        /// Captures are compulsory, the king is an ordinary piece and the
        /// side that runs out of pieces or moves wins.
        const GIVEAWAY = 1 << 0;
        /// Shuffled back rank, castling relative to the rook's square.
        const CHESS960 = 1 << 1;
        /// Bringing the king to one of the four centre squares wins.
        const KING_OF_THE_HILL = 1 << 2;
        /// Giving check for the third time wins.
        const THREE_CHECK = 1 << 3;
        /// Castling is never available.
        const NO_CASTLING = 1 << 4;
        /// En passant captures are never available.
        const NO_EN_PASSANT = 1 << 5;
    }
}

const NAMES: [(RuleConfig, &str); 6] = [
    (RuleConfig::GIVEAWAY, "giveaway"),
    (RuleConfig::CHESS960, "chess960"),
    (RuleConfig::KING_OF_THE_HILL, "kingofthehill"),
    (RuleConfig::THREE_CHECK, "threecheck"),
    (RuleConfig::NO_CASTLING, "nocastling"),
    (RuleConfig::NO_EN_PASSANT, "noenpassant"),
];

impl RuleConfig {
    /// Standard chess.
    pub const fn standard() -> RuleConfig {
        RuleConfig::empty()
    }

    /// Giveaway as usually played: no castling.
    pub const fn giveaway() -> RuleConfig {
        RuleConfig::GIVEAWAY.union(RuleConfig::NO_CASTLING)
    }

    pub const fn is_giveaway(self) -> bool {
        self.contains(RuleConfig::GIVEAWAY)
    }

    pub const fn is_chess960(self) -> bool {
        self.contains(RuleConfig::CHESS960)
    }

    /// Whether moves that leave the own king attacked are filtered out.
    pub const fn king_safety(self) -> bool {
        !self.is_giveaway()
    }

    pub const fn castling_enabled(self) -> bool {
        !self.contains(RuleConfig::NO_CASTLING)
    }

    pub const fn en_passant_enabled(self) -> bool {
        !self.contains(RuleConfig::NO_EN_PASSANT)
    }

    /// Roles a pawn may promote to, in the order they are offered.
    pub const fn promotion_roles(self) -> &'static [Role] {
        if self.is_giveaway() {
            &GIVEAWAY_PROMOTIONS
        } else {
            &NORMAL_PROMOTIONS
        }
    }

    /// Starting position for these rules, as set up by
    /// [`Board::new()`](crate::Board::new). Chess960 games start from the
    /// standard arrangement unless a number is chosen with
    /// [`chess960_fen`] or [`random_chess960_fen`]. Without castling the
    /// castling field is empty.
    pub fn starting_fen(self) -> String {
        if self.castling_enabled() {
            STARTING_FEN.to_owned()
        } else {
            STARTING_FEN.replace(" KQkq ", " - ")
        }
    }
}

impl fmt::Display for RuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("standard")?;
        }
        Ok(())
    }
}

/// Error when parsing an unknown variant name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseRulesError;

impl fmt::Display for ParseRulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid rule set")
    }
}

impl Error for ParseRulesError {}

impl FromStr for RuleConfig {
    type Err = ParseRulesError;

    fn from_str(s: &str) -> Result<RuleConfig, ParseRulesError> {
        let mut rules = RuleConfig::empty();
        for part in s.split('+') {
            match part.trim() {
                "standard" | "chess" => (),
                "3check" => rules |= RuleConfig::THREE_CHECK,
                "antichess" => rules |= RuleConfig::giveaway(),
                name => {
                    let (flag, _) = NAMES
                        .iter()
                        .find(|(_, n)| *n == name)
                        .ok_or(ParseRulesError)?;
                    rules |= *flag;
                }
            }
        }
        Ok(rules)
    }
}

/// Back rank (from the a-file to the h-file) of the Chess960 starting
/// position with the given Scharnagl number, or `None` if `number >= 960`.
pub fn chess960_back_rank(number: u16) -> Option<[Role; 8]> {
    if number >= 960 {
        return None;
    }

    let mut rank: [Option<Role>; 8] = [None; 8];

    let n = usize::from(number);
    rank[(n % 4) * 2 + 1] = Some(Role::Bishop);
    let n = n / 4;
    rank[(n % 4) * 2] = Some(Role::Bishop);
    let n = n / 4;
    let queen = n % 6;
    let knights = n / 6;

    place_nth_empty(&mut rank, queen, Role::Queen);

    const KNIGHTS: [(usize, usize); 10] = [
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 4),
        (1, 2),
        (1, 3),
        (1, 4),
        (2, 3),
        (2, 4),
        (3, 4),
    ];
    let (first, second) = KNIGHTS[knights];
    // Place the later knight first so the earlier index stays valid.
    place_nth_empty(&mut rank, second, Role::Knight);
    place_nth_empty(&mut rank, first, Role::Knight);

    place_nth_empty(&mut rank, 0, Role::Rook);
    place_nth_empty(&mut rank, 0, Role::King);
    place_nth_empty(&mut rank, 0, Role::Rook);

    let mut result = [Role::Pawn; 8];
    for (slot, role) in result.iter_mut().zip(rank) {
        *slot = role?;
    }
    Some(result)
}

fn place_nth_empty(rank: &mut [Option<Role>; 8], n: usize, role: Role) {
    if let Some(slot) = rank.iter_mut().filter(|r| r.is_none()).nth(n) {
        *slot = Some(role);
    }
}

/// FEN of the Chess960 starting position with the given Scharnagl number.
///
/// # Examples
///
/// ```
/// use rookery::rules::{chess960_fen, STARTING_FEN};
///
/// assert_eq!(chess960_fen(518).as_deref(), Some(STARTING_FEN));
/// assert_eq!(chess960_fen(960), None);
/// ```
pub fn chess960_fen(number: u16) -> Option<String> {
    let back_rank = chess960_back_rank(number)?;
    let black: String = back_rank.iter().map(|r| r.char()).collect();
    let white: String = back_rank.iter().map(|r| r.upper_char()).collect();
    Some(format!(
        "{black}/pppppppp/8/8/8/8/PPPPPPPP/{white} w KQkq - 0 1"
    ))
}

/// FEN of a uniformly chosen Chess960 starting position.
pub fn random_chess960_fen<R: Rng>(rng: &mut R) -> String {
    let number = rng.random_range(0..960);
    match chess960_fen(number) {
        Some(fen) => fen,
        None => STARTING_FEN.to_owned(),
    }
}
