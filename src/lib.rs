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

//! A tile-based chess rules engine with variants and branching history.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use rookery::{Board, RuleConfig};
//!
//! let board = Board::new(RuleConfig::standard());
//! assert_eq!(board.legal_moves().len(), 20);
//! ```
//!
//! Play moves, by clicks or directly:
//!
//! ```
//! use rookery::{Board, RuleConfig, Selected};
//!
//! let mut board = Board::new(RuleConfig::standard());
//!
//! let f2 = board.square("f2")?;
//! let f3 = board.square("f3")?;
//! assert!(matches!(board.select(f2), Selected::Picked { .. }));
//! assert!(matches!(board.select(f3), Selected::Moved(_)));
//!
//! for uci in ["e7e5", "g2g4", "d8h4"] {
//!     board.play_uci(uci)?;
//! }
//! assert!(board.is_checkmate());
//! assert_eq!(board.tree().movetext(), "1. f3 e5 2. g4 Qh4#");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use rookery::{Board, Outcome, RuleConfig, Termination};
//!
//! let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", RuleConfig::standard())?;
//! let result = board.check_result().expect("game over");
//! assert_eq!(result.outcome, Outcome::Draw);
//! assert_eq!(result.termination, Termination::Stalemate);
//! # Ok::<_, rookery::fen::ParseFenError>(())
//! ```
//!
//! Variants are selected with a [`RuleConfig`]:
//!
//! ```
//! use rookery::{Board, RuleConfig};
//!
//! let board = Board::new(RuleConfig::giveaway());
//! assert!(!board.rules().king_safety());
//! ```
//!
//! # Coordinates
//!
//! Squares are screen coordinates `(row, col)`, with row `0` at the top. The
//! board can be flipped with [`Board::flip_board()`]. Use
//! [`Board::square()`] and [`Board::square_name()`] to convert from and to
//! algebraic names in the current orientation.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   rules, colors, roles and outcomes.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//! * `arbitrary`: Implements `arbitrary::Arbitrary` for fuzzing.

#![doc(html_root_url = "https://docs.rs/rookery/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod engine;
mod errors;
mod m;
mod perft;
mod piece;
mod player;
mod role;
mod square;
mod tile;

pub mod board;
pub mod fen;
pub mod outcome;
pub mod rules;
pub mod select;
pub mod sound;
pub mod tree;
pub mod uci;

pub use board::Board;
pub use castling_side::{ByCastlingSide, CastlingRights, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use engine::{MoveSource, RandomMover};
pub use errors::{MoveError, PlayError};
pub use m::{Castling, Move};
pub use outcome::{GameResult, Outcome, ParseOutcomeError, Termination};
pub use perft::perft;
pub use piece::{Piece, SquareList};
pub use player::Player;
pub use role::{ByRole, Role};
pub use rules::RuleConfig;
pub use select::{Selected, Selection};
pub use sound::{Sound, SoundSink};
pub use square::{InvalidPosition, Orientation, ParseSquareError, Square, SquareName};
pub use tile::{Grid, Simulation, Tile};
pub use tree::{MoveNode, MoveTree, NodeId, Snapshot};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}
