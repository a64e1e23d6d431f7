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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! ```
//! use rookery::{Board, RuleConfig};
//!
//! let fen = "r1bqkbnr/ppp2Qpp/2np4/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4";
//! let board = Board::from_fen(fen, RuleConfig::standard())?;
//! assert!(board.is_checkmate());
//! assert_eq!(board.fen(), fen);
//! # Ok::<_, rookery::fen::ParseFenError>(())
//! ```

use std::{error::Error, fmt, fmt::Write as _};

use tracing::debug;

use crate::{
    board::Board,
    castling_side::{castling_rights_fen, CastlingRights, CastlingSide},
    color::Color,
    piece::Piece,
    role::Role,
    rules::RuleConfig,
};

/// The six fields of a FEN.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum FenField {
    /// The FEN does not have exactly six fields.
    FieldCount,
    Placement,
    Turn,
    Castling,
    EnPassant,
    HalfMoves,
    FullMoves,
}

impl FenField {
    pub const fn name(self) -> &'static str {
        match self {
            FenField::FieldCount => "field count",
            FenField::Placement => "piece placement",
            FenField::Turn => "turn",
            FenField::Castling => "castling rights",
            FenField::EnPassant => "en passant square",
            FenField::HalfMoves => "half-move clock",
            FenField::FullMoves => "full-move number",
        }
    }
}

/// Error when parsing an invalid FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseFenError {
    pub field: FenField,
    pub reason: &'static str,
}

impl ParseFenError {
    const fn new(field: FenField, reason: &'static str) -> ParseFenError {
        ParseFenError { field, reason }
    }
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fen: {}: {}", self.field.name(), self.reason)
    }
}

impl Error for ParseFenError {}

impl Board {
    /// Sets up a game from a FEN. The position becomes the root of the move
    /// tree and the board is drawn with white at the bottom.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] naming the first malformed field.
    pub fn from_fen(fen: &str, rules: RuleConfig) -> Result<Board, ParseFenError> {
        parse_fen(fen, rules).inspect_err(|err| debug!(%err, fen, "rejected fen"))
    }

    /// FEN of the current position, independent of the board orientation.
    pub fn fen(&self) -> String {
        let mut fen = self.grid.board_fen();
        let _ = write!(
            fen,
            " {} {} ",
            self.turn.char(),
            castling_rights_fen(&self.castling)
        );
        match self.en_passant {
            Some(sq) => {
                let _ = write!(fen, "{}", self.square_name(sq));
            }
            None => fen.push('-'),
        }
        let _ = write!(fen, " {} {}", self.half_moves, self.full_moves);
        fen
    }
}

fn parse_fen(fen: &str, rules: RuleConfig) -> Result<Board, ParseFenError> {
    let fields: Vec<&str> = fen.split_ascii_whitespace().collect();
    let [placement, turn, castling, en_passant, half_moves, full_moves] = fields[..] else {
        return Err(ParseFenError::new(FenField::FieldCount, "expected 6 fields"));
    };

    let mut board = Board::empty(rules);
    parse_placement(&mut board, placement)?;

    board.turn = match turn {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(ParseFenError::new(FenField::Turn, "expected w or b")),
    };

    board.castling = parse_castling(castling)?;
    let granted = board.castling;
    board.find_castling_rooks();
    if board.castling != granted {
        return Err(ParseFenError::new(
            FenField::Castling,
            "castling right without king and rook in place",
        ));
    }

    if en_passant != "-" {
        let sq = board
            .square(en_passant)
            .map_err(|_| ParseFenError::new(FenField::EnPassant, "invalid square"))?;
        let orientation = board.orientation();
        if orientation.relative_rank(sq, board.turn.is_white()) != 5 {
            return Err(ParseFenError::new(FenField::EnPassant, "wrong rank"));
        }
        let pushed = sq
            .offset(-board.grid.forward(board.turn), 0)
            .and_then(|pushed| board.get_piece(pushed));
        if pushed != Some(Role::Pawn.of(!board.turn)) {
            return Err(ParseFenError::new(FenField::EnPassant, "no pushed pawn"));
        }
        if rules.en_passant_enabled() {
            board.en_passant = Some(sq);
        }
    }

    board.half_moves = btoi::btou(half_moves.as_bytes())
        .map_err(|_| ParseFenError::new(FenField::HalfMoves, "expected a number"))?;
    board.full_moves = btoi::btou(full_moves.as_bytes())
        .map_err(|_| ParseFenError::new(FenField::FullMoves, "expected a number"))?;
    if board.full_moves == 0 {
        return Err(ParseFenError::new(FenField::FullMoves, "must be positive"));
    }

    // Played positions only keep a target that can be taken.
    if !board.has_legal_en_passant() {
        board.en_passant = None;
    }

    board.reset_tree();
    Ok(board)
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), ParseFenError> {
    let err = |reason| ParseFenError::new(FenField::Placement, reason);
    let orientation = board.orientation();

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(err("expected 8 ranks"));
    }

    for (rank_text, rank) in ranks.into_iter().zip((0..8).rev()) {
        let mut file = 0u8;
        for ch in rank_text.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(err("invalid empty square run"));
                }
                file += run as u8;
            } else {
                let piece = Piece::from_char(ch).ok_or_else(|| err("unknown piece letter"))?;
                if file >= 8 {
                    return Err(err("too many files in rank"));
                }
                board.put(orientation.square(file, rank), piece);
                file += 1;
            }
            if file > 8 {
                return Err(err("too many files in rank"));
            }
        }
        if file != 8 {
            return Err(err("too few files in rank"));
        }
    }

    if !board.rules().is_giveaway()
        && Color::ALL
            .into_iter()
            .any(|color| board.player(color).count_role(Role::King) > 1)
    {
        return Err(err("more than one king of a color"));
    }

    Ok(())
}

fn parse_castling(castling: &str) -> Result<CastlingRights, ParseFenError> {
    let err = |reason| ParseFenError::new(FenField::Castling, reason);
    let mut rights = CastlingRights::default();
    if castling == "-" {
        return Ok(rights);
    }
    for ch in castling.chars() {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let side = match ch.to_ascii_lowercase() {
            'k' => CastlingSide::KingSide,
            'q' => CastlingSide::QueenSide,
            _ => return Err(err("expected letters from KQkq")),
        };
        let right = rights.get_mut(color).get_mut(side);
        if *right {
            return Err(err("repeated letter"));
        }
        *right = true;
    }
    Ok(rights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::STARTING_FEN;

    fn field(fen: &str) -> Option<FenField> {
        Board::from_fen(fen, RuleConfig::standard())
            .err()
            .map(|err| err.field)
    }

    #[test]
    fn test_round_trip() {
        for fen in [
            STARTING_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "4k3/8/8/8/8/8/8/4K2R b K - 17 42",
        ] {
            let board = Board::from_fen(fen, RuleConfig::standard()).expect("valid fen");
            assert_eq!(board.fen(), fen);
            assert_eq!(board.to_string(), fen);
        }
    }

    #[test]
    fn test_errors_name_field() {
        assert_eq!(field("8/8/8/8/8/8/8/8 w - - 0"), Some(FenField::FieldCount));
        assert_eq!(field("8/8/8/8/8/8/8 w - - 0 1"), Some(FenField::Placement));
        assert_eq!(field("8/8/8/8/8/8/8/9 w - - 0 1"), Some(FenField::Placement));
        assert_eq!(field("8/8/8/8/8/8/8/7xx w - - 0 1"), Some(FenField::Placement));
        assert_eq!(field("8/8/8/8/8/8/8/K6K w - - 0 1"), Some(FenField::Placement));
        assert_eq!(field("8/8/8/8/8/8/8/K7 x - - 0 1"), Some(FenField::Turn));
        assert_eq!(field("4k3/8/8/8/8/8/8/4K3 w KX - 0 1"), Some(FenField::Castling));
        assert_eq!(field("4k3/8/8/8/8/8/8/4K3 w K - 0 1"), Some(FenField::Castling));
        assert_eq!(field("4k3/8/8/8/8/8/8/4K3 w - e3 0 1"), Some(FenField::EnPassant));
        assert_eq!(field("4k3/8/8/8/8/8/8/4K3 w - e6 0 1"), Some(FenField::EnPassant));
        assert_eq!(field("4k3/8/8/8/8/8/8/4K3 w - - x 1"), Some(FenField::HalfMoves));
        assert_eq!(field("4k3/8/8/8/8/8/8/4K3 w - - 0 0"), Some(FenField::FullMoves));
        assert_eq!(field("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), None);
    }

    #[test]
    fn test_flipped_fen() {
        let mut board = Board::from_fen(
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            RuleConfig::standard(),
        )
        .expect("valid fen");
        let fen = board.fen();
        board.flip_board();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn test_uncapturable_en_passant_dropped() {
        let board = Board::from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            RuleConfig::standard(),
        )
        .expect("valid fen");
        assert_eq!(board.en_passant(), None);
        assert_eq!(
            board.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn test_giveaway_promoted_king_round_trip() {
        let mut board = Board::from_fen("8/4P3/8/8/8/8/8/k3K3 w - - 0 1", RuleConfig::giveaway())
            .expect("valid fen");
        board.play_uci("e7e8k").expect("promotes");
        let fen = board.fen();
        assert_eq!(fen, "4K3/8/8/8/8/8/8/k3K3 b - - 0 1");
        let reparsed = Board::from_fen(&fen, RuleConfig::giveaway()).expect("two kings allowed");
        assert_eq!(reparsed.fen(), fen);
        assert_eq!(reparsed.player(Color::White).count_role(Role::King), 2);

        assert!(Board::from_fen(&fen, RuleConfig::standard()).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = Board::from_fen("", RuleConfig::standard()).expect_err("empty fen");
        assert_eq!(err.to_string(), "invalid fen: field count: expected 6 fields");
    }
}
