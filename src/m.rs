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

use std::fmt::Write as _;

use tracing::trace;

use crate::{
    board::Board,
    castling_side::CastlingSide,
    errors::MoveError,
    piece::{self, Piece},
    role::Role,
    sound::Sound,
    square::Square,
    tree::{NodeId, Snapshot},
};

/// Where king and rook go when castling.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Castling {
    pub side: CastlingSide,
    pub rook_from: Square,
    pub king_to: Square,
    pub rook_to: Square,
}

impl Castling {
    fn mirrored(self) -> Castling {
        Castling {
            side: self.side,
            rook_from: self.rook_from.mirrored(),
            king_to: self.king_to.mirrored(),
            rook_to: self.rook_to.mirrored(),
        }
    }
}

/// A move of one piece, with everything needed to execute and undo it.
///
/// The eager flags (capture, castling, en passant) are computed against the
/// board the move was created for. Notation and resulting FEN are filled in
/// once the move is executed.
///
/// Two moves are equal if they move the same piece between the same squares
/// with the same promotion.
#[derive(Clone, Debug)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    capture_square: Option<Square>,
    castling: Option<Castling>,
    promotion: Option<Role>,
    notation: Option<String>,
    fen: Option<String>,
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.piece == other.piece
            && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Move {
    /// Creates a move of the piece on `from` to `to`.
    ///
    /// Legality is not checked. Use [`Move::is_legal()`].
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if `from` is empty, or if a promotion is given
    /// where none is possible or missing where one is required.
    pub fn new(
        board: &Board,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, MoveError> {
        let piece = board.get_piece(from).ok_or(MoveError::EmptySquare)?;
        let promotes = piece.role == Role::Pawn && board.is_promotion_square(piece.color, to);
        match promotion {
            Some(role) if !promotes || !piece.promotion_targets(board.rules()).contains(&role) => {
                Err(MoveError::InvalidPromotion)
            }
            None if promotes => Err(MoveError::MissingPromotion),
            _ => Ok(Move::build(board, piece, from, to, promotion)),
        }
    }

    /// Like [`Move::new()`], but from raw screen coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidPosition`] for coordinates off the board.
    pub fn from_coords(
        board: &Board,
        from: (i16, i16),
        to: (i16, i16),
        promotion: Option<Role>,
    ) -> Result<Move, MoveError> {
        Move::new(board, Square::try_from(from)?, Square::try_from(to)?, promotion)
    }

    pub(crate) fn build(
        board: &Board,
        piece: Piece,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Move {
        let castling = if piece.role == Role::King {
            board.castling_for(piece.color, from, to)
        } else {
            None
        };

        let grid = board.grid();
        let (captured, capture_square) = if castling.is_some() {
            (None, None)
        } else if piece.role == Role::Pawn
            && from.col() != to.col()
            && grid.is_empty(to)
            && piece::is_en_passant_target(board, piece.color, to)
        {
            let pushed = to.offset(-grid.forward(piece.color), 0);
            (pushed.and_then(|sq| grid.piece_at(sq)), pushed)
        } else {
            match grid.piece_at(to) {
                Some(p) if p.color != piece.color => (Some(p), Some(to)),
                _ => (None, None),
            }
        };

        Move {
            from,
            to,
            piece,
            captured,
            capture_square,
            castling,
            promotion,
            notation: None,
            fen: None,
        }
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    /// Target square. For Chess960 castling this is the rook's square.
    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.piece.role
    }

    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Square of the captured piece. Differs from the target square for en
    /// passant.
    pub fn capture_square(&self) -> Option<Square> {
        self.capture_square
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn castling(&self) -> Option<Castling> {
        self.castling
    }

    pub fn is_castle(&self) -> bool {
        self.castling.is_some()
    }

    pub fn is_en_passant(&self) -> bool {
        self.capture_square.is_some_and(|sq| sq != self.to)
    }

    pub fn promotion(&self) -> Option<Role> {
        self.promotion
    }

    /// The piece that ends up on the target square.
    pub fn placed_piece(&self) -> Piece {
        self.promotion
            .map_or(self.piece, |role| role.of(self.piece.color))
    }

    /// Standard algebraic notation, available once the move was executed.
    pub fn notation(&self) -> Option<&str> {
        self.notation.as_deref()
    }

    /// FEN of the position after the move, available once the move was
    /// executed.
    pub fn fen(&self) -> Option<&str> {
        self.fen.as_deref()
    }

    /// Same origin, target and promotion.
    pub(crate) fn same_action(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }

    pub fn is_legal(&self, board: &Board) -> bool {
        board.is_legal(self)
    }

    /// Plays the move on `board` and records it in the move tree.
    ///
    /// The move must be legal. Returns the tree node of the move.
    pub fn execute(mut self, board: &mut Board) -> NodeId {
        let snapshot = board.snapshot();
        let mut notation = self.san(board);

        self.apply(board);

        let check = board.is_king_check();
        if check {
            notation.push(if board.is_stalemate() { '#' } else { '+' });
        }
        trace!(notation = %notation, "executed move");

        let sound = if check {
            Sound::Check
        } else if self.castling.is_some() {
            Sound::Castle
        } else if self.promotion.is_some() {
            Sound::Promote
        } else if self.is_capture() {
            Sound::Capture
        } else {
            Sound::Move
        };

        self.notation = Some(notation);
        self.fen = Some(board.fen());
        let id = board.tree.add(self, snapshot);

        if board.check_game().is_none() {
            board.notify(sound);
        }
        id
    }

    /// Changes placement and counters, without touching the tree.
    pub(crate) fn apply(&self, board: &mut Board) {
        let color = self.piece.color;
        let rights_before = board.castling;
        board.revoke_castling_rights(self);

        match self.castling {
            Some(castle) => {
                board.take(self.from);
                board.take(castle.rook_from);
                board.put(castle.king_to, self.piece);
                board.put(castle.rook_to, Role::Rook.of(color));
            }
            None => {
                if let Some(sq) = self.capture_square {
                    board.take(sq);
                }
                board.take(self.from);
                board.put(self.to, self.placed_piece());
            }
        }

        let pawn = self.piece.role == Role::Pawn;
        if pawn || self.is_capture() || self.castling.is_some() {
            board.half_moves = 0;
        } else {
            board.half_moves += 1;
        }
        if color.is_black() {
            board.full_moves += 1;
        }
        board.turn = !color;
        board.ply += 1;

        if pawn || self.is_capture() || self.castling.is_some() || board.castling != rights_before {
            board.last_irreversible = board.ply;
        }

        board.en_passant = None;
        if pawn && self.from.row().abs_diff(self.to.row()) == 2 && board.rules().en_passant_enabled() {
            board.en_passant = self.from.offset(board.grid().forward(color), 0);
            if !board.has_legal_en_passant() {
                board.en_passant = None;
            }
        }

        if board.is_king_check() {
            let checks = board.checks.get_mut(color);
            *checks = checks.saturating_add(1);
        }
    }

    /// Reverts [`Move::execute()`], restoring counters from `snapshot`.
    ///
    /// Only the tree bookkeeping is left alone: navigate with
    /// [`Board::go_backward()`] to keep the tree in sync.
    pub fn undo(&self, board: &mut Board, snapshot: &Snapshot) {
        match self.castling {
            Some(castle) => {
                board.take(castle.king_to);
                board.take(castle.rook_to);
                board.put(self.from, self.piece);
                board.put(castle.rook_from, Role::Rook.of(self.piece.color));
            }
            None => {
                board.take(self.to);
                board.put(self.from, self.piece);
                if let (Some(sq), Some(captured)) = (self.capture_square, self.captured) {
                    board.put(sq, captured);
                }
            }
        }

        board.restore(snapshot);
        board.turn = self.piece.color;
        board.ply = board.ply.saturating_sub(1);
    }

    /// Mirrors all squares through the board centre.
    pub(crate) fn flip(&mut self) {
        self.from = self.from.mirrored();
        self.to = self.to.mirrored();
        self.capture_square = self.capture_square.map(Square::mirrored);
        self.castling = self.castling.map(Castling::mirrored);
    }

    /// SAN without check suffix, against the position before the move.
    fn san(&self, board: &Board) -> String {
        if let Some(castle) = self.castling {
            return castle.side.notation().to_owned();
        }

        let orientation = board.orientation();
        let mut san = String::with_capacity(7);
        if self.piece.role == Role::Pawn {
            if self.is_capture() {
                san.push(orientation.name(self.from).file_char());
                san.push('x');
            }
        } else {
            san.push(self.piece.role.upper_char());

            let rivals: Vec<Square> = board
                .player(self.piece.color)
                .pieces()
                .get(self.piece.role)
                .iter()
                .copied()
                .filter(|&sq| {
                    sq != self.from
                        && self.piece.calc_moves(board, sq).contains(&self.to)
                        && board.is_legal_ignoring_forced_capture(&Move::build(
                            board, self.piece, sq, self.to, None,
                        ))
                })
                .collect();

            if !rivals.is_empty() {
                let name = orientation.name(self.from);
                let file = orientation.file(self.from);
                let rank = orientation.rank(self.from);
                if rivals.iter().all(|&sq| orientation.file(sq) != file) {
                    san.push(name.file_char());
                } else if rivals.iter().all(|&sq| orientation.rank(sq) != rank) {
                    san.push(name.rank_char());
                } else {
                    san.push(name.file_char());
                    san.push(name.rank_char());
                }
            }

            if self.is_capture() {
                san.push('x');
            }
        }

        let _ = write!(san, "{}", orientation.name(self.to));
        if let Some(role) = self.promotion {
            san.push('=');
            san.push(role.upper_char());
        }
        san
    }
}
