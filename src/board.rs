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

//! The game state.
//!
//! # Examples
//!
//! ```
//! use rookery::{Board, RuleConfig};
//!
//! let board = Board::new(RuleConfig::standard());
//! assert_eq!(board.legal_moves().len(), 20);
//! assert!(!board.is_king_check());
//! assert_eq!(board.check_result(), None);
//! ```

use std::{fmt, sync::Arc};

use tracing::{debug, trace};

use crate::{
    castling_side::{ByCastlingSide, CastlingRights, CastlingSide},
    color::{ByColor, Color},
    errors::{MoveError, PlayError},
    m::{Castling, Move},
    outcome::{GameResult, Outcome, Termination},
    piece::{span_on_row, Piece},
    player::Player,
    role::Role,
    rules::{chess960_back_rank, RuleConfig},
    select::Selection,
    sound::{Sound, SoundSink},
    square::{Orientation, ParseSquareError, Square, SquareName},
    tile::{Grid, Tile},
    tree::{MoveTree, NodeId, Snapshot},
};

/// A chess board with pieces, counters, rules and the history of the game.
///
/// # Equality
///
/// Boards compare equal if they have the same rules and the same
/// [FEN](Board::fen). History, orientation and check counters are ignored.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) players: ByColor<Player>,
    pub(crate) turn: Color,
    pub(crate) castling: CastlingRights,
    /// Files of the rooks that still castle.
    pub(crate) castling_rooks: ByColor<ByCastlingSide<Option<u8>>>,
    pub(crate) en_passant: Option<Square>,
    pub(crate) half_moves: u32,
    pub(crate) full_moves: u32,
    pub(crate) ply: usize,
    pub(crate) last_irreversible: usize,
    pub(crate) checks: ByColor<u8>,
    pub(crate) rules: RuleConfig,
    pub(crate) result: Option<GameResult>,
    pub(crate) tree: MoveTree,
    pub(crate) selection: Selection,
    sound: Option<Arc<dyn SoundSink>>,
}

impl Board {
    /// A game from the standard starting position.
    pub fn new(rules: RuleConfig) -> Board {
        Board::with_back_rank(STANDARD_BACK_RANK, rules)
    }

    /// A Chess960 game from the starting position with the given Scharnagl
    /// number. The [`RuleConfig::CHESS960`] flag is added to `rules`.
    ///
    /// Returns `None` if `number >= 960`.
    pub fn new_chess960(number: u16, rules: RuleConfig) -> Option<Board> {
        let back_rank = chess960_back_rank(number)?;
        Some(Board::with_back_rank(back_rank, rules | RuleConfig::CHESS960))
    }

    fn with_back_rank(back_rank: [Role; 8], rules: RuleConfig) -> Board {
        let mut board = Board::empty(rules);
        let orientation = board.orientation();
        for color in Color::ALL {
            let (back, pawns) = color.fold_wb((0, 1), (7, 6));
            for (file, role) in (0..8).zip(back_rank) {
                board.put(orientation.square(file, back), role.of(color));
                board.put(orientation.square(file, pawns), Role::Pawn.of(color));
            }
        }
        if rules.castling_enabled() {
            board.castling = ByColor::new_with(|_| ByCastlingSide::new_with(|_| true));
        }
        board.find_castling_rooks();
        board.reset_tree();
        board
    }

    /// A board without any pieces.
    pub(crate) fn empty(rules: RuleConfig) -> Board {
        let snapshot = Snapshot {
            en_passant: None,
            castling: CastlingRights::default(),
            half_moves: 0,
            full_moves: 1,
            last_irreversible: 0,
            checks: ByColor::default(),
        };
        Board {
            grid: Grid::empty(Orientation::WhiteBottom),
            players: ByColor::new_with(Player::new),
            turn: Color::White,
            castling: CastlingRights::default(),
            castling_rooks: ByColor::default(),
            en_passant: None,
            half_moves: 0,
            full_moves: 1,
            ply: 0,
            last_irreversible: 0,
            checks: ByColor::default(),
            rules,
            result: None,
            tree: MoveTree::new(String::new(), Color::White, snapshot),
            selection: Selection::Idle,
            sound: None,
        }
    }

    /// Discards the history and makes the current position the root.
    pub(crate) fn reset_tree(&mut self) {
        self.ply = 0;
        self.last_irreversible = 0;
        self.tree = MoveTree::new(self.fen(), self.turn, self.snapshot());
        self.selection = Selection::Idle;
        self.result = self.evaluate();
    }

    /// Remembers which rook castles on each side. Rights without such a
    /// rook are dropped.
    pub(crate) fn find_castling_rooks(&mut self) {
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                let file = self.castling_rook_file(color, side);
                *self.castling_rooks.get_mut(color).get_mut(side) = file;
                if file.is_none() {
                    *self.castling.get_mut(color).get_mut(side) = false;
                }
            }
        }
    }

    /// Nearest own rook on the back rank, scanning outwards from the king.
    /// Standard chess only castles with the corner rooks and a king on the
    /// e-file. A giveaway king promoted elsewhere does not count.
    fn castling_rook_file(&self, color: Color, side: CastlingSide) -> Option<u8> {
        let orientation = self.orientation();
        let king = self
            .player(color)
            .pieces()
            .king
            .iter()
            .copied()
            .find(|&king| orientation.relative_rank(king, color.is_white()) == 0)?;
        let back = orientation.rank(king);
        let rook = Role::Rook.of(color);

        if !self.rules.is_chess960() {
            let file = match side {
                CastlingSide::KingSide => 7,
                CastlingSide::QueenSide => 0,
            };
            return (orientation.file(king) == 4
                && self.get_piece(orientation.square(file, back)) == Some(rook))
            .then_some(file);
        }

        let mut file = i16::from(orientation.file(king));
        loop {
            file += i16::from(side.file_delta());
            if !(0..8).contains(&file) {
                return None;
            }
            let sq = orientation.square(file as u8, back);
            if self.get_piece(sq) == Some(rook) {
                return Some(file as u8);
            }
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.grid.orientation()
    }

    pub fn get_tile(&self, sq: Square) -> &Tile {
        self.grid.tile(sq)
    }

    #[inline]
    pub fn get_piece(&self, sq: Square) -> Option<Piece> {
        self.grid.piece_at(sq)
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.grid.is_empty(sq)
    }

    /// Builds the move of the piece on `from` to `to` without playing it.
    /// Legality is not checked.
    ///
    /// # Errors
    ///
    /// See [`Move::new()`].
    pub fn convert_to_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, MoveError> {
        Move::new(self, from, to, promotion)
    }

    /// Screen square of an algebraic name in the current orientation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if `name` is not a square name.
    pub fn square(&self, name: &str) -> Result<Square, ParseSquareError> {
        self.orientation().parse(name)
    }

    pub fn square_name(&self, sq: Square) -> SquareName {
        self.orientation().name(sq)
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn player(&self, color: Color) -> &Player {
        self.players.get(color)
    }

    pub fn current_player(&self) -> &Player {
        self.players.get(self.turn)
    }

    pub fn waiting_player(&self) -> &Player {
        self.players.get(!self.turn)
    }

    pub fn castling_rights(&self) -> &CastlingRights {
        &self.castling
    }

    /// En passant target square. Only set if an en passant capture is
    /// actually legal.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    pub fn full_moves(&self) -> u32 {
        self.full_moves
    }

    /// Number of checks given by `color`.
    pub fn checks(&self, color: Color) -> u8 {
        *self.checks.get(color)
    }

    #[inline]
    pub fn rules(&self) -> RuleConfig {
        self.rules
    }

    pub fn tree(&self) -> &MoveTree {
        &self.tree
    }

    /// Plies from the root of the tree to the current position.
    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Result of the last [`Board::check_game()`], or of navigating the
    /// tree.
    pub fn check_result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn set_sound_sink(&mut self, sink: Option<Arc<dyn SoundSink>>) {
        self.sound = sink;
    }

    pub(crate) fn notify(&self, sound: Sound) {
        trace!(%sound, "sound");
        if let Some(sink) = &self.sound {
            sink.play_sound(sound);
        }
    }

    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        if let Some(old) = self.grid.set(sq, Some(piece)) {
            self.players.get_mut(old.color).remove(old.role, sq);
        }
        self.players.get_mut(piece.color).add(piece.role, sq);
    }

    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.grid.set(sq, None)?;
        self.players.get_mut(piece.color).remove(piece.role, sq);
        Some(piece)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            en_passant: self.en_passant,
            castling: self.castling,
            half_moves: self.half_moves,
            full_moves: self.full_moves,
            last_irreversible: self.last_irreversible,
            checks: self.checks,
        }
    }

    pub(crate) fn restore(&mut self, snapshot: &Snapshot) {
        self.en_passant = snapshot.en_passant;
        self.castling = snapshot.castling;
        self.half_moves = snapshot.half_moves;
        self.full_moves = snapshot.full_moves;
        self.last_irreversible = snapshot.last_irreversible;
        self.checks = snapshot.checks;
        self.result = None;
    }

    /// Whether `sq` is on the last rank for pawns of `color`.
    pub fn is_promotion_square(&self, color: Color, sq: Square) -> bool {
        self.orientation().relative_rank(sq, color.is_white()) == 7
    }

    /// King and rook placement for castling, if `color` still has the
    /// right and the king stands where castling starts. Occupancy is not
    /// checked.
    pub(crate) fn castling_geometry(
        &self,
        color: Color,
        king: Square,
        side: CastlingSide,
    ) -> Option<Castling> {
        if !self.rules.castling_enabled() || !*self.castling.get(color).get(side) {
            return None;
        }
        let orientation = self.orientation();
        if orientation.relative_rank(king, color.is_white()) != 0 {
            return None;
        }
        if !self.rules.is_chess960() && orientation.file(king) != 4 {
            return None;
        }
        let rook_file = (*self.castling_rooks.get(color).get(side))?;
        let back = orientation.rank(king);
        Some(Castling {
            side,
            rook_from: orientation.square(rook_file, back),
            king_to: orientation.square(side.king_to_file(), back),
            rook_to: orientation.square(side.rook_to_file(), back),
        })
    }

    /// Recognizes a king move from `from` to `to` as castling: onto the own
    /// rook in Chess960, two columns sideways otherwise.
    pub(crate) fn castling_for(&self, color: Color, from: Square, to: Square) -> Option<Castling> {
        let orientation = self.orientation();
        if self.rules.is_chess960() {
            if self.get_piece(to) != Some(Role::Rook.of(color)) || from.row() != to.row() {
                return None;
            }
            let side = CastlingSide::from_king_side(orientation.file(to) > orientation.file(from));
            let castle = self.castling_geometry(color, from, side)?;
            (castle.rook_from == to).then_some(castle)
        } else {
            let dcol = to.col() as i8 - from.col() as i8;
            if from.row() != to.row() || dcol.abs() != 2 {
                return None;
            }
            let side = CastlingSide::from_king_side(dcol * orientation.sign() > 0);
            let castle = self.castling_geometry(color, from, side)?;
            (castle.king_to == to).then_some(castle)
        }
    }

    /// Clears castling rights lost by `m`: all of them when a king moves or
    /// is captured, one when its rook leaves or is captured.
    pub(crate) fn revoke_castling_rights(&mut self, m: &Move) {
        let color = m.piece().color;
        if m.role() == Role::King {
            *self.castling.get_mut(color) = ByCastlingSide::default();
        }
        if let Some(captured) = m.captured().filter(|p| p.role == Role::King) {
            *self.castling.get_mut(captured.color) = ByCastlingSide::default();
        }
        let orientation = self.orientation();
        for c in Color::ALL {
            let back = c.fold_wb(0, 7);
            for side in CastlingSide::ALL {
                if let Some(file) = *self.castling_rooks.get(c).get(side) {
                    let sq = orientation.square(file, back);
                    if m.from() == sq || m.capture_square() == Some(sq) {
                        *self.castling.get_mut(c).get_mut(side) = false;
                    }
                }
            }
        }
    }

    /// Tests if `m` is legal for the side to move.
    pub fn is_legal(&self, m: &Move) -> bool {
        m.piece().color == self.turn
            && self.is_legal_ignoring_forced_capture(m)
            && !(self.rules.is_giveaway()
                && !m.is_capture()
                && self.current_player().has_capture(self))
    }

    /// Everything but the giveaway obligation to capture.
    pub(crate) fn is_legal_ignoring_forced_capture(&self, m: &Move) -> bool {
        let piece = m.piece();
        if self.get_piece(m.from()) != Some(piece)
            || !piece.calc_moves(self, m.from()).contains(&m.to())
        {
            return false;
        }

        let promotes = piece.role == Role::Pawn && self.is_promotion_square(piece.color, m.to());
        match m.promotion() {
            Some(role) if !promotes || !piece.promotion_targets(self.rules).contains(&role) => {
                return false
            }
            None if promotes => return false,
            _ => (),
        }

        if !self.rules.king_safety() {
            return true;
        }

        if let Some(castle) = m.castling() {
            // King and rook do not shield the path they are leaving.
            let mut path = self.grid;
            path.set(m.from(), None);
            path.set(castle.rook_from, None);
            if span_on_row(m.from(), castle.king_to).any(|sq| path.is_attacked(sq, !piece.color)) {
                return false;
            }
        }

        let mut scratch = self.grid;
        self.is_safe_on(&mut scratch, m)
    }

    /// Simulates `m` on `scratch` and tests if the own king survives.
    fn is_safe_on(&self, scratch: &mut Grid, m: &Move) -> bool {
        let color = m.piece().color;
        let king = if m.role() == Role::King {
            Some(m.castling().map_or(m.to(), |castle| castle.king_to))
        } else {
            self.player(color).king()
        };
        let simulation = scratch.simulate(m);
        let safe = king.is_none_or(|king| !scratch.is_attacked(king, !color));
        scratch.unsimulate(simulation);
        safe
    }

    /// Whether the side to move can capture en passant on the current
    /// target square.
    pub(crate) fn has_legal_en_passant(&self) -> bool {
        let Some(target) = self.en_passant else {
            return false;
        };
        let pawn = Role::Pawn.of(self.turn);
        let behind = -self.grid.forward(self.turn);
        [-1, 1].into_iter().any(|dcol| {
            target
                .offset(behind, dcol)
                .filter(|&from| self.get_piece(from) == Some(pawn))
                .is_some_and(|from| self.is_legal(&Move::build(self, pawn, from, target, None)))
        })
    }

    /// Legal moves of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.current_player().get_legal_moves(self)
    }

    /// Legal destinations of the piece on `from`, if it belongs to the side
    /// to move. Promotions are reported once per square.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let mut destinations: Vec<Square> = self
            .legal_moves()
            .into_iter()
            .filter(|m| m.from() == from)
            .map(|m| m.to())
            .collect();
        destinations.dedup();
        destinations
    }

    /// Whether the side to move is in check.
    pub fn is_king_check(&self) -> bool {
        self.current_player().is_king_check(self)
    }

    /// Whether the side to move has no legal move at all.
    pub fn is_stalemate(&self) -> bool {
        !self.current_player().has_legal_move(self)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_king_check() && self.is_stalemate()
    }

    /// Draw by lack of mating material, judged from piece counts alone:
    /// bare kings, king and minor piece against king, or one bishop each on
    /// squares of the same color. Positions with more than four pieces never
    /// qualify.
    pub fn is_insufficient_material(&self) -> bool {
        let white = self.player(Color::White);
        let black = self.player(Color::Black);
        match white.count() + black.count() {
            0..=2 => true,
            3 => [white, black].iter().any(|player| {
                player.count_role(Role::Bishop) == 1 || player.count_role(Role::Knight) == 1
            }),
            4 => {
                let (Some(&wb), Some(&bb)) = (
                    white.pieces().bishop.first(),
                    black.pieces().bishop.first(),
                ) else {
                    return false;
                };
                white.count() == 2
                    && black.count() == 2
                    && white.count_role(Role::Bishop) == 1
                    && black.count_role(Role::Bishop) == 1
                    && wb.is_light() == bb.is_light()
            }
            _ => false,
        }
    }

    /// Whether some position occurred three times since the last capture,
    /// pawn move, castling or loss of castling rights. Positions are
    /// compared by placement, turn, castling rights and en passant square.
    pub fn is_threefold_repetition(&self) -> bool {
        let keys: Vec<&str> = self
            .tree
            .ancestors()
            .take_while(|node| node.depth() >= self.last_irreversible)
            .map(|node| node.position_key())
            .collect();
        keys.iter()
            .any(|key| keys.iter().filter(|other| *other == key).count() >= 3)
    }

    /// Decides the game without side effects.
    ///
    /// Variant wins are tested first, then checkmate, stalemate, the
    /// fifty-move rule, insufficient material and repetition.
    pub fn evaluate(&self) -> Option<GameResult> {
        let result = |outcome, termination| Some(GameResult { outcome, termination });
        let mover = !self.turn;

        if self.rules.contains(RuleConfig::KING_OF_THE_HILL) {
            let orientation = self.orientation();
            for color in Color::ALL {
                let on_hill = self.player(color).pieces().king.iter().any(|&king| {
                    (3..=4).contains(&orientation.file(king)) && (3..=4).contains(&orientation.rank(king))
                });
                if on_hill {
                    return result(Outcome::Decisive { winner: color }, Termination::KingOfTheHill);
                }
            }
        }

        if self.rules.contains(RuleConfig::THREE_CHECK) {
            if let Some(winner) = self.checks.find(|&n| n >= 3) {
                return result(Outcome::Decisive { winner }, Termination::ThreeChecks);
            }
        }

        if self.rules.is_giveaway()
            && (self.current_player().count() == 0 || self.is_stalemate())
        {
            return result(Outcome::Decisive { winner: self.turn }, Termination::Giveaway);
        }

        if self.is_stalemate() {
            return if self.is_king_check() {
                result(Outcome::Decisive { winner: mover }, Termination::Checkmate)
            } else {
                result(Outcome::Draw, Termination::Stalemate)
            };
        }

        if self.half_moves >= 100 {
            return result(Outcome::Draw, Termination::FiftyMoves);
        }

        let insufficient = if self.rules.is_giveaway()
            || self.rules.contains(RuleConfig::KING_OF_THE_HILL)
        {
            false
        } else if self.rules.contains(RuleConfig::THREE_CHECK) {
            self.player(Color::White).count() + self.player(Color::Black).count() <= 2
        } else {
            self.is_insufficient_material()
        };
        if insufficient {
            return result(Outcome::Draw, Termination::InsufficientMaterial);
        }

        if self.is_threefold_repetition() {
            return result(Outcome::Draw, Termination::ThreefoldRepetition);
        }

        None
    }

    /// Evaluates the game, stores and returns the result. Announces the end
    /// of the game once.
    pub fn check_game(&mut self) -> Option<GameResult> {
        let result = self.evaluate();
        if let Some(result) = result {
            if self.result.is_none() {
                debug!(%result, "game over");
                self.notify(Sound::GameEnd);
            }
        }
        self.result = result;
        result
    }

    /// Validates and executes `m`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the game is over or `m` is not legal.
    pub fn play(&mut self, m: Move) -> Result<NodeId, PlayError> {
        if self.result.is_some() {
            return Err(PlayError::GameOver);
        }
        if !self.is_legal(&m) {
            debug!(from = %self.square_name(m.from()), to = %self.square_name(m.to()), "illegal move");
            return Err(PlayError::IllegalMove);
        }
        Ok(m.execute(self))
    }

    /// Undoes the move leading to the current node. Returns `false` at the
    /// root.
    pub fn go_backward(&mut self) -> bool {
        let node = self.tree.current_node();
        let (Some(parent), Some(m)) = (node.parent(), node.mv().cloned()) else {
            return false;
        };
        let snapshot = node.snapshot().clone();
        m.undo(self, &snapshot);
        self.tree.set_current(parent);
        self.after_navigation();
        true
    }

    /// Replays the continuation with the given index. Returns `false` if
    /// there is none.
    pub fn go_forward(&mut self, index: usize) -> bool {
        let Some(&child) = self.tree.current_node().children().get(index) else {
            return false;
        };
        let Some(m) = self.tree.node(child).and_then(|node| node.mv()).cloned() else {
            return false;
        };
        m.apply(self);
        self.tree.set_current(child);
        self.after_navigation();
        true
    }

    /// Switches to the previous sibling variation, wrapping around.
    pub fn go_previous(&mut self) -> bool {
        self.go_sibling(-1)
    }

    /// Switches to the next sibling variation, wrapping around.
    pub fn go_next(&mut self) -> bool {
        self.go_sibling(1)
    }

    fn go_sibling(&mut self, delta: isize) -> bool {
        let current = self.tree.current();
        let Some(parent) = self.tree.current_node().parent().and_then(|p| self.tree.node(p)) else {
            return false;
        };
        let siblings = parent.children();
        let len = siblings.len() as isize;
        if len < 2 {
            return false;
        }
        let Some(pos) = siblings.iter().position(|&id| id == current) else {
            return false;
        };
        let target = (pos as isize + delta).rem_euclid(len) as usize;
        self.go_backward() && self.go_forward(target)
    }

    /// Undoes everything back to the starting position.
    pub fn go_root(&mut self) {
        while self.go_backward() {}
    }

    /// Follows the main line to its end.
    pub fn go_leaf(&mut self) {
        while self.go_forward(0) {}
    }

    fn after_navigation(&mut self) {
        self.selection = Selection::Idle;
        self.result = self.evaluate();
        trace!(node = self.tree.current().index(), ply = self.ply, "navigated");
    }

    /// Rotates the board by 180 degrees. Squares of pieces, moves and
    /// history are mirrored, the FEN stays the same.
    pub fn flip_board(&mut self) {
        self.grid.flip();
        for color in Color::ALL {
            self.players.get_mut(color).flip();
        }
        self.en_passant = self.en_passant.map(Square::mirrored);
        self.selection = Selection::Idle;
        self.tree.flip_tree();
        debug!(orientation = ?self.orientation(), "flipped board");
    }
}

const STANDARD_BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

impl Default for Board {
    fn default() -> Board {
        Board::new(RuleConfig::standard())
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.rules == other.rules && self.fen() == other.fen()
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::STARTING_FEN;

    fn board(fen: &str, rules: RuleConfig) -> Board {
        Board::from_fen(fen, rules).expect("valid fen")
    }

    fn mv(board: &Board, from: &str, to: &str) -> Move {
        Move::new(
            board,
            board.square(from).expect("valid"),
            board.square(to).expect("valid"),
            None,
        )
        .expect("valid move")
    }

    #[test]
    fn test_new_board() {
        let board = Board::new(RuleConfig::standard());
        assert_eq!(board.fen(), STARTING_FEN);
        assert_eq!(board, Board::from_fen(STARTING_FEN, RuleConfig::standard()).expect("valid"));
        assert_eq!(board.to_string(), STARTING_FEN);

        for rules in [
            RuleConfig::standard(),
            RuleConfig::giveaway(),
            RuleConfig::NO_CASTLING,
            RuleConfig::KING_OF_THE_HILL | RuleConfig::NO_EN_PASSANT,
        ] {
            assert_eq!(Board::new(rules).fen(), rules.starting_fen());
        }
        assert_eq!(
            RuleConfig::giveaway().starting_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
        );
    }

    #[test]
    fn test_new_chess960() {
        let board = Board::new_chess960(0, RuleConfig::standard()).expect("in range");
        assert!(board.rules().is_chess960());
        assert_eq!(
            board.fen(),
            "bbqnnrkr/pppppppp/8/8/8/8/PPPPPPPP/BBQNNRKR w KQkq - 0 1"
        );
        assert_eq!(board.legal_moves().len(), 20);
        assert!(Board::new_chess960(960, RuleConfig::standard()).is_none());
    }

    #[test]
    fn test_castling_through_check() {
        let b = board("4k3/8/8/8/8/8/5r2/4K2R w K - 0 1", RuleConfig::standard());
        assert!(!b.is_legal(&mv(&b, "e1", "g1")));

        let b = board("4k3/8/8/8/8/8/6r1/4K2R w K - 0 1", RuleConfig::standard());
        assert!(!b.is_legal(&mv(&b, "e1", "g1")));

        let b = board("4k3/8/8/8/8/8/7r/4K2R w K - 0 1", RuleConfig::standard());
        assert!(b.is_legal(&mv(&b, "e1", "g1")));
    }

    #[test]
    fn test_castling_out_of_check() {
        let b = board("4k3/8/8/8/8/8/4r3/4K2R w K - 0 1", RuleConfig::standard());
        assert!(b.is_king_check());
        assert!(!b.is_legal(&mv(&b, "e1", "g1")));
    }

    #[test]
    fn test_no_castling_rule() {
        let b = board(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            RuleConfig::NO_CASTLING,
        );
        assert!(!b.is_legal(&mv(&b, "e1", "g1")));
        assert_eq!(b.legal_moves().iter().filter(|m| m.is_castle()).count(), 0);
    }

    #[test]
    fn test_rook_capture_revokes_rights() {
        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", RuleConfig::standard());
        b.play(mv(&b, "a1", "a8")).expect("legal");
        assert_eq!(b.fen(), "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
    }

    #[test]
    fn test_king_capture_revokes_rights() {
        let mut b = board("8/8/8/8/8/8/3b4/4K2R b K - 0 1", RuleConfig::GIVEAWAY);
        b.play(mv(&b, "d2", "e1")).expect("legal");
        assert_eq!(b.fen(), "8/8/8/8/8/8/8/4b2R w - - 0 2");
        assert_eq!(board(&b.fen(), RuleConfig::GIVEAWAY), b);
    }

    #[test]
    fn test_en_passant_only_when_capturable() {
        let mut b = Board::new(RuleConfig::standard());
        b.play(mv(&b, "e2", "e4")).expect("legal");
        assert_eq!(b.en_passant(), None);

        let mut b = board("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1", RuleConfig::standard());
        b.play(mv(&b, "e2", "e4")).expect("legal");
        assert_eq!(b.en_passant(), b.square("e3").ok());
        let capture = mv(&b, "d4", "e3");
        assert!(capture.is_en_passant());
        b.play(capture).expect("legal");
        assert_eq!(b.fen(), "4k3/8/8/8/8/4p3/8/4K3 w - - 0 2");
    }

    #[test]
    fn test_no_en_passant_rule() {
        let mut b = board("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1", RuleConfig::NO_EN_PASSANT);
        b.play(mv(&b, "e2", "e4")).expect("legal");
        assert_eq!(b.en_passant(), None);
    }

    #[test]
    fn test_pinned_en_passant_not_offered() {
        let mut b = board("8/8/8/8/k2p3R/8/4P3/4K3 w - - 0 1", RuleConfig::standard());
        b.play(mv(&b, "e2", "e4")).expect("legal");
        assert_eq!(b.en_passant(), None);
    }

    #[test]
    fn test_fools_mate() {
        let b = board(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            RuleConfig::standard(),
        );
        assert!(b.is_king_check());
        assert!(b.is_checkmate());
        assert_eq!(
            b.check_result(),
            Some(GameResult {
                outcome: Outcome::Decisive {
                    winner: Color::Black
                },
                termination: Termination::Checkmate,
            })
        );
    }

    #[test]
    fn test_stalemate() {
        let b = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", RuleConfig::standard());
        assert!(b.is_stalemate());
        assert!(!b.is_king_check());
        assert_eq!(
            b.check_result().map(|r| r.termination),
            Some(Termination::Stalemate)
        );
    }

    #[test]
    fn test_insufficient_material() {
        let cases = [
            ("8/8/8/4k3/8/8/8/4K3 w - - 0 1", true),
            ("8/8/8/4k3/8/8/8/3BK3 w - - 0 1", true),
            ("8/8/8/4k3/8/8/8/3NK3 w - - 0 1", true),
            ("8/8/8/4k3/8/8/8/3RK3 w - - 0 1", false),
            ("8/8/8/4k1b1/8/8/8/2B1K3 w - - 0 1", true),
            ("8/8/8/4kb2/8/8/8/2B1K3 w - - 0 1", false),
            ("8/8/8/4k3/8/8/8/2BBK3 w - - 0 1", false),
            ("8/8/8/4kn2/8/8/8/2B1K3 w - - 0 1", false),
        ];
        for (fen, expected) in cases {
            assert_eq!(
                board(fen, RuleConfig::standard()).is_insufficient_material(),
                expected,
                "{fen}"
            );
        }
    }

    #[test]
    fn test_giveaway_rules() {
        let b = board("8/8/8/8/8/8/8/K6k w - - 0 1", RuleConfig::giveaway());
        assert!(!b.is_king_check());
        assert_eq!(b.check_result(), None);

        let b = board("8/8/8/8/8/8/8/7k w - - 0 1", RuleConfig::giveaway());
        assert_eq!(
            b.check_result(),
            Some(GameResult {
                outcome: Outcome::Decisive {
                    winner: Color::White
                },
                termination: Termination::Giveaway,
            })
        );
    }

    #[test]
    fn test_king_of_the_hill() {
        let mut b = board("4k3/8/8/8/8/4K3/8/8 w - - 0 1", RuleConfig::KING_OF_THE_HILL);
        b.play(mv(&b, "e3", "e4")).expect("legal");
        assert_eq!(
            b.check_result(),
            Some(GameResult {
                outcome: Outcome::Decisive {
                    winner: Color::White
                },
                termination: Termination::KingOfTheHill,
            })
        );
        assert_eq!(b.play(mv(&b, "e8", "e7")), Err(PlayError::GameOver));
    }

    #[test]
    fn test_three_check() {
        let mut b = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", RuleConfig::THREE_CHECK);
        for (from, to) in [
            ("a1", "a8"),
            ("e8", "e7"),
            ("a8", "a7"),
            ("e7", "e6"),
            ("a7", "a6"),
        ] {
            b.play(mv(&b, from, to)).expect("legal");
        }
        assert_eq!(b.checks(Color::White), 3);
        assert_eq!(
            b.check_result().map(|r| r.termination),
            Some(Termination::ThreeChecks)
        );
    }

    #[test]
    fn test_fifty_moves() {
        let mut b = board("4k3/8/8/8/8/8/8/R3K3 w - - 99 80", RuleConfig::standard());
        b.play(mv(&b, "a1", "b1")).expect("legal");
        assert_eq!(
            b.check_result().map(|r| r.termination),
            Some(Termination::FiftyMoves)
        );
    }

    #[test]
    fn test_navigation() {
        let mut b = Board::new(RuleConfig::standard());
        b.play(mv(&b, "e2", "e4")).expect("legal");
        b.play(mv(&b, "e7", "e5")).expect("legal");
        let after = b.fen();

        assert!(b.go_backward());
        assert!(b.go_backward());
        assert!(!b.go_backward());
        assert_eq!(b.fen(), STARTING_FEN);

        b.play(mv(&b, "d2", "d4")).expect("legal");
        assert!(b.go_backward());
        assert_eq!(b.tree().current_node().children().len(), 2);

        assert!(b.go_forward(0));
        assert!(b.go_next());
        assert_eq!(b.tree().current_node().mv().and_then(|m| m.notation()), Some("d4"));
        assert!(b.go_previous());
        assert_eq!(b.tree().current_node().mv().and_then(|m| m.notation()), Some("e4"));

        b.go_leaf();
        assert_eq!(b.fen(), after);
        assert_eq!(b.tree().movetext(), "1. e4 e5");
        b.go_root();
        assert_eq!(b.ply(), 0);
    }

    #[test]
    fn test_replaying_a_move_reuses_node() {
        let mut b = Board::new(RuleConfig::standard());
        let first = b.play(mv(&b, "g1", "f3")).expect("legal");
        b.go_backward();
        let second = b.play(mv(&b, "g1", "f3")).expect("legal");
        assert_eq!(first, second);
        assert_eq!(b.tree().len(), 2);
    }

    #[test]
    fn test_flip_board() {
        let mut b = Board::new(RuleConfig::standard());
        b.play(mv(&b, "e2", "e4")).expect("legal");
        let fen = b.fen();
        let moves = b.legal_moves().len();

        b.flip_board();
        assert_eq!(b.orientation(), Orientation::BlackBottom);
        assert_eq!(b.fen(), fen);
        assert_eq!(b.legal_moves().len(), moves);

        b.play(mv(&b, "e7", "e5")).expect("legal");
        assert!(b.go_backward());
        assert!(b.go_backward());
        assert_eq!(b.fen(), STARTING_FEN);
        assert!(b.go_forward(0));
        assert_eq!(b.fen(), fen);
    }
}
