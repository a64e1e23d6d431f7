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

//! Click-driven move entry.
//!
//! A front end forwards every click on the board to [`Board::select()`] and
//! renders the returned [`Selected`]:
//!
//! ```
//! use rookery::{Board, RuleConfig, Selected};
//!
//! let mut board = Board::new(RuleConfig::standard());
//! let e2 = board.square("e2")?;
//! let e4 = board.square("e4")?;
//!
//! assert!(matches!(board.select(e2), Selected::Picked { .. }));
//! assert!(matches!(board.select(e4), Selected::Moved(_)));
//! # Ok::<_, rookery::ParseSquareError>(())
//! ```

use arrayvec::ArrayVec;
use tracing::debug;

use crate::{
    board::Board,
    m::Move,
    piece::Piece,
    role::Role,
    sound::Sound,
    square::Square,
    tree::NodeId,
};

/// Promotion roles with the squares they are offered on.
pub type PromotionChoices = ArrayVec<(Square, Role), 4>;

/// What the board is waiting for.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Selection {
    #[default]
    Idle,
    PieceSelected {
        from: Square,
        destinations: Vec<Square>,
    },
    PromotionPending {
        from: Square,
        to: Square,
        choices: PromotionChoices,
    },
}

/// Result of a click.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selected {
    /// An own piece was selected. Its legal destinations should be shown.
    Picked { from: Square, destinations: Vec<Square> },
    /// The selection was cleared, or nothing selectable was clicked.
    Deselected,
    /// The click was not one of the offered options.
    Illegal,
    /// A pawn reached the last rank. One of the choices must be clicked.
    PromotionPending {
        from: Square,
        to: Square,
        choices: PromotionChoices,
    },
    /// A move was executed.
    Moved(NodeId),
    /// The game has ended. Clicks are ignored.
    GameOver,
}

impl Board {
    /// Advances the selection state machine by a click on `sq`.
    pub fn select(&mut self, sq: Square) -> Selected {
        if self.is_game_over() {
            return Selected::GameOver;
        }

        match std::mem::take(&mut self.selection) {
            Selection::Idle => self.pick(sq),
            Selection::PieceSelected { from, destinations } => {
                if destinations.contains(&sq) {
                    self.move_selected(from, sq)
                } else if sq == from {
                    Selected::Deselected
                } else if self.is_own_piece(sq) {
                    self.pick(sq)
                } else {
                    self.reject(sq)
                }
            }
            Selection::PromotionPending { from, to, choices } => {
                match choices.iter().find(|&&(square, _)| square == sq) {
                    Some(&(_, role)) => self.promote(from, to, role),
                    None if self.is_own_piece(sq) => self.pick(sq),
                    None => Selected::Deselected,
                }
            }
        }
    }

    /// Completes a pending promotion without a click.
    pub fn choose_promotion(&mut self, role: Role) -> Selected {
        match &self.selection {
            Selection::PromotionPending { from, to, choices }
                if choices.iter().any(|&(_, r)| r == role) =>
            {
                let (from, to) = (*from, *to);
                self.selection = Selection::Idle;
                self.promote(from, to, role)
            }
            _ => Selected::Illegal,
        }
    }

    /// Drops any selection.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::Idle;
    }

    fn is_own_piece(&self, sq: Square) -> bool {
        self.get_piece(sq).is_some_and(|p| p.color == self.turn)
    }

    fn pick(&mut self, sq: Square) -> Selected {
        if !self.is_own_piece(sq) {
            return Selected::Deselected;
        }
        let destinations = self.legal_destinations(sq);
        self.selection = Selection::PieceSelected {
            from: sq,
            destinations: destinations.clone(),
        };
        Selected::Picked {
            from: sq,
            destinations,
        }
    }

    fn reject(&mut self, sq: Square) -> Selected {
        debug!(square = %self.square_name(sq), "illegal selection");
        self.notify(Sound::Illegal);
        Selected::Illegal
    }

    fn move_selected(&mut self, from: Square, to: Square) -> Selected {
        let Some(piece) = self.get_piece(from) else {
            return Selected::Deselected;
        };
        if piece.role == Role::Pawn && self.is_promotion_square(piece.color, to) {
            let choices = self.promotion_choices(piece, to);
            self.selection = Selection::PromotionPending {
                from,
                to,
                choices: choices.clone(),
            };
            return Selected::PromotionPending { from, to, choices };
        }
        self.finish(Move::build(self, piece, from, to, None))
    }

    fn promote(&mut self, from: Square, to: Square, role: Role) -> Selected {
        let Some(piece) = self.get_piece(from) else {
            return Selected::Deselected;
        };
        self.finish(Move::build(self, piece, from, to, Some(role)))
    }

    fn finish(&mut self, m: Move) -> Selected {
        match self.play(m) {
            Ok(id) => Selected::Moved(id),
            Err(_) => {
                self.notify(Sound::Illegal);
                Selected::Illegal
            }
        }
    }

    /// Choices are lined up on the promotion file, from the promotion square
    /// towards the centre of the board.
    fn promotion_choices(&self, pawn: Piece, to: Square) -> PromotionChoices {
        let back = -self.grid.forward(pawn.color);
        let mut choices = PromotionChoices::new();
        let mut sq = Some(to);
        for &role in pawn.promotion_targets(self.rules) {
            let Some(square) = sq else {
                break;
            };
            choices.push((square, role));
            sq = square.offset(back, 0);
        }
        choices
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{rules::RuleConfig, sound::testing::Recorder};

    fn board(fen: &str) -> Board {
        Board::from_fen(fen, RuleConfig::standard()).expect("valid fen")
    }

    fn sq(board: &Board, name: &str) -> Square {
        board.square(name).expect("valid square")
    }

    #[test]
    fn test_pick_and_move() {
        let mut b = Board::new(RuleConfig::standard());
        let e2 = sq(&b, "e2");
        match b.select(e2) {
            Selected::Picked { from, destinations } => {
                assert_eq!(from, e2);
                assert_eq!(destinations.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(b.select(sq(&b, "e4")), Selected::Moved(_)));
        assert_eq!(b.selection(), &Selection::Idle);
        assert_eq!(b.turn(), crate::Color::Black);
    }

    #[test]
    fn test_enemy_piece_not_selectable() {
        let mut b = Board::new(RuleConfig::standard());
        assert_eq!(b.select(sq(&b, "e7")), Selected::Deselected);
        assert_eq!(b.select(sq(&b, "e4")), Selected::Deselected);
    }

    #[test]
    fn test_reselect_and_deselect() {
        let mut b = Board::new(RuleConfig::standard());
        let e2 = sq(&b, "e2");
        let g1 = sq(&b, "g1");
        b.select(e2);
        assert!(matches!(b.select(g1), Selected::Picked { from, .. } if from == g1));
        assert_eq!(b.select(g1), Selected::Deselected);
        assert_eq!(b.selection(), &Selection::Idle);
    }

    #[test]
    fn test_illegal_destination() {
        let recorder = Arc::new(Recorder::default());
        let mut b = Board::new(RuleConfig::standard());
        b.set_sound_sink(Some(recorder.clone()));
        b.select(sq(&b, "e2"));
        assert_eq!(b.select(sq(&b, "e5")), Selected::Illegal);
        assert_eq!(b.selection(), &Selection::Idle);
        let heard = recorder.heard.lock().expect("lock").clone();
        assert_eq!(heard, [Sound::Illegal]);
    }

    #[test]
    fn test_promotion_by_click() {
        let mut b = board("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        b.select(sq(&b, "e7"));
        let e8 = sq(&b, "e8");
        let choices = match b.select(e8) {
            Selected::PromotionPending { to, choices, .. } => {
                assert_eq!(to, e8);
                choices
            }
            other => panic!("unexpected {other:?}"),
        };
        let squares: Vec<String> = choices
            .iter()
            .map(|&(s, _)| b.square_name(s).to_string())
            .collect();
        assert_eq!(squares, ["e8", "e7", "e6", "e5"]);

        let (knight_square, _) = choices
            .iter()
            .copied()
            .find(|&(_, role)| role == Role::Knight)
            .expect("knight offered");
        assert!(matches!(b.select(knight_square), Selected::Moved(_)));
        assert_eq!(b.fen(), "4N3/8/8/8/8/8/k7/4K3 b - - 0 1");
    }

    #[test]
    fn test_choose_promotion() {
        let mut b = board("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        b.select(sq(&b, "e7"));
        b.select(sq(&b, "e8"));
        assert_eq!(b.choose_promotion(Role::King), Selected::Illegal);
        assert!(matches!(b.choose_promotion(Role::Queen), Selected::Moved(_)));
        assert_eq!(b.fen(), "4Q3/8/8/8/8/8/k7/4K3 b - - 0 1");
    }

    #[test]
    fn test_giveaway_promotes_to_king() {
        let mut b = Board::from_fen("8/4P3/8/8/8/8/8/k7 w - - 0 1", RuleConfig::giveaway())
            .expect("valid fen");
        b.select(sq(&b, "e7"));
        match b.select(sq(&b, "e8")) {
            Selected::PromotionPending { choices, .. } => {
                assert_eq!(choices.len(), 1);
                assert_eq!(choices[0].1, Role::King);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_clicks_ignored_after_game_end() {
        let mut b = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(b.select(sq(&b, "e2")), Selected::GameOver);
    }
}
