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

//! Computer players.
//!
//! A [`MoveSource`] looks at a board and proposes a move. Searching may take
//! a while, so a front end can hand a clone of the board to another thread
//! and feed the answer to [`Board::play()`], which validates it again.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::debug;

use crate::{board::Board, errors::PlayError, m::Move, tree::NodeId};

/// Something that picks moves.
pub trait MoveSource {
    /// Proposes a move for the side to move, or `None` if there is nothing
    /// to play.
    fn get_best_move(&mut self, board: &Board) -> Option<Move>;
}

/// Plays uniformly random legal moves.
#[derive(Clone, Debug)]
pub struct RandomMover<R = SmallRng> {
    rng: R,
}

impl RandomMover<SmallRng> {
    /// Reproducible sequence of choices.
    pub fn seeded(seed: u64) -> RandomMover<SmallRng> {
        RandomMover::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMover<R> {
    pub fn new(rng: R) -> RandomMover<R> {
        RandomMover { rng }
    }
}

impl<R: Rng> MoveSource for RandomMover<R> {
    fn get_best_move(&mut self, board: &Board) -> Option<Move> {
        if board.is_game_over() {
            return None;
        }
        let mut moves = board.legal_moves();
        if moves.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..moves.len());
        Some(moves.swap_remove(index))
    }
}

impl Board {
    /// Asks `source` for a move and plays it.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::GameOver`] if the source has nothing to offer,
    /// [`PlayError::IllegalMove`] if its move is not legal.
    pub fn play_from<S: MoveSource + ?Sized>(&mut self, source: &mut S) -> Result<NodeId, PlayError> {
        let m = source.get_best_move(self).ok_or(PlayError::GameOver)?;
        debug!(from = %self.square_name(m.from()), to = %self.square_name(m.to()), "engine move");
        self.play(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleConfig;

    #[test]
    fn test_random_game_is_consistent() {
        let mut mover = RandomMover::seeded(7);
        let mut board = Board::new(RuleConfig::standard());
        let mut plies = 0;
        while plies < 200 && board.play_from(&mut mover).is_ok() {
            plies += 1;
            let fen = board.fen();
            assert_eq!(
                Board::from_fen(&fen, RuleConfig::standard()).map(|b| b.fen()).as_deref(),
                Ok(fen.as_str())
            );
        }
        assert_eq!(board.ply(), plies);

        board.go_root();
        assert_eq!(board.fen(), crate::rules::STARTING_FEN);
    }

    #[test]
    fn test_no_move_when_over() {
        let board = Board::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            RuleConfig::standard(),
        )
        .expect("valid fen");
        assert!(RandomMover::seeded(1).get_best_move(&board).is_none());
    }
}
