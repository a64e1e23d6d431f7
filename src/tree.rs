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

//! Game history with variations.
//!
//! A [`MoveTree`] is an arena of [`MoveNode`]s. The root carries no move and
//! stands for the starting position. Every other node holds the move that
//! leads to it together with a [`Snapshot`] of the counters before that move,
//! which is everything [`Move::undo()`] needs besides the move itself.
//!
//! Navigation lives on [`Board`](crate::Board), because stepping through the
//! tree executes and undoes moves on the board.

use std::fmt::Write as _;

use crate::{
    castling_side::CastlingRights,
    color::{ByColor, Color},
    m::Move,
    square::Square,
};

/// Index of a node in its [`MoveTree`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Counters that a move can not be undone without.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Snapshot {
    pub en_passant: Option<Square>,
    pub castling: CastlingRights,
    pub half_moves: u32,
    pub full_moves: u32,
    pub last_irreversible: usize,
    pub checks: ByColor<u8>,
}

#[derive(Clone, Debug)]
pub struct MoveNode {
    mv: Option<Move>,
    snapshot: Snapshot,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
    fen: String,
}

impl MoveNode {
    /// The move leading to this node, `None` for the root.
    pub fn mv(&self) -> Option<&Move> {
        self.mv.as_ref()
    }

    /// Counters before the move.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Continuations, main line first.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of plies from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// FEN of the position at this node.
    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// The first four FEN fields: placement, turn, castling and en passant.
    pub fn position_key(&self) -> &str {
        position_key(&self.fen)
    }
}

pub(crate) fn position_key(fen: &str) -> &str {
    let mut spaces = fen.match_indices(' ').map(|(i, _)| i);
    match spaces.nth(3) {
        Some(end) => &fen[..end],
        None => fen,
    }
}

#[derive(Clone, Debug)]
pub struct MoveTree {
    nodes: Vec<MoveNode>,
    current: NodeId,
    root_turn: Color,
}

impl MoveTree {
    pub(crate) fn new(root_fen: String, root_turn: Color, snapshot: Snapshot) -> MoveTree {
        MoveTree {
            nodes: vec![MoveNode {
                mv: None,
                snapshot,
                parent: None,
                children: Vec::new(),
                depth: 0,
                fen: root_fen,
            }],
            current: NodeId::ROOT,
            root_turn,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub(crate) fn set_current(&mut self, id: NodeId) {
        self.current = id;
    }

    pub fn node(&self, id: NodeId) -> Option<&MoveNode> {
        self.nodes.get(id.0)
    }

    pub fn current_node(&self) -> &MoveNode {
        &self.nodes[self.current.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Attaches `mv` below the current node and makes it current.
    ///
    /// Playing a move that already continues the current node reuses the
    /// existing child.
    pub(crate) fn add(&mut self, mv: Move, snapshot: Snapshot) -> NodeId {
        let parent = self.current;
        let existing = self.nodes[parent.0].children.iter().copied().find(|&child| {
            self.nodes[child.0]
                .mv
                .as_ref()
                .is_some_and(|m| m.same_action(&mv))
        });

        let id = match existing {
            Some(id) => id,
            None => {
                let id = NodeId(self.nodes.len());
                let fen = mv.fen().map(str::to_owned).unwrap_or_default();
                self.nodes.push(MoveNode {
                    mv: Some(mv),
                    snapshot,
                    parent: Some(parent),
                    children: Vec::new(),
                    depth: self.nodes[parent.0].depth + 1,
                    fen,
                });
                self.nodes[parent.0].children.push(id);
                id
            }
        };
        self.current = id;
        id
    }

    /// Nodes from the current one back to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &MoveNode> {
        std::iter::successors(Some(self.current_node()), |node| {
            node.parent.and_then(|p| self.node(p))
        })
    }

    /// Mirrors every stored square, to follow a flipped board.
    pub fn flip_tree(&mut self) {
        for node in &mut self.nodes {
            if let Some(mv) = node.mv.as_mut() {
                mv.flip();
            }
            node.snapshot.en_passant = node.snapshot.en_passant.map(Square::mirrored);
        }
    }

    /// Notation of the line leading to the current node, with move numbers,
    /// e.g. `1. e4 e5 2. Nf3`.
    pub fn movetext(&self) -> String {
        let mut line: Vec<&MoveNode> = self.ancestors().filter(|n| n.mv.is_some()).collect();
        line.reverse();

        let mut text = String::new();
        let mut turn = self.root_turn;
        let mut number = self.nodes[0].snapshot.full_moves;
        for (i, node) in line.iter().enumerate() {
            let notation = node.mv.as_ref().and_then(Move::notation).unwrap_or("?");
            if i > 0 {
                text.push(' ');
            }
            match turn {
                Color::White => {
                    let _ = write!(text, "{number}. ");
                }
                Color::Black if i == 0 => {
                    let _ = write!(text, "{number}... ");
                }
                Color::Black => (),
            }
            text.push_str(notation);
            if turn.is_black() {
                number += 1;
            }
            turn = !turn;
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_key() {
        assert_eq!(
            position_key("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
        );
    }
}
