//! Connected groups and liberties.
//!
//! A group is a maximal set of orthogonally connected points that share the
//! same occupant. The occupant is `Some(stone)` for stone groups and `None`
//! for empty regions, so the same flood fill serves captures and scoring.

use std::collections::{BTreeSet, VecDeque};

use im::OrdMap;

use crate::constants::BOARD_CELLS;
use crate::position::Position;
use crate::stone::Stone;

/// Occupied points of a board. Points absent from the map are empty.
pub type Cells = OrdMap<Position, Stone>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    positions: BTreeSet<Position>,
    occupant: Option<Stone>,
}

/// Flood-fill the group containing `seed`.
///
/// The traversal only expands into neighbors holding `occupant`. The seed is
/// always part of the result, so this can be asked for the group a stone
/// would join before it is placed.
pub fn compute_group(seed: Position, cells: &Cells, occupant: Option<Stone>) -> Group {
    let mut visited = [false; BOARD_CELLS];
    let mut queue = VecDeque::from([seed]);
    let mut positions = BTreeSet::new();
    visited[seed.index()] = true;

    while let Some(pos) = queue.pop_front() {
        positions.insert(pos);
        for adj in pos.adjacents() {
            if !visited[adj.index()] && cells.get(&adj).copied() == occupant {
                visited[adj.index()] = true;
                queue.push_back(adj);
            }
        }
    }

    Group {
        positions,
        occupant,
    }
}

impl Group {
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }

    pub fn occupant(&self) -> Option<Stone> {
        self.occupant
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Whether any point of the group touches an empty point.
    pub fn has_liberties(&self, cells: &Cells) -> bool {
        self.positions()
            .any(|pos| pos.adjacents().any(|adj| !cells.contains_key(&adj)))
    }

    /// The distinct groups of `occupant` that touch this group.
    ///
    /// A group touched at several points is returned once.
    pub fn adjacent_groups(&self, cells: &Cells, occupant: Option<Stone>) -> Vec<Group> {
        let mut groups: Vec<Group> = Vec::new();
        for pos in self.positions() {
            for adj in pos.adjacents() {
                if cells.get(&adj).copied() == occupant
                    && !groups.iter().any(|g| g.contains(adj))
                {
                    groups.push(compute_group(adj, cells, occupant));
                }
            }
        }
        groups
    }
}
