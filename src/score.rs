//! End-of-game scoring.
//!
//! Empty regions are flood-filled; a region bordered by stones of a single
//! color is that color's territory, any other region counts for nobody.
//! The final score adds captures to territory and subtracts komi from Black
//! only.

use crate::constants::{BOARD_CELLS, KOMI};
use crate::group::{Cells, Group, compute_group};
use crate::position::Position;
use crate::stone::Stone;

/// A value kept per color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Points<T> {
    pub white: T,
    pub black: T,
}

/// Stones captured by each color.
pub type Captures = Points<u32>;

/// Final score of each color.
pub type Score = Points<f64>;

impl<T: Copy> Points<T> {
    pub fn new(white: T, black: T) -> Self {
        Points { white, black }
    }

    pub fn get(&self, stone: Stone) -> T {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }
}

impl Captures {
    /// Credit `count` captured stones to `stone`.
    pub fn add(self, stone: Stone, count: u32) -> Self {
        match stone {
            Stone::Black => Points::new(self.white, self.black + count),
            Stone::White => Points::new(self.white + count, self.black),
        }
    }
}

/// Partition the empty points into maximal connected regions.
pub fn empty_areas(cells: &Cells) -> Vec<Group> {
    let mut seen = [false; BOARD_CELLS];
    let mut areas = Vec::new();

    for pos in Position::all() {
        if seen[pos.index()] || cells.contains_key(&pos) {
            continue;
        }
        let area = compute_group(pos, cells, None);
        for p in area.positions() {
            seen[p.index()] = true;
        }
        areas.push(area);
    }
    areas
}

/// The only color bordering `area`, or `None` if no stone or both colors
/// border it.
pub fn area_owner(area: &Group, cells: &Cells) -> Option<Stone> {
    let mut owner = None;
    for adj in area.positions().flat_map(Position::adjacents) {
        match (owner, cells.get(&adj)) {
            (_, None) => {}
            (None, Some(&stone)) => owner = Some(stone),
            (Some(current), Some(&stone)) if current != stone => return None,
            _ => {}
        }
    }
    owner
}

/// Territory plus captures for each color, with komi taken from Black.
pub fn final_score(cells: &Cells, captures: Captures) -> Score {
    let mut territory = Points::<usize>::default();
    for area in empty_areas(cells) {
        match area_owner(&area, cells) {
            Some(Stone::Black) => territory.black += area.len(),
            Some(Stone::White) => territory.white += area.len(),
            None => {}
        }
    }

    Points::new(
        (territory.white + captures.white as usize) as f64,
        (territory.black + captures.black as usize) as f64 - KOMI,
    )
}
