// cell.rs - Coordinates and per-cell state

use std::fmt;

/// Value-typed grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major index into a grid of side `size`.
    #[inline]
    pub(crate) fn index(self, size: usize) -> usize {
        self.y * size + self.x
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One square of the board.
///
/// `live_neighbors` always equals the number of alive cells at the
/// coordinates in `neighbors`; only [`Grid`](crate::Grid) may change either
/// field, and it changes them together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) alive: bool,
    pub(crate) live_neighbors: u8,
    neighbors: Box<[Coord]>,
}

impl Cell {
    pub(crate) fn new(neighbors: Vec<Coord>) -> Self {
        Self {
            alive: false,
            live_neighbors: 0,
            neighbors: neighbors.into_boxed_slice(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Number of alive cells among [`neighbors`](Self::neighbors).
    pub fn live_neighbors(&self) -> u8 {
        self.live_neighbors
    }

    /// In-bounds Moore neighbours, fixed at construction.
    pub fn neighbors(&self) -> &[Coord] {
        &self.neighbors
    }

    /// State after one generation under B3/S23.
    #[inline]
    pub fn next_state(&self) -> bool {
        match (self.alive, self.live_neighbors) {
            (true, 2) | (true, 3) => true,   // Survival
            (false, 3)            => true,   // Birth
            _                     => false,  // Death or stays dead
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(alive: bool, live_neighbors: u8) -> Cell {
        let mut c = Cell::new(Vec::new());
        c.alive = alive;
        c.live_neighbors = live_neighbors;
        c
    }

    #[test]
    fn live_cell_rules() {
        for n in 0..=8 {
            assert_eq!(cell(true, n).next_state(), n == 2 || n == 3, "alive with {n}");
        }
    }

    #[test]
    fn dead_cell_rules() {
        for n in 0..=8 {
            assert_eq!(cell(false, n).next_state(), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn coord_index_is_row_major() {
        assert_eq!(Coord::new(0, 0).index(5), 0);
        assert_eq!(Coord::new(4, 0).index(5), 4);
        assert_eq!(Coord::new(0, 1).index(5), 5);
        assert_eq!(Coord::new(3, 2).index(5), 13);
    }
}
