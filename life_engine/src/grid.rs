// grid.rs - Square board of cells with incrementally maintained neighbour counts

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::Rng;

use crate::topology::moore_neighbors;
use crate::{Cell, Coord, LifeError, Result};

/// Births and deaths produced by one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transitions {
    pub births: usize,
    pub deaths: usize,
}

/// An `N` x `N` board. Cells are stored row-major and addressed by [`Coord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds an all-dead grid and computes every cell's neighbour list once.
    pub fn new(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(Cell::new(moore_neighbors(x, y, size)));
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks a signed coordinate against the board.
    pub fn locate(&self, x: i32, y: i32) -> Result<Coord> {
        let inside = |v: i32| usize::try_from(v).ok().filter(|&v| v < self.size);
        match (inside(x), inside(y)) {
            (Some(cx), Some(cy)) => Ok(Coord::new(cx, cy)),
            _ => Err(LifeError::OutOfBounds { x, y, size: self.size }),
        }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    /// Panics if `coord` is off the board; use [`locate`](Self::locate) first.
    pub fn cell(&self, coord: Coord) -> &Cell {
        assert!(self.contains(coord), "cell {coord} is off the {size}x{size} grid", size = self.size);
        &self.cells[coord.index(self.size)]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i % size, i / size), cell))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Randomly populates the board, then derives every count from scratch.
    ///
    /// Each cell draws from `1..=100` and lives when the draw is at most
    /// `live_chance`. Counting happens in a second pass because a neighbour's
    /// state is not known until the first pass has visited it.
    pub fn seed<R: Rng>(&mut self, rng: &mut R, live_chance: u8) {
        for cell in &mut self.cells {
            cell.alive = rng.gen_range(1..=100u8) <= live_chance;
        }
        self.recount();
    }

    /// Recomputes every neighbour count by scanning.
    pub fn recount(&mut self) {
        for i in 0..self.cells.len() {
            let count = self.cells[i]
                .neighbors()
                .iter()
                .filter(|n| self.cells[n.index(self.size)].alive)
                .count();
            self.cells[i].live_neighbors = count as u8;
        }
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.alive = false;
            cell.live_neighbors = 0;
        }
    }

    /// Flips one cell and adjusts the counts of its neighbours.
    ///
    /// Panics if `coord` is off the board.
    pub fn toggle(&mut self, coord: Coord) {
        assert!(self.contains(coord), "cell {coord} is off the {size}x{size} grid", size = self.size);
        let i = coord.index(self.size);
        let alive = !self.cells[i].alive;
        self.cells[i].alive = alive;
        self.bump_neighbors(i, alive);
    }

    /// Sets one cell's state. Returns `false` if nothing changed.
    ///
    /// Panics if `coord` is off the board.
    pub fn set_alive(&mut self, coord: Coord, alive: bool) -> bool {
        if self.cell(coord).alive == alive {
            return false;
        }
        self.toggle(coord);
        true
    }

    fn bump_neighbors(&mut self, i: usize, alive: bool) {
        for k in 0..self.cells[i].neighbors().len() {
            let n = self.cells[i].neighbors()[k].index(self.size);
            let count = &mut self.cells[n].live_neighbors;
            if alive {
                *count += 1;
            } else {
                *count -= 1;
            }
        }
    }

    /// Advances every cell by one generation.
    ///
    /// Decisions read only `live_neighbors`, which stays untouched until all
    /// cells have decided, so the update is synchronous. Alive flags flip in
    /// place as each cell decides; the neighbour lists of flipped cells are
    /// collected and applied to the counts afterwards, one adjustment per
    /// transitioning neighbour.
    pub fn advance(&mut self) -> Transitions {
        let mut increments: Vec<Coord> = Vec::new();
        let mut decrements: Vec<Coord> = Vec::new();
        let mut transitions = Transitions::default();

        for cell in &mut self.cells {
            let next = cell.next_state();
            if next == cell.alive {
                continue;
            }
            cell.alive = next;
            if next {
                transitions.births += 1;
                increments.extend_from_slice(cell.neighbors());
            } else {
                transitions.deaths += 1;
                decrements.extend_from_slice(cell.neighbors());
            }
        }

        // Increments first so a count never dips below zero mid-update.
        for c in &increments {
            self.cells[c.index(self.size)].live_neighbors += 1;
        }
        for c in &decrements {
            self.cells[c.index(self.size)].live_neighbors -= 1;
        }
        transitions
    }

    /// Hash of the alive set, used for cycle detection.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for cell in &self.cells {
            cell.alive.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Full rescan confirming every stored count matches its neighbours.
    pub fn check_invariant(&self) -> bool {
        self.cells.iter().all(|cell| {
            let actual = cell
                .neighbors()
                .iter()
                .filter(|n| self.cells[n.index(self.size)].alive)
                .count();
            actual == cell.live_neighbors as usize
        })
    }
}
