//! Randomized depth-first (recursive backtracker) maze carving.
//!
//! Driven the same way as the life engine: the host requests a step and
//! calls [`Maze::advance_if_pending`] once per tick. Each advance moves the
//! carving head by one cell or backtracks by one cell.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze must be at least 1x1, got {width}x{height}")]
    EmptyField { width: usize, height: usize },
}

/// Cell position, `x` columns across and `y` rows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Wall sides, in the order they are stored on each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East  => Self::West,
            Self::South => Self::North,
            Self::West  => Self::East,
        }
    }

    fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East  => (1, 0),
            Self::South => (0, 1),
            Self::West  => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeCell {
    walls: [bool; 4],
    visited: bool,
}

impl Default for MazeCell {
    fn default() -> Self {
        Self { walls: [true; 4], visited: false }
    }
}

impl MazeCell {
    /// Walls indexed by `Direction as usize`.
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir as usize]
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }
}

/// What one advance did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeStep {
    /// Knocked down the wall between `from` and `to` and moved onto `to`.
    Carved { from: Pos, to: Pos },
    /// The head had no unvisited neighbours and was popped.
    Backtracked(Pos),
    /// The stack ran empty. Reported once.
    Completed,
}

#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<MazeCell>,
    stack: Vec<Pos>,
    rng: StdRng,
    seed: u64,
    pending: bool,
    auto_step: bool,
    completed: bool,
}

impl Maze {
    /// All walls up, carving head on a random cell, first step already queued.
    pub fn new(width: usize, height: usize, seed: u64) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyField { width, height });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let start = Pos::new(rng.gen_range(0..width), rng.gen_range(0..height));
        info!(seed, width, height, x = start.x, y = start.y, "starting maze");

        Ok(Self {
            width,
            height,
            cells: vec![MazeCell::default(); width * height],
            stack: vec![start],
            rng,
            seed,
            pending: true,
            auto_step: true,
            completed: false,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&MazeCell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Cells on the current carving path, oldest first.
    pub fn stack(&self) -> &[Pos] {
        &self.stack
    }

    /// Current carving position.
    pub fn head(&self) -> Option<Pos> {
        self.stack.last().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_step_pending(&self) -> bool {
        self.pending
    }

    pub fn auto_step(&self) -> bool {
        self.auto_step
    }

    /// When on, every advance queues the next one.
    pub fn set_auto_step(&mut self, on: bool) {
        self.auto_step = on;
        if on {
            self.pending = true;
        }
    }

    pub fn request_step(&mut self) {
        self.pending = true;
    }

    pub fn advance_if_pending(&mut self) -> Option<MazeStep> {
        if self.completed || !self.pending {
            return None;
        }
        self.pending = self.auto_step;

        let Some(head) = self.head() else {
            self.completed = true;
            self.pending = false;
            info!(seed = self.seed, "maze complete");
            return Some(MazeStep::Completed);
        };
        self.cell_mut(head).visited = true;

        let choices: Vec<(Direction, Pos)> = Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(head, dir).map(|p| (dir, p)))
            .filter(|&(_, p)| !self.cells[self.index(p)].visited)
            .collect();

        match choices.choose(&mut self.rng).copied() {
            Some((dir, next)) => {
                self.cell_mut(head).walls[dir as usize] = false;
                self.cell_mut(next).walls[dir.opposite() as usize] = false;
                self.stack.push(next);
                Some(MazeStep::Carved { from: head, to: next })
            }
            None => {
                self.stack.pop();
                debug!(x = head.x, y = head.y, depth = self.stack.len(), "backtracked");
                Some(MazeStep::Backtracked(head))
            }
        }
    }

    /// Runs to completion regardless of the pending flag.
    pub fn carve_all(&mut self) {
        while !self.completed {
            self.pending = true;
            self.advance_if_pending();
        }
    }

    fn index(&self, p: Pos) -> usize {
        p.y * self.width + p.x
    }

    fn cell_mut(&mut self, p: Pos) -> &mut MazeCell {
        let i = self.index(p);
        &mut self.cells[i]
    }

    fn neighbor(&self, p: Pos, dir: Direction) -> Option<Pos> {
        let (dx, dy) = dir.offset();
        let x = p.x.checked_add_signed(dx)?;
        let y = p.y.checked_add_signed(dy)?;
        (x < self.width && y < self.height).then_some(Pos::new(x, y))
    }
}
