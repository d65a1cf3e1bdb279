//! Conway's Game of Life on a bounded square grid.
//!
//! Every cell stores its neighbour list and a running count of live
//! neighbours. Generations and single-cell edits adjust those counts
//! incrementally instead of rescanning the board.
//!
//! ```
//! use life_engine::{Engine, patterns};
//!
//! let mut engine = Engine::blank(5).unwrap();
//! engine.apply_pattern_centered(&patterns::BLINKER);
//! engine.request_step();
//! let report = engine.advance_if_pending().unwrap();
//! assert_eq!(report.generation, 1);
//! assert!(engine.is_alive(2, 1).unwrap());
//! ```

mod cell;
mod config;
mod engine;
mod error;
mod grid;
pub mod patterns;
pub mod topology;

pub use cell::{Cell, Coord};
pub use config::{EngineConfig, Seed, DEFAULT_GRID_SIZE, DEFAULT_LIVE_CHANCE, MAX_LIVE_CHANCE};
pub use engine::{Engine, StepReport, StepState};
pub use error::{ConfigError, LifeError, Result};
pub use grid::{Grid, Transitions};
pub use patterns::Pattern;
