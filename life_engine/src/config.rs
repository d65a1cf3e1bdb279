// config.rs - Engine configuration and seed handling

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::ConfigError;

pub const DEFAULT_GRID_SIZE: usize = 50;      // Side length of the square board
pub const DEFAULT_LIVE_CHANCE: u8 = 10;       // Percent of cells alive after seeding
pub const MAX_LIVE_CHANCE: u8 = 100;

/// Random seed recorded for reproducing a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub u64);

impl Seed {
    /// Seed drawn from the wall clock.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Seed(nanos)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for building an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub size: usize,
    /// Percentage chance, 0 to 100, that a cell starts alive.
    pub live_chance: u8,
    /// `None` draws a seed from the clock at construction.
    pub seed: Option<Seed>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            live_chance: DEFAULT_LIVE_CHANCE,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn new(size: usize, live_chance: u8) -> Self {
        Self { size, live_chance, seed: None }
    }

    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 1 {
            return Err(ConfigError::ZeroSize);
        }
        if self.live_chance > MAX_LIVE_CHANCE {
            return Err(ConfigError::LiveChanceOutOfRange(self.live_chance));
        }
        Ok(())
    }
}
