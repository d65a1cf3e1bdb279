// error.rs - Error types for the life engine

use thiserror::Error;

/// Reasons an [`EngineConfig`](crate::EngineConfig) is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid needs at least one cell per side.
    #[error("grid size must be at least 1")]
    ZeroSize,

    /// Live chance is a percentage.
    #[error("live chance {0} is outside 0..=100")]
    LiveChanceOutOfRange(u8),
}

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifeError {
    /// A toggle or query targeted a coordinate outside the grid.
    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Side length of the grid.
        size: usize,
    },

    /// The engine refused to build from the given configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, LifeError>;
