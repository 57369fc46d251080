//! Construction-time configuration errors
//!
//! The simulation itself has no recoverable error surface. Everything that can
//! go wrong is caught while building a [`crate::sim::GameState`].

use thiserror::Error;

/// Malformed static configuration, detected before the first tick
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level grid is empty")]
    EmptyGrid,

    #[error("level row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("viewport width {viewport} exceeds world width {world}")]
    ViewportWiderThanWorld { viewport: i32, world: i32 },

    #[error("{what} spawn point ({x}, {y}) lies outside the world")]
    SpawnOutsideWorld { what: &'static str, x: i32, y: i32 },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
