// error.rs - Error types for the Game of Life core

use thiserror::Error;

/// Rejected configuration input (speed or grid size straight from a form field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("speed must be a positive number of milliseconds, got {0}")]
    NonPositiveSpeed(i64),

    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    NonPositiveDimension { rows: i64, cols: i64 },

    #[error("a {rows}x{cols} grid has more cells than can be addressed")]
    DimensionsTooLarge { rows: i64, cols: i64 },
}

/// Errors raised by grid construction and cell addressing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("a grid needs at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Resizing recreates the grid, which is only allowed while stopped.
    #[error("the grid cannot be resized while the simulation is running")]
    ResizeWhileRunning,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
