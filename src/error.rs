//! Error types shared by the game core
//!
//! Terminal game outcomes (collision, full board) are not errors; they are
//! reported through [`crate::game::GameStatus`]. The types here cover invalid
//! grid access and invalid configuration only.

use thiserror::Error;

/// Invalid access to the cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({col}, {row}) is outside the {cols}x{rows} grid")]
    OutOfBounds {
        col: i32,
        row: i32,
        cols: usize,
        rows: usize,
    },
}

/// Rejected game configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {cols}x{rows}")]
    ZeroDimension { cols: usize, rows: usize },
    #[error("tick rate must be a positive finite number, got {0}")]
    InvalidTickRate(f64),
    #[error("tick rate {0} Hz gives a tick interval outside the representable range")]
    TickIntervalOutOfRange(f64),
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("initial snake length {length} does not fit a {cols}-column grid (max {max})")]
    SnakeTooLong {
        length: usize,
        cols: usize,
        max: usize,
    },
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidFadeStep { name: &'static str, value: f32 },
}

/// Failure to start or run a game session
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
}
