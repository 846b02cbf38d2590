use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Cell;

/// Reasons a configuration cannot start a game.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("board must be at least 1x1 cells, got {width}x{height}")]
    EmptyBoard { width: u16, height: u16 },
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("initial snake length must be greater than zero")]
    ZeroInitialLength,
    #[error("initial snake segment {0:?} lies outside the board")]
    SnakeOutOfBounds(Cell),
    #[error("initial snake of length {length} leaves no free cell on a {total}-cell board")]
    SnakeFillsBoard { length: usize, total: usize },
    #[error("initial food {0:?} lies outside the board")]
    FoodOutOfBounds(Cell),
    #[error("initial food {0:?} overlaps the snake")]
    FoodOnSnake(Cell),
}

/// Broken engine invariants. These indicate a bug, never a normal game over.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("snake body has no segments")]
    EmptyBody,
    #[error("snake occupies cell {0:?} more than once")]
    DuplicateCell(Cell),
    #[error("snake segment {0:?} lies outside the board while running")]
    OutOfBounds(Cell),
    #[error("food {0:?} overlaps the snake")]
    FoodOnSnake(Cell),
    #[error("food {0:?} lies outside the board")]
    FoodOutOfBounds(Cell),
}

/// Failures that abort an interactive session.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("engine invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
    #[error("cannot restart: {0}")]
    Restart(#[from] ConfigError),
}
