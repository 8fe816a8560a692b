use thiserror::Error;

use crate::{CellCount, Coord2};

/// Why a board could not be built.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board dimensions must be positive")]
    EmptyBoard,
    #[error("Too many mines, {mines} requested but the board has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Mine at {0:?} is outside the board")]
    MineOutOfBounds(Coord2),
    #[error("Mine at {0:?} is listed more than once")]
    DuplicateMine(Coord2),
    #[error("Expected {expected} mines but {actual} were given")]
    MineCountMismatch {
        expected: CellCount,
        actual: CellCount,
    },
    #[error("Cell grid does not match board size {size:?}")]
    ShapeMismatch { size: Coord2 },
    #[error("Stored neighbor count at {0:?} does not match the mines around it")]
    AdjacencyMismatch(Coord2),
    #[error("Expected {expected} revealed cells but the grid has {actual}")]
    RevealedCountMismatch {
        expected: CellCount,
        actual: CellCount,
    },
    #[error("Game status does not match the revealed cells")]
    InconsistentStatus,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Coordinates {0:?} are outside the board")]
    OutOfBounds(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;
