use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unsupported board size {0}x{0}")]
    InvalidSize(Coord),
    #[error("Unsupported board cell count {0}")]
    InvalidCellCount(CellCount),
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
