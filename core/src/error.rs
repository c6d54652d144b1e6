use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {}x{} field with {mines} mines", .size.0, .size.1)]
    InvalidConfiguration { size: Coord2, mines: CellCount },
    #[error("Coordinates {0:?} are outside the field")]
    OutOfBounds(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;
