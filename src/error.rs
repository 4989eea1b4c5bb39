use thiserror::Error;

use crate::maze::Coord;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    #[error("grid has no cells, build the topology before carving")]
    UnbuiltGrid,

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("cell {0} is not part of the grid")]
    UnknownCell(Coord),
}

pub type Result<T> = std::result::Result<T, MazeError>;

/// Rejects NaN and anything outside `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(MazeError::InvalidProbability { name, value })
    }
}
