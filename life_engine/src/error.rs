// error.rs - Errors raised while building or editing grids

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid is {found_rows}x{found_cols}, expected {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("population probability {0} is not within 0..=1")]
    InvalidProbability(f64),

    #[error("pattern '{name}': unexpected character {found:?} in row {row}")]
    InvalidPattern {
        name: String,
        row: usize,
        found: char,
    },

    #[error("row task failed: {0}")]
    RowTask(#[from] tokio::task::JoinError),

    #[error("could not start row-task runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type LifeResult<T> = Result<T, LifeError>;
