// error.rs - Errors raised by the simulation core
//
// None of them are fatal: every operation that fails leaves the simulation
// exactly as it was.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type returned by fallible core routines.
pub type LifeResult<T> = Result<T, LifeError>;

/// Error encountered by a grid, codec or simulation operation.
#[derive(Error, Debug)]
pub enum LifeError {
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed grid: {0}")]
    Malformed(#[from] MalformedGrid),
    #[error("cannot {operation} while the simulation is running")]
    InvalidState { operation: &'static str },
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
    #[error("a {width}x{height} grid has too many cells")]
    TooLarge { width: usize, height: usize },
    #[error("symbol {0:?} cannot be written in the configured charset")]
    Unencodable(char),
}

impl LifeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reason a piece of text could not be decoded into a grid.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum MalformedGrid {
    #[error("no rows")]
    Empty,
    #[error("rows have zero length")]
    ZeroWidth,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}
