use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Position;

/// Convenient result alias for the evacuation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a grid is requested with a zero dimension.
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    /// Raised when the cell count of a grid cannot be allocated.
    #[error("grid of {rows}x{cols} cells is too large")]
    GridTooLarge { rows: usize, cols: usize },

    /// Raised when a cell is placed or queried outside the grid.
    #[error("position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },

    /// Raised when a layout contains a character that is not a known cell glyph.
    #[error("unknown cell glyph '{glyph}' at line {line}, column {column}")]
    UnknownCellGlyph {
        glyph: char,
        line: usize,
        column: usize,
    },

    /// Raised when layout rows do not all have the same width.
    #[error("layout row at line {line} has {found} cells, expected {expected}")]
    RaggedLayout {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when hazard weights would break the search heuristic.
    #[error("invalid hazard weights: {message}")]
    InvalidWeights { message: String },

    /// Raised when a planning request has no explicit start and no person is registered.
    #[error("no start position given and the grid has no registered people")]
    NoPeople,

    /// Raised when planning is requested on a grid without registered exits.
    #[error("the grid has no registered exits")]
    NoExits,

    /// Raised when the start position cannot be occupied.
    #[error("start position {position} is not walkable")]
    StartNotWalkable { position: Position },

    /// Raised when a requested target does not hold an exit.
    #[error("target position {position} is not an exit")]
    NotAnExit { position: Position },

    /// Raised when no exit could be reached from the start position.
    #[error("no route found from {start} to {goal}")]
    RouteNotFound { start: Position, goal: String },

    /// Raised when reading a grid or weights file fails.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
