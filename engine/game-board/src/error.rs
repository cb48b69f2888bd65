use thiserror::Error;

/// Errors raised while building a position from external input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid cell code {code} at index {index}")]
    InvalidCell { index: usize, code: i32 },

    #[error("column {col} has height {height}, expected 0..={rows}")]
    HeightOutOfRange { col: usize, height: i64, rows: usize },

    #[error("forbidden cell ({row}, {col}) is outside the board")]
    ForbiddenOutOfBounds { row: usize, col: usize },

    #[error("forbidden cell ({row}, {col}) holds a piece")]
    ForbiddenOccupied { row: usize, col: usize },

    #[error("board text has more than one forbidden cell")]
    MultipleForbidden,

    #[error("unexpected character '{ch}' on line {line}")]
    UnexpectedChar { line: usize, ch: char },

    #[error("line {line} has {actual} cells, expected {expected}")]
    RaggedRows {
        line: usize,
        expected: usize,
        actual: usize,
    },
}
