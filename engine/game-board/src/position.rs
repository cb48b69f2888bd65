//! Conversions between external board formats and [`GameState`].

use std::fmt;

use crate::state::{Board, GameState, Geometry};
use crate::{BoardError, Cell, Side};

const FORBIDDEN_SYMBOL: char = '#';

impl GameState {
    /// Build a state from the flat arrays handed over by a host platform.
    ///
    /// `cells` is row-major with row 0 at the top and codes 0/1/2 for
    /// empty/player/computer; `top[c]` is the height of column `c`.
    pub fn from_flat(
        rows: usize,
        cols: usize,
        top: &[i32],
        cells: &[i32],
        forbidden: Option<(usize, usize)>,
        to_move: Side,
    ) -> Result<Self, BoardError> {
        let geometry = Geometry::new(rows, cols, forbidden)?;

        if cells.len() != rows * cols {
            return Err(BoardError::LengthMismatch {
                what: "board",
                expected: rows * cols,
                actual: cells.len(),
            });
        }
        if top.len() != cols {
            return Err(BoardError::LengthMismatch {
                what: "heights",
                expected: cols,
                actual: top.len(),
            });
        }

        let cells = cells
            .iter()
            .enumerate()
            .map(|(index, &code)| Cell::from_code(code).ok_or(BoardError::InvalidCell { index, code }))
            .collect::<Result<Vec<_>, _>>()?;

        let heights = top
            .iter()
            .enumerate()
            .map(|(col, &h)| {
                usize::try_from(h)
                    .ok()
                    .filter(|&h| h <= rows)
                    .ok_or(BoardError::HeightOutOfRange {
                        col,
                        height: h as i64,
                        rows,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        GameState::new(geometry, Board::from_cells(rows, cols, cells), heights, to_move)
    }

    /// Parse a text grid: `.` empty, `X` player, `O` computer, `#` forbidden.
    ///
    /// Whitespace inside a line is ignored and blank lines are skipped. Column
    /// heights are derived by gravity: a column's stack ends at the first
    /// free, non-forbidden cell seen from the floor.
    pub fn parse(text: &str, to_move: Side) -> Result<Self, BoardError> {
        let mut cells = Vec::new();
        let mut forbidden = None;
        let mut rows = 0;
        let mut cols = 0;

        for (line_no, line) in text.lines().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }
            if rows == 0 {
                cols = symbols.len();
            } else if symbols.len() != cols {
                return Err(BoardError::RaggedRows {
                    line: line_no + 1,
                    expected: cols,
                    actual: symbols.len(),
                });
            }

            for (col, ch) in symbols.into_iter().enumerate() {
                let cell = match ch.to_ascii_uppercase() {
                    '.' => Cell::Empty,
                    'X' => Cell::Player,
                    'O' => Cell::Computer,
                    FORBIDDEN_SYMBOL => {
                        if forbidden.replace((rows, col)).is_some() {
                            return Err(BoardError::MultipleForbidden);
                        }
                        Cell::Empty
                    }
                    _ => {
                        return Err(BoardError::UnexpectedChar {
                            line: line_no + 1,
                            ch,
                        })
                    }
                };
                cells.push(cell);
            }
            rows += 1;
        }

        let geometry = Geometry::new(rows, cols, forbidden)?;
        let board = Board::from_cells(rows, cols, cells);
        let heights = derive_heights(&geometry, &board);
        GameState::new(geometry, board, heights, to_move)
    }

    /// Flat row-major cell codes, the inverse of [`GameState::from_flat`].
    pub fn to_flat(&self) -> Vec<i32> {
        self.board().cells().iter().map(|c| c.code() as i32).collect()
    }
}

/// Heights implied by a gravity-consistent board.
pub(crate) fn derive_heights(geometry: &Geometry, board: &Board) -> Vec<usize> {
    (0..geometry.cols())
        .map(|col| {
            let mut height = geometry.rows();
            while height > 0
                && (board.get(height - 1, col) != Cell::Empty
                    || geometry.is_forbidden(height - 1, col))
            {
                height -= 1;
            }
            height
        })
        .collect()
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let geometry = self.geometry();
        for row in 0..geometry.rows() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..geometry.cols() {
                let symbol = if geometry.is_forbidden(row, col) {
                    FORBIDDEN_SYMBOL
                } else {
                    self.board().get(row, col).symbol()
                };
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
