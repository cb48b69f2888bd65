//! Board grid, column heights and the per-node game state.

use crate::rules::{evaluate_outcome, legal_columns};
use crate::{BoardError, Cell, Move, Outcome, Side};

/// Board dimensions plus the forbidden cell. Shared by every state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    rows: usize,
    cols: usize,
    forbidden: Option<(usize, usize)>,
}

impl Geometry {
    pub fn new(
        rows: usize,
        cols: usize,
        forbidden: Option<(usize, usize)>,
    ) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        if let Some((row, col)) = forbidden {
            if row >= rows || col >= cols {
                return Err(BoardError::ForbiddenOutOfBounds { row, col });
            }
        }
        Ok(Self {
            rows,
            cols,
            forbidden,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn forbidden(&self) -> Option<(usize, usize)> {
        self.forbidden
    }

    #[inline]
    pub fn is_forbidden(&self, row: usize, col: usize) -> bool {
        self.forbidden == Some((row, col))
    }

    /// Height of every column of an empty board.
    pub fn empty_heights(&self) -> Vec<usize> {
        (0..self.cols)
            .map(|col| match self.forbidden {
                // A forbidden floor cell lowers the column by one.
                Some((row, c)) if c == col && row == self.rows - 1 => self.rows - 1,
                _ => self.rows,
            })
            .collect()
    }
}

/// R x C grid of cells stored row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn pos(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.pos(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let pos = self.pos(row, col);
        self.cells[pos] = cell;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of pieces on the board.
    pub fn pieces(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }
}

/// One board configuration: grid, column heights, side to move and the move
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    geometry: Geometry,
    board: Board,
    heights: Vec<usize>,
    to_move: Side,
    last_move: Option<Move>,
}

impl GameState {
    /// Build a state from an existing board and its heights.
    ///
    /// The state has no last move, so it is never terminal by itself.
    pub fn new(
        geometry: Geometry,
        board: Board,
        heights: Vec<usize>,
        to_move: Side,
    ) -> Result<Self, BoardError> {
        if board.rows() != geometry.rows() || board.cols() != geometry.cols() {
            return Err(BoardError::LengthMismatch {
                what: "board",
                expected: geometry.rows() * geometry.cols(),
                actual: board.rows() * board.cols(),
            });
        }
        if heights.len() != geometry.cols() {
            return Err(BoardError::LengthMismatch {
                what: "heights",
                expected: geometry.cols(),
                actual: heights.len(),
            });
        }
        for (col, &height) in heights.iter().enumerate() {
            if height > geometry.rows() {
                return Err(BoardError::HeightOutOfRange {
                    col,
                    height: height as i64,
                    rows: geometry.rows(),
                });
            }
        }
        if let Some((row, col)) = geometry.forbidden() {
            if board.get(row, col) != Cell::Empty {
                return Err(BoardError::ForbiddenOccupied { row, col });
            }
        }

        Ok(Self {
            geometry,
            board,
            heights,
            to_move,
            last_move: None,
        })
    }

    /// An empty board of the given size.
    pub fn empty(
        rows: usize,
        cols: usize,
        forbidden: Option<(usize, usize)>,
        to_move: Side,
    ) -> Result<Self, BoardError> {
        let geometry = Geometry::new(rows, cols, forbidden)?;
        let heights = geometry.empty_heights();
        Self::new(geometry, Board::new(rows, cols), heights, to_move)
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    /// Side whose turn it is.
    #[inline]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Side that played `last_move`.
    #[inline]
    pub fn mover(&self) -> Side {
        self.to_move.opponent()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Columns that still have room.
    pub fn legal_columns(&self) -> Vec<usize> {
        legal_columns(&self.heights)
    }

    #[inline]
    pub fn is_legal(&self, column: usize) -> bool {
        self.heights.get(column).is_some_and(|&h| h > 0)
    }

    /// Drop a piece for `side` into `column` without changing the side to move.
    ///
    /// The piece lands on row `height - 1`. If the forbidden cell sits right
    /// above the landing cell the column height drops a second time so the
    /// next piece skips it.
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range or full.
    pub fn place(&mut self, column: usize, side: Side) -> Move {
        assert!(
            self.is_legal(column),
            "column {} has no room (heights: {:?})",
            column,
            self.heights
        );

        self.heights[column] -= 1;
        let row = self.heights[column];
        self.board.set(row, column, side.cell());

        if row > 0 && self.geometry.is_forbidden(row - 1, column) {
            self.heights[column] -= 1;
        }

        let mv = Move::new(row, column);
        self.last_move = Some(mv);
        mv
    }

    /// Play the side to move into `column` and pass the turn.
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range or full.
    pub fn apply_move(&mut self, column: usize) -> Move {
        let mv = self.place(column, self.to_move);
        self.to_move = self.to_move.opponent();
        mv
    }

    /// Copy of this state with `column` played.
    pub fn play(&self, column: usize) -> GameState {
        let mut next = self.clone();
        next.apply_move(column);
        next
    }

    /// Outcome of the last move, `Ongoing` when there is none.
    pub fn outcome(&self) -> Outcome {
        match self.last_move {
            Some(mv) => evaluate_outcome(&self.board, &self.heights, self.mover(), mv),
            None => Outcome::Ongoing,
        }
    }
}
