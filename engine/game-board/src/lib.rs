//! Board rules for a two-player gravity connection game.
//!
//! Players drop pieces into the columns of an R x C grid; a piece lands on
//! top of the existing stack and four connected pieces in a line win. One
//! cell of the grid is forbidden: it never holds a piece and a stack simply
//! grows over it.
//!
//! # Board Layout
//!
//! Rows are numbered from the top, so pieces land on the highest row index
//! that is still free:
//! ```text
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Top
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! ...
//! Row 5: [35][36][37][38][39][40][41]  <- Bottom (floor)
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! Each column keeps a *height*: the number of free slots above its stack.
//! The next piece in column `c` lands on row `height[c] - 1`, and a height of
//! zero means the column is full.
//!
//! # Usage
//!
//! ```rust
//! use game_board::{GameState, Outcome, Side};
//!
//! let mut state = GameState::empty(6, 7, Some((4, 3)), Side::Computer).unwrap();
//! let mv = state.apply_move(3);
//! assert_eq!((mv.row, mv.col), (5, 3));
//! // The piece landed right under the forbidden cell, so the stack skips it.
//! assert_eq!(state.heights()[3], 4);
//! assert_eq!(state.outcome(), Outcome::Ongoing);
//! ```

mod error;
mod position;
mod rules;
mod state;

use serde::{Deserialize, Serialize};

pub use error::BoardError;
pub use rules::{
    did_computer_win, did_player_win, evaluate_outcome, is_board_full, legal_columns, CONNECT,
};
pub use state::{Board, GameState, Geometry};

/// Default board dimensions (the classic 6 x 7 grid).
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Terminal value of a computer win. Values are always expressed from the
/// computer's point of view.
pub const COMPUTER_WIN_VALUE: f64 = 1.0;
/// Terminal value of a player win.
pub const PLAYER_WIN_VALUE: f64 = -1.0;
/// Terminal value of a tie.
pub const TIE_VALUE: f64 = 0.0;

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Cell {
    /// Numeric code used by flat board arrays: 0 = empty, 1 = player, 2 = computer.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Player => 1,
            Cell::Computer => 2,
        }
    }

    /// Decode a flat-array cell code.
    pub fn from_code(code: i32) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Player),
            2 => Some(Cell::Computer),
            _ => None,
        }
    }

    /// Text symbol used by [`GameState::parse`] and `Display`.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'X',
            Cell::Computer => 'O',
        }
    }
}

/// One of the two sides of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The human opponent.
    Player,
    /// The engine.
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    /// The cell value this side's pieces occupy.
    pub fn cell(self) -> Cell {
        match self {
            Side::Player => Cell::Player,
            Side::Computer => Cell::Computer,
        }
    }

    /// Sign that turns a computer-perspective value into this side's
    /// perspective.
    pub fn perspective(self) -> f64 {
        match self {
            Side::Player => -1.0,
            Side::Computer => 1.0,
        }
    }
}

/// Coordinates of a placed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Classification of the position right after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWin,
    ComputerWin,
    Tie,
    Ongoing,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Terminal value from the computer's perspective, `None` while ongoing.
    pub fn value(self) -> Option<f64> {
        match self {
            Outcome::PlayerWin => Some(PLAYER_WIN_VALUE),
            Outcome::ComputerWin => Some(COMPUTER_WIN_VALUE),
            Outcome::Tie => Some(TIE_VALUE),
            Outcome::Ongoing => None,
        }
    }
}
