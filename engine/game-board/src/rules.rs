//! Win, tie and legal-move predicates.

use crate::state::Board;
use crate::{Cell, Move, Outcome, Side};

/// Pieces in a line needed to win.
pub const CONNECT: usize = 4;

/// Direction vectors (row, col): horizontal, vertical, both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Columns with `height > 0`.
pub fn legal_columns(heights: &[usize]) -> Vec<usize> {
    heights
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > 0)
        .map(|(col, _)| col)
        .collect()
}

/// True when no column has room left.
pub fn is_board_full(heights: &[usize]) -> bool {
    heights.iter().all(|&h| h == 0)
}

/// Did the player's piece at (row, col) complete a line?
pub fn did_player_win(row: usize, col: usize, board: &Board) -> bool {
    connects(board, row, col, Cell::Player)
}

/// Did the computer's piece at (row, col) complete a line?
pub fn did_computer_win(row: usize, col: usize, board: &Board) -> bool {
    connects(board, row, col, Cell::Computer)
}

/// Classify the position after `mover` played `mv`.
///
/// A win takes precedence over a full board.
pub fn evaluate_outcome(board: &Board, heights: &[usize], mover: Side, mv: Move) -> Outcome {
    match mover {
        Side::Player if did_player_win(mv.row, mv.col, board) => return Outcome::PlayerWin,
        Side::Computer if did_computer_win(mv.row, mv.col, board) => return Outcome::ComputerWin,
        _ => {}
    }

    if is_board_full(heights) {
        Outcome::Tie
    } else {
        Outcome::Ongoing
    }
}

fn connects(board: &Board, row: usize, col: usize, cell: Cell) -> bool {
    if board.get(row, col) != cell {
        return false;
    }

    DIRECTIONS.iter().any(|&(dr, dc)| {
        // Count the piece itself plus both rays.
        1 + run_length(board, row, col, dr, dc, cell) + run_length(board, row, col, -dr, -dc, cell)
            >= CONNECT
    })
}

fn run_length(board: &Board, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
    let (rows, cols) = (board.rows() as isize, board.cols() as isize);
    let (mut r, mut c) = (row as isize + dr, col as isize + dc);
    let mut count = 0;

    while r >= 0 && r < rows && c >= 0 && c < cols && board.get(r as usize, c as usize) == cell {
        count += 1;
        r += dr;
        c += dc;
    }

    count
}
