//! Line detection for tic-tac-toe.

use super::super::{Board, Player, Square};
use tracing::instrument;

/// The eight lines, scanned in this order: rows, columns, diagonals.
pub const WIN_CONDITIONS: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Center cell.
pub const CENTER: usize = 4;

/// Corner cells.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Edge cells between corners.
pub const SIDES: [usize; 4] = [1, 3, 5, 7];

/// Checks if there is a winner on the board.
///
/// Returns the owner of the first completed line in [`WIN_CONDITIONS`]
/// order, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    for [a, b, c] in WIN_CONDITIONS {
        let sq = board.get(a);
        if sq == board.get(b) && sq == board.get(c)
            && let Some(Square::Occupied(player)) = sq
        {
            return Some(player);
        }
    }

    None
}

/// Finds the cell that would complete a line for `player`.
///
/// Scans [`WIN_CONDITIONS`] in order and returns the empty cell of the
/// first line where `player` already holds the other two.
#[instrument(skip(board))]
pub fn completing_cell(board: &Board, player: Player) -> Option<usize> {
    WIN_CONDITIONS.iter().find_map(|line| {
        let owned = line
            .iter()
            .filter(|&&cell| board.get(cell) == Some(Square::Occupied(player)))
            .count();
        let mut empty = line.iter().copied().filter(|&cell| board.is_empty(cell));
        match (owned, empty.next()) {
            (2, Some(cell)) => Some(cell),
            _ => None,
        }
    })
}
