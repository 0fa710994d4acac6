//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a [`Board`](super::Board). Rules are kept
//! apart from board storage so the orchestrator and the computer policy
//! share one definition of a line.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{CENTER, CORNERS, SIDES, WIN_CONDITIONS, check_winner, completing_cell};

use super::{Board, GameStatus};
use tracing::instrument;

/// Evaluates the status of `board`.
///
/// A completed line wins (first match in [`WIN_CONDITIONS`] order), a full
/// board without a line is a draw, anything else is still in progress.
#[instrument(skip(board), ret)]
pub fn evaluate_status(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate_status(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_column_win() {
        let board = Board::from_codes([0, 2, 1, 0, 2, 1, 0, 0, 1]).unwrap();
        assert_eq!(evaluate_status(&board), GameStatus::Won(Player::Human));
    }

    #[test]
    fn test_full_board_draw() {
        let board = Board::from_codes([1, 2, 1, 1, 2, 2, 2, 1, 1]).unwrap();
        assert_eq!(evaluate_status(&board), GameStatus::Draw);
    }

    #[test]
    fn test_win_on_full_board_is_not_draw() {
        let board = Board::from_codes([1, 1, 1, 2, 2, 1, 2, 1, 2]).unwrap();
        assert_eq!(evaluate_status(&board), GameStatus::Won(Player::Human));
    }

    #[test]
    fn test_double_line_reports_first_condition() {
        // Unreachable in legal play: both rows complete. Row 0 is scanned first.
        let board = Board::from_codes([2, 2, 2, 1, 1, 1, 0, 0, 0]).unwrap();
        assert_eq!(evaluate_status(&board), GameStatus::Won(Player::Computer));
    }
}
