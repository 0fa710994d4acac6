//! Draw detection for tic-tac-toe.

use super::super::Board;
use super::win::check_winner;
use tracing::instrument;

/// A full board with no completed line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_draw() {
        assert!(!is_draw(&Board::new()));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X
        let board = Board::from_codes([1, 2, 1, 1, 2, 2, 2, 1, 1]).unwrap();
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let board = Board::from_codes([1, 1, 1, 2, 2, 1, 2, 1, 2]).unwrap();
        assert!(!is_draw(&board));
    }
}
