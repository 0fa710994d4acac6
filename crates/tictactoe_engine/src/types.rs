//! Core domain types for tic-tac-toe against the computer.

use crate::action::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A participant in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Player {
    /// The human player, always marks X and always moves first.
    Human,
    /// The rule-based computer opponent, marks O.
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Returns the mark this player writes on the board.
    pub fn mark(self) -> Mark {
        match self {
            Player::Human => Mark::X,
            Player::Computer => Mark::O,
        }
    }

    /// Wire code for this player (1 = human, 2 = computer).
    pub fn code(self) -> u8 {
        match self {
            Player::Human => 1,
            Player::Computer => 2,
        }
    }
}

/// Whose move is legal next.
pub type Turn = Player;

/// Symbol drawn for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Mark {
    /// Human mark.
    X,
    /// Computer mark.
    O,
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Square {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a player's mark.
    Occupied(Player),
}

impl Square {
    /// Wire code for this cell (0 = empty, 1 = human, 2 = computer).
    pub fn code(self) -> u8 {
        match self {
            Square::Empty => 0,
            Square::Occupied(player) => player.code(),
        }
    }

    /// Decodes a wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Square::Empty),
            1 => Some(Square::Occupied(Player::Human)),
            2 => Some(Square::Occupied(Player::Computer)),
            _ => None,
        }
    }

    /// Returns true if the cell holds `player`'s mark.
    pub fn is(self, player: Player) -> bool {
        self == Square::Occupied(player)
    }
}

/// 3x3 board, cells indexed 0-8 in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELL_COUNT],
        }
    }

    /// Builds a board from wire codes, or `None` if any code is not 0, 1 or 2.
    pub fn from_codes(codes: [u8; CELL_COUNT]) -> Option<Self> {
        let mut squares = [Square::Empty; CELL_COUNT];
        for (square, code) in squares.iter_mut().zip(codes) {
            *square = Square::from_code(code)?;
        }
        Some(Self { squares })
    }

    /// Gets the cell at `cell`, or `None` if the index is off the board.
    pub fn get(&self, cell: usize) -> Option<Square> {
        self.squares.get(cell).copied()
    }

    /// Checks if a cell is on the board and empty.
    pub fn is_empty(&self, cell: usize) -> bool {
        matches!(self.get(cell), Some(Square::Empty))
    }

    /// Writes `player`'s mark into `cell`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::InvalidCellIndex`] if `cell` is not in `0..9`
    /// - [`MoveError::CellOccupied`] if the cell already holds a mark
    ///
    /// The board is untouched on failure.
    #[instrument(skip(self))]
    pub fn place(&mut self, cell: usize, player: Player) -> Result<(), MoveError> {
        let square = self
            .squares
            .get_mut(cell)
            .ok_or(MoveError::InvalidCellIndex(cell))?;
        if *square != Square::Empty {
            return Err(MoveError::CellOccupied(cell));
        }
        *square = Square::Occupied(player);
        Ok(())
    }

    /// Indices of all empty cells, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&cell| self.is_empty(cell)).collect()
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares.iter().filter(|s| s.is(player)).count()
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    /// Wire representation: 0 = empty, 1 = human, 2 = computer.
    pub fn codes(&self) -> [u8; CELL_COUNT] {
        self.squares.map(Square::code)
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; CELL_COUNT];
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let cell = row * 3 + col;
                let symbol = match self.squares[cell] {
                    Square::Empty => cell.to_string(),
                    Square::Occupied(player) => player.mark().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Won or Draw.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Wire code for the winner field: `None` while in progress,
    /// 0 for a draw, otherwise the winner's player code.
    pub fn winner_code(self) -> Option<u8> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Draw => Some(0),
            GameStatus::Won(player) => Some(player.code()),
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(player) => write!(f, "{} wins", player),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_rejects_out_of_range() {
        let mut board = Board::new();
        assert_eq!(
            board.place(9, Player::Human),
            Err(MoveError::InvalidCellIndex(9))
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut board = Board::new();
        board.place(4, Player::Human).unwrap();
        let before = board.clone();
        assert_eq!(
            board.place(4, Player::Computer),
            Err(MoveError::CellOccupied(4))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_codes_round_trip_fixture() {
        let board = Board::from_codes([2, 2, 0, 1, 1, 0, 0, 0, 0]).unwrap();
        assert_eq!(board.get(0), Some(Square::Occupied(Player::Computer)));
        assert_eq!(board.get(3), Some(Square::Occupied(Player::Human)));
        assert_eq!(board.codes(), [2, 2, 0, 1, 1, 0, 0, 0, 0]);
        assert!(Board::from_codes([3, 0, 0, 0, 0, 0, 0, 0, 0]).is_none());
    }

    #[test]
    fn test_display_marks() {
        let board = Board::from_codes([1, 0, 0, 0, 2, 0, 0, 0, 0]).unwrap();
        assert_eq!(board.display(), "X|1|2\n-+-+-\n3|O|5\n-+-+-\n6|7|8");
    }

    #[test]
    fn test_winner_codes() {
        assert_eq!(GameStatus::InProgress.winner_code(), None);
        assert_eq!(GameStatus::Draw.winner_code(), Some(0));
        assert_eq!(GameStatus::Won(Player::Human).winner_code(), Some(1));
        assert_eq!(GameStatus::Won(Player::Computer).winner_code(), Some(2));
    }
}
