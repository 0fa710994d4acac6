//! Moves and the errors that reject them.

use super::Player;
use serde::{Deserialize, Serialize};

/// A mark placed by a player, recorded in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The cell (0-8) receiving the mark.
    pub cell: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, cell: usize) -> Self {
        Self { player, cell }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player.mark(), self.cell)
    }
}

/// Error that can occur when validating or applying a move.
///
/// Every variant is recoverable and leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is outside `0..9`.
    #[display("Cell index {} is off the board", _0)]
    InvalidCellIndex(usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The game has been won or drawn.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// A move was attempted out of sequence.
    #[display("It's not {}'s turn", _0)]
    OutOfTurn(Player),

    /// The move policy found no empty cell.
    #[display("No move available")]
    NoMoveAvailable,
}

impl std::error::Error for MoveError {}
