//! Turn sequencing for a human-versus-computer game.
//!
//! A [`Game`] moves through three phases:
//!
//! ```text
//! AwaitingHuman --human move--> AwaitingComputer --computer move--> AwaitingHuman
//!       \                              \
//!        `--line or full board-------------> Terminal --reset--> AwaitingHuman
//! ```
//!
//! The two halves of a round are separate operations so each can be
//! driven on its own; [`Game::submit_human_move`] chains them atomically.

use super::action::{Move, MoveError};
use super::policy::MovePolicy;
use super::rules::evaluate_status;
use super::{Board, GameStatus, Player, Turn};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the game is in its round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// Waiting for the human's mark.
    AwaitingHuman,
    /// The human has moved; the computer replies next.
    AwaitingComputer,
    /// Won or drawn; only a reset is accepted.
    Terminal,
}

/// State reported after a completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after both moves.
    pub board: Board,
    /// Status after both moves.
    pub status: GameStatus,
    /// Player whose move is legal next (the last mover once the game is over).
    pub next_turn: Turn,
    /// Cell the computer replied with, if it moved.
    pub computer_cell: Option<usize>,
}

/// A single game: board, turn, status and history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Turn,
    status: GameStatus,
    phase: Phase,
    history: Vec<Move>,
}

impl Game {
    /// Creates a fresh game with the human to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::Human,
            status: GameStatus::InProgress,
            phase: Phase::AwaitingHuman,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns whose move is next.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Places the human's mark and advances the phase.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameAlreadyOver`], [`MoveError::OutOfTurn`],
    /// [`MoveError::InvalidCellIndex`] or [`MoveError::CellOccupied`];
    /// the game is unchanged on error.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn apply_human_move(&mut self, cell: usize) -> Result<Phase, MoveError> {
        self.expect_turn(Player::Human)?;
        self.place(cell, Player::Human)
    }

    /// Asks `policy` for the computer's cell, places it and advances the phase.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameAlreadyOver`] or [`MoveError::OutOfTurn`] when
    /// called out of sequence, [`MoveError::NoMoveAvailable`] if the policy
    /// finds nothing, or a placement error if it picks an illegal cell.
    #[instrument(skip(self, policy), fields(phase = %self.phase))]
    pub fn apply_computer_move<P>(&mut self, policy: &mut P) -> Result<Phase, MoveError>
    where
        P: MovePolicy + ?Sized,
    {
        self.expect_turn(Player::Computer)?;
        let cell = policy
            .choose_cell(&self.board)
            .ok_or(MoveError::NoMoveAvailable)?;
        self.place(cell, Player::Computer)
    }

    /// Plays a full round: the human's move, then the computer's reply
    /// unless the human's move ended the game.
    ///
    /// Either the whole round is applied or nothing is.
    #[instrument(skip(self, policy))]
    pub fn submit_human_move<P>(
        &mut self,
        cell: usize,
        policy: &mut P,
    ) -> Result<MoveOutcome, MoveError>
    where
        P: MovePolicy + ?Sized,
    {
        let mut next = self.clone();
        let mut computer_cell = None;

        if next.apply_human_move(cell)? == Phase::AwaitingComputer {
            next.apply_computer_move(policy)?;
            computer_cell = next.history.last().map(|m| m.cell);
        }

        *self = next;
        info!(
            cell,
            computer_cell = ?computer_cell,
            status = %self.status,
            "Round complete"
        );
        Ok(self.outcome(computer_cell))
    }

    /// Clears the board and hands the first move to the human.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = Player::Human;
        self.status = GameStatus::InProgress;
        self.phase = Phase::AwaitingHuman;
        self.history.clear();
        debug!("Game reset");
    }

    /// Snapshot of the current state.
    pub fn outcome(&self, computer_cell: Option<usize>) -> MoveOutcome {
        MoveOutcome {
            board: self.board.clone(),
            status: self.status,
            next_turn: self.turn,
            computer_cell,
        }
    }

    fn expect_turn(&self, player: Player) -> Result<(), MoveError> {
        match (self.phase, player) {
            (Phase::Terminal, _) => Err(MoveError::GameAlreadyOver),
            (Phase::AwaitingHuman, Player::Human) | (Phase::AwaitingComputer, Player::Computer) => {
                Ok(())
            }
            _ => Err(MoveError::OutOfTurn(player)),
        }
    }

    fn place(&mut self, cell: usize, player: Player) -> Result<Phase, MoveError> {
        self.board.place(cell, player).inspect_err(|e| {
            warn!(cell, %player, error = %e, "Move rejected");
        })?;
        self.history.push(Move::new(player, cell));
        self.status = evaluate_status(&self.board);

        self.phase = if self.status.is_terminal() {
            info!(status = %self.status, moves = self.history.len(), "Game over");
            Phase::Terminal
        } else {
            self.turn = player.opponent();
            match self.turn {
                Player::Human => Phase::AwaitingHuman,
                Player::Computer => Phase::AwaitingComputer,
            }
        };
        Ok(self.phase)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
