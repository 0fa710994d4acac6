//! Tic-tac-toe against a rule-based computer opponent.
//!
//! The crate holds the whole game core and performs no I/O:
//!
//! - **Board State** ([`Board`], [`GameStatus`]): the nine cells and the
//!   status evaluator in [`rules`].
//! - **Move Orchestrator** ([`Game`]): validates the human's move, lets the
//!   computer reply, and stops at a win or draw.
//! - **Computer Policy** ([`GreedyPolicy`]): win, block, center, corner,
//!   side, with seedable tie-breaking.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Game, GameStatus, GreedyPolicy};
//!
//! let mut game = Game::new();
//! let mut policy = GreedyPolicy::seeded(1);
//!
//! let outcome = game.submit_human_move(0, &mut policy)?;
//! assert_eq!(outcome.computer_cell, Some(4));
//! assert_eq!(outcome.status, GameStatus::InProgress);
//! # Ok::<(), tictactoe_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod policy;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::{Game, MoveOutcome, Phase};
pub use policy::{GreedyPolicy, MovePolicy, Rule, Selection};
pub use types::{Board, CELL_COUNT, GameStatus, Mark, Player, Square, Turn};
