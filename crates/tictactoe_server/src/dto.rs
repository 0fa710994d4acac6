//! JSON bodies exchanged with browser clients.
//!
//! Field names and the 0/1/2 encodings are the wire contract of the
//! existing web client and must not change.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tictactoe_engine::{CELL_COUNT, Game};

/// Value of the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseStatus {
    /// Request applied.
    Success,
    /// Target cell already taken.
    InvalidMove,
    /// Bad or missing cell index, or a server-side failure.
    Error,
    /// Move submitted after the game ended.
    GameOver,
}

/// Body of `POST /make_move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MakeMoveRequest {
    /// Cell 0-8, row-major.
    #[serde(default)]
    pub cell_index: Option<i64>,
}

/// Game state as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse {
    /// Always `success`.
    pub status: ResponseStatus,
    /// 0 = empty, 1 = human (X), 2 = computer (O).
    pub board: [u8; CELL_COUNT],
    /// Player code whose move is next; the last mover once the game is over.
    pub current_player: u8,
    /// True once won or drawn.
    pub game_over: bool,
    /// `null` while playing, 0 for a draw, else the winner's code.
    pub winner: Option<u8>,
}

impl From<&Game> for GameResponse {
    fn from(game: &Game) -> Self {
        Self {
            status: ResponseStatus::Success,
            board: game.board().codes(),
            current_player: game.turn().code(),
            game_over: game.is_over(),
            winner: game.status().winner_code(),
        }
    }
}

/// Body returned with a 4xx/5xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ErrorResponse {
    /// Failure category.
    pub status: ResponseStatus,
    /// Text for the player.
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Live session count.
    pub sessions: usize,
}
