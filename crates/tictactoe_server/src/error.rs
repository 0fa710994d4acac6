//! Error types for the HTTP layer.
//!
//! [`ApiError`] unifies every way a request can fail and renders it as
//! the `{status, message}` body the web client understands.

use crate::dto::{ErrorResponse, ResponseStatus};
use crate::session::SessionLimitReached;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::Display;
use tictactoe_engine::MoveError;
use tracing::warn;

/// Errors that can occur while serving a request.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ApiError {
    /// The engine rejected the move.
    #[display("{}", _0)]
    Move(MoveError),

    /// `cell_index` absent or null.
    #[display("Missing cell index")]
    MissingCellIndex,

    /// `cell_index` not representable as a board index.
    #[display("Cell index {} is off the board", _0)]
    CellIndexOutOfRange(i64),

    /// Body could not be parsed.
    #[display("Malformed request: {}", _0)]
    MalformedRequest(String),

    /// `x-session-id` header is not a usable id.
    #[display("Invalid session id")]
    InvalidSessionId,

    /// No room for another session.
    #[display("{}", _0)]
    SessionLimit(SessionLimitReached),
}

impl std::error::Error for ApiError {}

impl From<MoveError> for ApiError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<SessionLimitReached> for ApiError {
    fn from(err: SessionLimitReached) -> Self {
        Self::SessionLimit(err)
    }
}

impl ApiError {
    /// HTTP status, `status` field and message for this error.
    pub fn parts(&self) -> (StatusCode, ResponseStatus, String) {
        use ResponseStatus as S;
        match self {
            Self::Move(MoveError::GameAlreadyOver) => (
                StatusCode::BAD_REQUEST,
                S::GameOver,
                "Game is already over.".to_string(),
            ),
            Self::Move(MoveError::CellOccupied(_)) => (
                StatusCode::BAD_REQUEST,
                S::InvalidMove,
                "Cell already taken.".to_string(),
            ),
            Self::Move(MoveError::InvalidCellIndex(_))
            | Self::MissingCellIndex
            | Self::CellIndexOutOfRange(_) => (
                StatusCode::BAD_REQUEST,
                S::Error,
                "Invalid cell index.".to_string(),
            ),
            Self::MalformedRequest(_) | Self::InvalidSessionId => {
                (StatusCode::BAD_REQUEST, S::Error, self.to_string())
            }
            Self::Move(MoveError::OutOfTurn(_) | MoveError::NoMoveAvailable) => {
                (StatusCode::INTERNAL_SERVER_ERROR, S::Error, self.to_string())
            }
            Self::SessionLimit(_) => (StatusCode::SERVICE_UNAVAILABLE, S::Error, self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, status, message) = self.parts();
        warn!(code = code.as_u16(), %status, error = %self, "Request rejected");
        (code, Json(ErrorResponse::new(status, message))).into_response()
    }
}
