//! HTTP routes for playing against the computer.

use crate::config::ServerConfig;
use crate::dto::{GameResponse, HealthResponse, MakeMoveRequest};
use crate::error::ApiError;
use crate::session::{DEFAULT_SESSION, SessionManager};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{Request, StatusCode};
use axum::response::Html;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tictactoe_engine::MoveError;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Header carrying the client's session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Longest accepted session id.
const MAX_SESSION_ID_LEN: usize = 128;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// All live games.
    pub sessions: SessionManager,
}

impl AppState {
    /// Builds state from configuration.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: SessionManager::new(
                *config.seed(),
                *config.max_sessions(),
                config.idle_timeout(),
            ),
        }
    }
}

/// Session id taken from the [`SESSION_HEADER`] header, or
/// [`DEFAULT_SESSION`] when the header is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey(pub String);

impl<S: Send + Sync> FromRequestParts<S> for SessionKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(SESSION_HEADER) else {
            return Ok(Self(DEFAULT_SESSION.to_string()));
        };
        let id = value
            .to_str()
            .map_err(|_| ApiError::InvalidSessionId)?
            .trim();
        if id.is_empty() || id.len() > MAX_SESSION_ID_LEN {
            return Err(ApiError::InvalidSessionId);
        }
        Ok(Self(id.to_string()))
    }
}

/// Builds the router.
///
/// - `GET /` -- browser client
/// - `GET /health` -- liveness and session count
/// - `GET /board` -- current game, without creating a session
/// - `POST /start_game` -- fresh game
/// - `POST /make_move` -- human move plus computer reply
/// - `POST /reset_game` -- fresh game
/// - `DELETE /session` -- forget the caller's game
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/board", get(board))
        .route("/start_game", post(start_game))
        .route("/make_move", post(make_move))
        .route("/reset_game", post(reset_game))
        .route("/session", delete(end_session))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[instrument(skip(state))]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new("ok".to_string(), state.sessions.len()))
}

#[instrument(skip(state))]
async fn board(
    State(state): State<AppState>,
    SessionKey(id): SessionKey,
) -> Result<Json<GameResponse>, ApiError> {
    Ok(Json(state.sessions.view(&id, |game| GameResponse::from(game))))
}

/// Resets the caller's game and returns the empty board.
#[instrument(skip(state))]
async fn start_game(
    State(state): State<AppState>,
    SessionKey(id): SessionKey,
) -> Result<Json<GameResponse>, ApiError> {
    info!(session_id = %id, "Starting new game");
    fresh_game(&state, &id)
}

#[instrument(skip(state))]
async fn reset_game(
    State(state): State<AppState>,
    SessionKey(id): SessionKey,
) -> Result<Json<GameResponse>, ApiError> {
    info!(session_id = %id, "Resetting game");
    fresh_game(&state, &id)
}

fn fresh_game(state: &AppState, id: &str) -> Result<Json<GameResponse>, ApiError> {
    let view = state.sessions.with_session(id, |session| {
        session.game.reset();
        GameResponse::from(&session.game)
    })?;
    Ok(Json(view))
}

/// Applies the human's move and, unless that ended the game, the
/// computer's reply.
#[instrument(skip(state, body))]
async fn make_move(
    State(state): State<AppState>,
    SessionKey(id): SessionKey,
    body: Result<Json<MakeMoveRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, ApiError> {
    let view = state.sessions.with_session(&id, |session| -> Result<GameResponse, ApiError> {
        // A finished game rejects every submission, even one without a usable index.
        if session.game.is_over() {
            return Err(ApiError::Move(MoveError::GameAlreadyOver));
        }
        let Json(request) = body.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
        let cell = request.cell_index.ok_or(ApiError::MissingCellIndex)?;
        let cell = usize::try_from(cell).map_err(|_| ApiError::CellIndexOutOfRange(cell))?;

        let outcome = session.game.submit_human_move(cell, &mut session.policy)?;
        debug!(
            session_id = %session.id,
            cell,
            computer_cell = ?outcome.computer_cell,
            status = %outcome.status,
            "Move applied"
        );
        Ok(GameResponse::from(&session.game))
    })??;

    Ok(Json(view))
}

#[instrument(skip(state))]
async fn end_session(State(state): State<AppState>, SessionKey(id): SessionKey) -> StatusCode {
    if state.sessions.remove(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
