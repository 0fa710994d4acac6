//! Tic-tac-toe game server.
//!
//! Serves the [`tictactoe_engine`] game over HTTP so a browser can play
//! X against the computer's O.
//!
//! # Architecture
//!
//! - **Api**: axum routes speaking the web client's JSON format
//! - **Session**: one game per client, keyed by the `x-session-id` header
//! - **Config**: bind address, random seed and session cap from TOML
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_server::{AppState, ServerConfig, build_router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default().with_seed(7);
//! let app = build_router(AppState::new(&config));
//! let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod dto;
mod error;
mod session;

pub use api::{AppState, SESSION_HEADER, SessionKey, build_router};
pub use config::{ConfigError, ServerConfig};
pub use dto::{ErrorResponse, GameResponse, HealthResponse, MakeMoveRequest, ResponseStatus};
pub use error::ApiError;
pub use session::{DEFAULT_SESSION, GameSession, SessionId, SessionLimitReached, SessionManager};
