//! Tic-tac-toe server binary.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tictactoe_server::{AppState, ServerConfig, build_router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli)?;
    run_http_server(config).await
}

/// Merges the config file (if any) with command-line overrides.
#[instrument(skip(cli))]
fn resolve_config(cli: Cli) -> Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(max_sessions) = cli.max_sessions {
        config = config.with_max_sessions(max_sessions);
    }
    if let Some(secs) = cli.idle_timeout_secs {
        config = config.with_idle_timeout_secs(secs);
    }
    Ok(config)
}

/// Runs the HTTP game server until the process is stopped.
#[instrument(skip(config), fields(host = %config.host(), port = *config.port()))]
async fn run_http_server(config: ServerConfig) -> Result<()> {
    info!(
        seed = ?config.seed(),
        max_sessions = *config.max_sessions(),
        "Starting tic-tac-toe server"
    );

    let app = build_router(AppState::new(&config));
    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}/", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
