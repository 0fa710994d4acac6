//! Command-line interface for tictactoe_server.

use clap::Parser;
use std::path::PathBuf;

/// Play tic-tac-toe against the computer in your browser
#[derive(Parser, Debug)]
#[command(name = "tictactoe_server")]
#[command(about = "Tic-tac-toe game server with a rule-based computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Seed for the computer's tie-breaking (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of concurrent sessions (overrides the config file)
    #[arg(long)]
    pub max_sessions: Option<usize>,

    /// Seconds before an unused session may be evicted (overrides the config file)
    #[arg(long)]
    pub idle_timeout_secs: Option<u64>,
}
