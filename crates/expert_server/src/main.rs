//! Expert tic-tac-toe move server.

use anyhow::Result;
use clap::Parser;
use expert_server::ServerConfig;
use expert_server::cli::{Cli, Command};
use expert_tictactoe::{Board, Engine, Player, TurnRule};
use std::path::PathBuf;
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

    match cli.command {
        Command::Serve { port, host, config } => run_server(config, host, port).await,
        Command::Move {
            board,
            player,
            strict_turns,
        } => run_move(&board, player, strict_turns),
    }
}

/// Layers the configuration and runs the HTTP server.
#[instrument]
async fn run_server(config: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = match config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    let config = config.with_env()?.with_overrides(host, port);
    info!(?config, "Starting expert move server");

    expert_server::serve(config).await
}

/// Prints one move for `board`.
#[instrument]
fn run_move(board: &str, player: Player, strict_turns: bool) -> Result<()> {
    let rule = if strict_turns {
        TurnRule::Strict
    } else {
        TurnRule::Permissive
    };

    let mut board: Board = board.parse()?;
    let selection = Engine::new(rule).make_move(&mut board, player)?;

    println!("{:?}", board.to_string());
    println!("{}", board.display());
    println!("{} played {} ({})", player, selection.position, selection.rule);
    Ok(())
}
