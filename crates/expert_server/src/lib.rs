//! HTTP boundary for the expert tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Routes**: `GET /move?board=...` answered by the engine, a usage hint
//!   everywhere else, CORS and request logging on every response
//! - **Config**: defaults, optional TOML file, `PORT`, then CLI flags
//! - **CLI**: `serve` runs the server, `move` answers one board offline

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod error;
mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::{AppState, MoveQuery, USAGE, router};

use expert_tictactoe::Engine;
use tracing::{info, instrument};

/// Binds the configured address and serves until the process stops.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(*config.player(), Engine::new(*config.turn_rule()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        player = %config.player(),
        turn_rule = ?config.turn_rule(),
        "The server is running on port {}",
        config.port()
    );

    axum::serve(listener, app).await?;
    Ok(())
}
