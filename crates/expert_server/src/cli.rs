//! Command-line interface for expert_server.

use clap::{Parser, Subcommand};
use expert_tictactoe::Player;

/// Expert tic-tac-toe move server
#[derive(Parser, Debug)]
#[command(name = "expert_server")]
#[command(about = "Answers tic-tac-toe boards with an expert move", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP move server
    Serve {
        /// Port to bind to (overrides config file and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Compute a single move and print the resulting board
    Move {
        /// Board as 9 characters over x, o and space (quote it)
        board: String,

        /// Player to move
        #[arg(long, default_value = "o")]
        player: Player,

        /// Refuse to move for a player already ahead on marks
        #[arg(long)]
        strict_turns: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["expert_server", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { port, host, config } => {
                assert_eq!(port, Some(8080));
                assert_eq!(host, None);
                assert_eq!(config, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_move_defaults_to_o() {
        let cli = Cli::try_parse_from(["expert_server", "move", "x        "]).unwrap();
        match cli.command {
            Command::Move {
                board,
                player,
                strict_turns,
            } => {
                assert_eq!(board, "x        ");
                assert_eq!(player, Player::O);
                assert!(!strict_turns);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_player() {
        assert!(Cli::try_parse_from(["expert_server", "move", "         ", "--player", "z"]).is_err());
    }
}
