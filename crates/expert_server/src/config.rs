//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use expert_tictactoe::{Player, TurnRule};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the move server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    port: u16,

    /// The player the server moves for.
    #[serde(default = "default_player")]
    player: Player,

    /// How turn order is checked.
    #[serde(default)]
    turn_rule: TurnRule,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    6060
}

fn default_player() -> Player {
    Player::O
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            player: default_player(),
            turn_rule: TurnRule::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(port = config.port, player = %config.player, "Config loaded successfully");
        Ok(config)
    }

    /// Applies the `PORT` environment variable, if set.
    #[instrument(skip(self))]
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_port_var(std::env::var("PORT").ok().as_deref())
    }

    fn with_port_var(mut self, port: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = port {
            self.port = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid PORT {:?}: {}", raw, e)))?;
            debug!(port = self.port, "Port taken from environment");
        }
        Ok(self)
    }

    /// Replaces the listen address with any values given on the command line.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(*config.port(), 6060);
        assert_eq!(*config.player(), Player::O);
        assert_eq!(*config.turn_rule(), TurnRule::Permissive);
    }

    #[test]
    fn test_port_variable_overrides() {
        let config = ServerConfig::default().with_port_var(Some("8080")).unwrap();
        assert_eq!(*config.port(), 8080);

        let unchanged = ServerConfig::default().with_port_var(None).unwrap();
        assert_eq!(*unchanged.port(), 6060);
    }

    #[test]
    fn test_bad_port_variable() {
        let err = ServerConfig::default().with_port_var(Some("web")).unwrap_err();
        assert!(err.message.contains("Invalid PORT"));
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = ServerConfig::default().with_overrides(Some("127.0.0.1".into()), Some(3000));
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(*config.port(), 3000);
    }
}
