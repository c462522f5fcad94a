//! CLI error types

use thiserror::Error;
use twister_core::StateError;

use crate::config::ConfigError;

/// Errors surfaced by `twister` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid state file {path}: {source}")]
    State {
        path: String,
        #[source]
        source: StateError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Self-check failed: {0}")]
    CheckFailed(String),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
