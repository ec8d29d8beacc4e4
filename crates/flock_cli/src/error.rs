//! CLI error types

use flock_core::settings::SettingsError;
use flock_core::types::SamplingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by flockgen commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Sampling error: {0}")]
    Sampling(#[from] SamplingError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
