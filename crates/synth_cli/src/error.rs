//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;
use synth_core::types::SimulationError;

/// Errors surfaced by the `synth` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A simulation run failed.
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML encoding failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
