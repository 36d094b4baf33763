//! Error handling for the lineage CLI.
//!
//! Commands return [`CliError`]; `main` turns it into a miette report.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] lineage_config::ConfigError),

    /// The engine rejected its configuration
    #[error(transparent)]
    Engine(#[from] lineage::EngineError),

    /// The queried file could not be found or analyzed
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

impl CliError {
    /// Actionable follow-up shown under the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Config(lineage_config::ConfigError::NotFound) => {
                Some("Create a lineage.toml or pass --config <path>")
            }
            CliError::Config(lineage_config::ConfigError::RootNotFound(_)) => {
                Some("Check the `root` field of your config or pass --root <dir>")
            }
            CliError::Config(lineage_config::ConfigError::InvalidTsconfig { .. }) => {
                Some("tsconfig files are read as plain JSON; remove comments and trailing commas")
            }
            CliError::FileNotFound(_) => Some(
                "The file does not exist, has an unsupported extension, or failed to parse (run with --verbose)",
            ),
            _ => None,
        }
    }
}

/// Convert a CLI error to a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err.hint() {
        Some(hint) => miette::miette!(help = hint, "{}", err),
        None => miette::miette!("{}", err),
    }
}
