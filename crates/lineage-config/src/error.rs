//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Discovery/loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid config value for `{field}`{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid tsconfig {path}: {message}")]
    InvalidTsconfig { path: PathBuf, message: String },

    // Schema validation errors (no filesystem checks)
    #[error("alias prefix must not be empty (target {dir:?})")]
    EmptyAliasPrefix { dir: String },

    #[error("alias `{prefix}` has an empty target directory")]
    EmptyAliasTarget { prefix: String },

    // Filesystem validation errors
    #[error("project root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("project root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, hint: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            hint: Some(hint.to_string()),
        }
    }
}
