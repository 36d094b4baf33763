//! Command-line interface for lineage.
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - `query`, `trace` and `graph`
//! - [`error`] - Error types and miette conversion
//! - [`logger`] - tracing setup
//! - [`ui`] - Status messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
