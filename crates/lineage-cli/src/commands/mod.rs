//! Command implementations.
//!
//! - [`query`] - Symbol-level dependencies of a file
//! - [`trace`] - Declaring files of exported symbols
//! - [`graph`] - Full graph introspection
//!
//! Each command exposes an `execute` function taking its parsed arguments.

pub mod graph;
pub mod query;
pub mod trace;
pub(crate) mod utils;

pub use graph::execute as graph_execute;
pub use query::execute as query_execute;
pub use trace::execute as trace_execute;
