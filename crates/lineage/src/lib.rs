//! # lineage
//!
//! Symbol-level dependency analysis for JavaScript and TypeScript projects.
//!
//! A plain import graph says `index.ts` depends on `components/index.ts`. That
//! file is often a barrel that only forwards symbols from elsewhere. `lineage`
//! follows each imported symbol through re-exports until it reaches the file
//! that actually declares it, and answers "which files does this file really
//! depend on?" at that granularity.
//!
//! ```rust,no_run
//! use lineage::Engine;
//!
//! # async fn example() -> lineage::Result<()> {
//! let mut engine = Engine::builder()
//!     .root("/path/to/project")
//!     .path_alias("@", "src")
//!     .build()?;
//!
//! for dep in engine.query("src/index.ts").await.dependencies() {
//!     println!("{dep}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The pieces, leaves first:
//!
//! - [`resolver`] turns a specifier into a [`FileId`], or classifies it as
//!   external.
//! - [`extract`] parses one file with oxc and lowers it into a
//!   [`ModuleRecord`].
//! - [`builder`] drives extraction over the import ledger, once per file.
//! - [`tracer`] finds the declaring file(s) of an exported symbol.
//! - [`query`] computes the transitive closure for one file.

pub mod builder;
pub mod config;
pub mod engine;
pub mod extract;
pub mod file_id;
pub mod graph;
pub mod query;
pub mod record;
pub mod resolver;
pub mod runtime;
pub mod tracer;

pub use builder::{BuildFailure, BuildReport, GraphBuilder};
pub use config::{AliasTable, EngineConfig};
pub use engine::{Configured, Engine, EngineBuilder, EngineError, Unconfigured};
pub use extract::{ExtractError, Extractor, ModuleItem, ModuleScan, scan_module};
pub use file_id::{FileId, FileIdError};
pub use graph::DependencyGraph;
pub use query::{QueryOutcome, dependency_closure};
pub use record::{DEFAULT_EXPORT, EXPORT_EQUALS, ModuleRecord, NAMESPACE, SymbolName};
pub use resolver::{ModuleResolver, Resolved};
pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
pub use tracer::trace_origins;

#[cfg(not(target_family = "wasm"))]
pub use runtime::native::NativeRuntime;

/// Result type alias for engine construction.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests;
