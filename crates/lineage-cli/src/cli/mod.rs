//! Command-line interface definition.
//!
//! - `lineage query` - Symbol-level dependencies of one file
//! - `lineage trace` - Declaring files of exported symbols
//! - `lineage graph` - Build from the configured roots and dump the graph

mod commands;
mod validation;

use clap::Parser;

pub use commands::{Command, GraphArgs, ProjectArgs, QueryArgs, TraceArgs};
pub use validation::parse_alias;

/// lineage - symbol-level dependency analysis for JavaScript and TypeScript
#[derive(Parser, Debug)]
#[command(
    name = "lineage",
    version,
    about = "Symbol-level dependency analysis for JavaScript and TypeScript",
    long_about = "lineage follows every imported symbol through barrels and re-exports\n\
                  to the file that declares it, and reports the files a module really\n\
                  depends on."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
