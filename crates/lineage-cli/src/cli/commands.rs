use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_alias;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the files a module depends on
    ///
    /// Every symbol the file imports is traced through re-exports to its
    /// declaring file; those files, their own dependencies and the
    /// stylesheets they import make up the result.
    Query(QueryArgs),

    /// Print the files that declare symbols exported by a module
    Trace(TraceArgs),

    /// Analyze the configured roots and print the dependency graph
    Graph(GraphArgs),
}

/// Options shared by every command that opens a project.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root (defaults to the config's root, or the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file to load instead of discovering lineage.toml / package.json
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path alias, overriding the config
    ///
    /// Examples:
    ///   --alias @=src
    ///   --alias ~utils=src/utils
    #[arg(short, long = "alias", value_name = "PREFIX=DIR", value_parser = parse_alias)]
    pub aliases: Vec<(String, String)>,
}

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// File to query, relative to the current directory
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print JSON instead of one path per line
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the trace command
#[derive(Args, Debug)]
pub struct TraceArgs {
    /// File exporting the symbols, relative to the current directory
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Exported names to trace (`default` for the default export)
    #[arg(required = true, value_name = "SYMBOL")]
    pub symbols: Vec<String>,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Files or directories to analyze (defaults to the configured roots)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the full records as JSON
    #[arg(long)]
    pub json: bool,
}
