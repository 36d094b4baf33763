//! lineage CLI entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use lineage_cli::{cli, commands, error, logger};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Query(query_args) => commands::query_execute(query_args).await,
        cli::Command::Trace(trace_args) => commands::trace_execute(trace_args).await,
        cli::Command::Graph(graph_args) => commands::graph_execute(graph_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
