//! Logging setup for the lineage CLI.
//!
//! Log lines go to stderr so that stdout only carries command output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "lineage=debug,lineage_config=debug,lineage_cli=debug";
const QUIET_FILTER: &str = "lineage=error,lineage_config=error,lineage_cli=error";
const DEFAULT_FILTER: &str = "lineage=info,lineage_config=info,lineage_cli=info";

/// Initialize the tracing subscriber.
///
/// The level is chosen in this order:
/// 1. `--verbose`: debug for lineage crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for lineage crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
