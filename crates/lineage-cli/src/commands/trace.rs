//! Trace command implementation.

use std::collections::BTreeMap;

use crate::cli::TraceArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the trace command.
///
/// For each symbol, prints the files that declare it. A symbol the file
/// does not export has no origins.
pub async fn execute(args: TraceArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let mut engine = utils::open_engine(&args.project, &cwd)?;
    let target = utils::resolve_path(&args.file, &cwd);

    let Some(file) = engine.ensure_analyzed(&target).await else {
        return Err(CliError::FileNotFound(target));
    };

    let root = engine.config().root.clone();
    let mut origins = BTreeMap::new();
    for symbol in &args.symbols {
        let found = engine.trace_origins(&file, symbol);
        if found.is_empty() {
            ui::warning(&format!("{symbol} has no origin in {}", utils::display_path(&file, &root)));
        }
        origins.insert(symbol.as_str(), found);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&origins)?);
    } else {
        for (symbol, files) in &origins {
            for origin in files {
                println!("{symbol}\t{}", utils::display_path(origin, &root));
            }
        }
    }

    Ok(())
}
