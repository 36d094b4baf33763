//! Query command implementation.

use lineage::QueryOutcome;
use serde_json::json;

use crate::cli::QueryArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the query command.
///
/// Prints one dependency per line, relative to the project root, or a
/// JSON document with `--json`. A file that cannot be found or analyzed
/// is an error.
pub async fn execute(args: QueryArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let mut engine = utils::open_engine(&args.project, &cwd)?;
    let target = utils::resolve_path(&args.file, &cwd);

    let deps = match engine.query(&target).await {
        QueryOutcome::Found(deps) => deps,
        QueryOutcome::NotFound(path) => {
            ui::warning(&format!("{} could not be analyzed", path.display()));
            return Err(CliError::FileNotFound(path));
        }
    };

    let root = engine.config().root.clone();
    if args.json {
        let document = json!({
            "file": target,
            "root": root,
            "dependencies": deps,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        for dep in &deps {
            println!("{}", utils::display_path(dep, &root));
        }
        ui::success(&format!("{} dependencies", deps.len()));
    }

    Ok(())
}
