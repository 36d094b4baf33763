//! Graph command implementation.

use crate::cli::GraphArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the graph command.
///
/// Builds from the given paths (or the configured roots), reports files
/// that could not be analyzed, then prints the graph.
pub async fn execute(args: GraphArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let mut engine = utils::open_engine(&args.project, &cwd)?;

    let report = if args.paths.is_empty() {
        engine.build().await
    } else {
        let paths: Vec<_> = args
            .paths
            .iter()
            .map(|path| utils::resolve_path(path, &cwd))
            .collect();
        engine.build_from(&paths).await
    };

    for failure in &report.failures {
        ui::warning(&format!("skipped {}: {}", failure.file.display(), failure.reason));
    }

    let root = engine.config().root.clone();
    let snapshot = engine.graph().snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        for (file, record) in &snapshot {
            println!("{}", utils::display_path(file, &root));
            for (target, symbols) in &record.imports {
                let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
                println!(
                    "  -> {} {{{}}}",
                    utils::display_path(target, &root),
                    symbols.join(", ")
                );
            }
            for style in &record.style_imports {
                println!("  -> {} (style)", utils::display_path(style, &root));
            }
        }
    }

    ui::info(&format!(
        "{} files analyzed, {} skipped",
        report.analyzed,
        report.failures.len()
    ));
    Ok(())
}
