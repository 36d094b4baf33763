//! Importing `compilerOptions.paths` from a tsconfig as aliases.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use path_clean::PathClean;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tsconfig {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    #[serde(default)]
    paths: IndexMap<String, Vec<String>>,
}

/// Read `path` and turn its path mappings into `(prefix, dir)` aliases.
///
/// Targets are made relative to `root`. Only the first target of each
/// mapping is used; patterns with a wildcard anywhere but at the end are
/// skipped. The file must be plain JSON.
pub fn tsconfig_aliases(path: &Path, root: &Path) -> Result<IndexMap<String, String>> {
    let content = fs::read_to_string(path)?;
    let tsconfig: Tsconfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidTsconfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let tsconfig_dir = path.parent().unwrap_or(root);
    let base = match &tsconfig.compiler_options.base_url {
        Some(base_url) => tsconfig_dir.join(base_url),
        None => tsconfig_dir.to_path_buf(),
    };

    let mut aliases = IndexMap::new();
    for (pattern, targets) in &tsconfig.compiler_options.paths {
        let Some(target) = targets.first() else {
            continue;
        };
        let Some((prefix, dir)) = path_mapping(pattern, target) else {
            debug!(pattern, "skipping unsupported tsconfig path mapping");
            continue;
        };
        let dir = relative_to(&base.join(dir), root);
        aliases.insert(prefix.to_string(), dir);
    }

    Ok(aliases)
}

/// `"@/*": ["src/*"]` becomes `("@", "src")`; exact mappings pass through.
fn path_mapping<'a>(pattern: &'a str, target: &'a str) -> Option<(&'a str, &'a str)> {
    match (pattern.strip_suffix("/*"), target.strip_suffix("/*")) {
        (Some(prefix), Some(dir)) if !prefix.contains('*') && !dir.contains('*') => {
            Some((prefix, dir))
        }
        (None, None) if !pattern.contains('*') && !target.contains('*') => Some((pattern, target)),
        _ => None,
    }
}

/// Lexically normalize `path` and express it relative to `root` when below it.
fn relative_to(path: &Path, root: &Path) -> String {
    let normalized = path.clean();
    let normalized_root = root.clean();
    let relative = normalized
        .strip_prefix(&normalized_root)
        .map(Path::to_path_buf)
        .unwrap_or(normalized);

    if relative.as_os_str().is_empty() {
        ".".to_string()
    } else {
        relative.to_string_lossy().into_owned()
    }
}
