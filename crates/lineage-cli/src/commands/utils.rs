//! Project setup shared by all commands.

use std::path::{Path, PathBuf};

use lineage::{Engine, FileId};
use lineage_config::{ConfigDiscovery, ConfigValidator, FsValidator, LineageConfig};
use tracing::debug;

use crate::cli::ProjectArgs;
use crate::error::Result;

pub(crate) fn get_cwd() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Resolve `path` against `cwd` unless it is already absolute.
pub(crate) fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Load configuration and apply command-line overrides.
///
/// Discovery starts at `--root` when given, otherwise at the current
/// directory. `--root` and `--alias` win over the file.
pub(crate) fn load_config(args: &ProjectArgs, cwd: &Path) -> Result<LineageConfig> {
    let search_dir = args
        .root
        .as_deref()
        .map(|root| resolve_path(root, cwd))
        .unwrap_or_else(|| cwd.to_path_buf());
    let discovery = ConfigDiscovery::new(&search_dir);

    let mut config = match &args.config {
        Some(path) => discovery.load_from(&resolve_path(path, cwd))?,
        None => discovery.load_or_default()?,
    };

    if let Some(root) = &args.root {
        config.root = resolve_path(root, cwd);
    }
    for (prefix, dir) in &args.aliases {
        config.aliases.insert(prefix.clone(), dir.clone());
    }

    FsValidator.validate(&config)?;
    debug!(root = %config.root.display(), aliases = config.aliases.len(), "configuration loaded");
    Ok(config)
}

/// Open an engine for the project described by `args`.
pub(crate) fn open_engine(args: &ProjectArgs, cwd: &Path) -> Result<Engine> {
    let config = load_config(args, cwd)?;

    let mut builder = Engine::builder()
        .root(config.root.clone())
        .roots(config.roots.iter().cloned());
    for (prefix, dir) in config.alias_pairs() {
        builder = builder.path_alias(prefix, dir);
    }

    Ok(builder.build()?)
}

/// Display `file` relative to `root` when it lies below it.
pub(crate) fn display_path(file: &FileId, root: &Path) -> String {
    match file.as_path().strip_prefix(root) {
        Ok(relative) => relative.display().to_string(),
        Err(_) => file.to_string(),
    }
}
