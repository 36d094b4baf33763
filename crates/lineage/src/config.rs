//! Engine configuration and the alias table.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Extensions probed, in order, when a specifier omits one.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "json"];

/// Extensions of files the builder will enumerate and parse as modules.
pub const PARSEABLE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Extensions classified as stylesheets.
pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl", "stylus"];

/// Directory names never descended into when enumerating a root.
pub const SKIPPED_DIRECTORIES: &[&str] = &["node_modules"];

/// Configuration for one engine instance.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Project root. Relative alias targets and roots are resolved against it.
    pub root: PathBuf,

    /// Specifier prefix → directory relative to `root` (e.g. `"@"` → `"src"`).
    pub path_aliases: Vec<(String, String)>,

    /// Directories or files that seed graph construction.
    pub roots: Vec<PathBuf>,
}

impl EngineConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Resolve `path` against the project root.
    pub fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf().clean()
        } else {
            self.root.join(path).clean()
        }
    }
}

/// Immutable map from specifier prefix to absolute base directory.
///
/// Entries are kept longest-prefix first so `@app/x` matches an `@app`
/// alias before a shorter `@` alias.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<(String, PathBuf)>,
}

impl AliasTable {
    /// Build the table, resolving every target against `root`.
    pub fn new<'a, I>(root: &Path, aliases: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: Vec<(String, PathBuf)> = aliases
            .into_iter()
            .filter(|(prefix, _)| !prefix.is_empty())
            .map(|(prefix, target)| (prefix.to_string(), root.join(target).clean()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match `specifier` against the table.
    ///
    /// Returns the alias base joined with the remainder of the specifier.
    /// A prefix matches when it equals the specifier or is followed by `/`,
    /// so an `@` alias does not capture `@scope/pkg`.
    pub fn resolve(&self, specifier: &str) -> Option<PathBuf> {
        for (prefix, base) in &self.entries {
            let Some(rest) = specifier.strip_prefix(prefix.as_str()) else {
                continue;
            };

            let rest = if rest.is_empty() {
                rest
            } else if let Some(stripped) = rest.strip_prefix('/') {
                stripped
            } else if prefix.ends_with('/') {
                rest
            } else {
                continue;
            };

            return Some(if rest.is_empty() {
                base.clone()
            } else {
                base.join(rest).clean()
            });
        }
        None
    }
}
