//! The `LineageConfig` structure.
//!
//! For file discovery and layered loading, see the `discovery` module.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Project configuration for an analysis run.
///
/// `root` is relative to the directory the configuration was loaded from;
/// alias targets and `roots` are relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Project root directory.
    pub root: PathBuf,

    /// Specifier prefix to directory, e.g. `"@" = "src"`.
    ///
    /// Resolution picks the longest matching prefix, so entry order has no
    /// effect. File and env sources load in sorted key order.
    pub aliases: IndexMap<String, String>,

    /// Files or directories analyzed by a full build. Empty means the root.
    pub roots: Vec<PathBuf>,

    pub settings: Settings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// tsconfig whose `compilerOptions.paths` are imported as aliases,
    /// relative to `root`.
    pub tsconfig: Option<PathBuf>,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            aliases: IndexMap::new(),
            roots: Vec::new(),
            settings: Settings::default(),
        }
    }
}

impl LineageConfig {
    /// Create from a `serde_json::Value`, for programmatic configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use lineage_config::LineageConfig;
    /// use serde_json::json;
    ///
    /// let config = LineageConfig::from_value(json!({
    ///     "aliases": { "@": "src" },
    ///     "roots": ["src"]
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.aliases["@"], "src");
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid("config", e))
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid("config", e))
    }

    /// Anchor a relative `root` at `base`.
    pub fn anchored_at(mut self, base: &Path) -> Self {
        if self.root.is_relative() {
            self.root = base.join(&self.root);
        }
        self
    }

    /// Aliases as `(prefix, dir)` pairs, in declaration order.
    pub fn alias_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(prefix, dir)| (prefix.as_str(), dir.as_str()))
    }

    /// Add aliases that are not configured yet; explicit entries win.
    pub fn merge_aliases(&mut self, extra: IndexMap<String, String>) {
        for (prefix, dir) in extra {
            self.aliases.entry(prefix).or_insert(dir);
        }
    }
}
