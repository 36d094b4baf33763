//! File-based config discovery and layered loading for CLI use.
//!
//! Layers, lowest priority first: defaults, the config file (`lineage.toml`
//! or the `lineage` field of `package.json`), then `LINEAGE_*` environment
//! variables.

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Json, Serialized, Toml};
use serde_json::Value;
use tracing::debug;

use crate::config::LineageConfig;
use crate::error::{ConfigError, Result};
use crate::tsconfig::tsconfig_aliases;

/// Name of the dedicated configuration file.
pub const CONFIG_FILE: &str = "lineage.toml";

/// Field of `package.json` holding configuration.
pub const PACKAGE_FIELD: &str = "lineage";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "LINEAGE_";

/// Searches a directory for lineage configuration and loads it.
///
/// # Example
///
/// ```no_run
/// use lineage_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load_or_default().unwrap();
/// println!("root: {}", config.root.display());
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `lineage.toml`
    /// 2. `package.json` with a non-null `lineage` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load the discovered config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<LineageConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load the discovered config file, or defaults plus environment when
    /// there is none.
    pub fn load_or_default(&self) -> Result<LineageConfig> {
        match self.find() {
            Some(path) => self.load_from(&path),
            None => {
                debug!(dir = %self.root.display(), "no config file, using defaults");
                self.finish(Self::base(), &self.root)
            }
        }
    }

    /// Load a specific config file (TOML, or a `package.json`).
    pub fn load_from(&self, path: &Path) -> Result<LineageConfig> {
        if !path.is_file() {
            return Err(ConfigError::NotFound);
        }
        debug!(path = %path.display(), "loading config");

        let figment = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            Self::base().merge(Json::string(&package_field(path)?.to_string()))
        } else {
            Self::base().merge(Toml::file(path))
        };

        let dir = path.parent().unwrap_or(&self.root);
        self.finish(figment, dir)
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(LineageConfig::default()))
    }

    /// Apply the environment layer, anchor the root at `dir` and import
    /// tsconfig aliases.
    fn finish(&self, figment: Figment, dir: &Path) -> Result<LineageConfig> {
        let config: LineageConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("_"))
            .extract()
            .map_err(|e| ConfigError::invalid("configuration", e))?;

        let mut config = config.anchored_at(dir);

        if let Some(tsconfig) = config.settings.tsconfig.clone() {
            let path = config.root.join(tsconfig);
            let aliases = tsconfig_aliases(&path, &config.root)?;
            debug!(path = %path.display(), count = aliases.len(), "imported tsconfig aliases");
            config.merge_aliases(aliases);
        }

        Ok(config)
    }
}

fn package_field(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    let parsed: Value =
        serde_json::from_str(&content).map_err(|e| ConfigError::invalid("package.json", e))?;

    match parsed.get(PACKAGE_FIELD) {
        Some(field) if !field.is_null() => Ok(field.clone()),
        _ => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some(format!("Add a '{PACKAGE_FIELD}' field to your package.json")),
        }),
    }
}

/// Discover and load config from the current directory.
pub fn discover() -> Result<LineageConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn find_prefers_toml_over_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "roots = [\"src\"]\n").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "lineage": { "roots": ["lib"] } }"#,
        )
        .unwrap();

        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found.file_name().unwrap(), CONFIG_FILE);
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());

        fs::write(dir.path().join("package.json"), r#"{ "lineage": null }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound));
    }
}
