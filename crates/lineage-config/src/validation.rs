//! Config validation strategies.
//!
//! Schema checks need nothing but the config; filesystem checks also look
//! at the project on disk.

use tracing::warn;

use crate::config::LineageConfig;
use crate::error::{ConfigError, Result};

pub trait ConfigValidator {
    fn validate(&self, config: &LineageConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks).
///
/// ```
/// use lineage_config::{ConfigValidator, LineageConfig, SchemaValidator};
///
/// let mut config = LineageConfig::default();
/// config.aliases.insert("@".into(), "src".into());
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &LineageConfig) -> Result<()> {
        for (prefix, dir) in &config.aliases {
            if prefix.is_empty() {
                return Err(ConfigError::EmptyAliasPrefix { dir: dir.clone() });
            }
            if dir.trim().is_empty() {
                return Err(ConfigError::EmptyAliasTarget {
                    prefix: prefix.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use).
///
/// Runs the schema checks, then requires the root to be an existing
/// directory. Missing build roots and alias targets only warn: the engine
/// skips them.
pub struct FsValidator;

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &LineageConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        if !config.root.exists() {
            return Err(ConfigError::RootNotFound(config.root.clone()));
        }
        if !config.root.is_dir() {
            return Err(ConfigError::RootNotADirectory(config.root.clone()));
        }

        for root in &config.roots {
            let path = config.root.join(root);
            if !path.exists() {
                warn!(path = %path.display(), "build root does not exist");
            }
        }

        for (prefix, dir) in &config.aliases {
            let path = config.root.join(dir);
            if !path.exists() {
                warn!(prefix, path = %path.display(), "alias target does not exist");
            }
        }

        Ok(())
    }
}

pub fn validate_schema(config: &LineageConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

pub fn validate_fs(config: &LineageConfig) -> Result<()> {
    FsValidator.validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn with_alias(prefix: &str, dir: &str) -> LineageConfig {
        let mut config = LineageConfig::default();
        config.aliases.insert(prefix.to_string(), dir.to_string());
        config
    }

    #[test]
    fn schema_validator_accepts_defaults() {
        assert!(SchemaValidator.validate(&LineageConfig::default()).is_ok());
    }

    #[test]
    fn schema_validator_rejects_empty_prefix() {
        let result = SchemaValidator.validate(&with_alias("", "src"));
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::EmptyAliasPrefix { dir } if dir == "src"
        ));
    }

    #[test]
    fn schema_validator_rejects_blank_target() {
        let result = SchemaValidator.validate(&with_alias("@", "  "));
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::EmptyAliasTarget { .. }
        ));
    }

    #[test]
    fn fs_validator_requires_existing_root() {
        let config = LineageConfig {
            root: PathBuf::from("/definitely/not/here"),
            ..LineageConfig::default()
        };
        assert!(matches!(
            FsValidator.validate(&config).unwrap_err(),
            ConfigError::RootNotFound(_)
        ));
    }

    #[test]
    fn fs_validator_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("index.ts");
        std::fs::write(&file, "").unwrap();

        let config = LineageConfig {
            root: file,
            ..LineageConfig::default()
        };
        assert!(matches!(
            validate_fs(&config).unwrap_err(),
            ConfigError::RootNotADirectory(_)
        ));
    }

    #[test]
    fn fs_validator_tolerates_missing_build_roots() {
        let dir = TempDir::new().unwrap();
        let config = LineageConfig {
            root: dir.path().to_path_buf(),
            roots: vec![PathBuf::from("missing")],
            ..with_alias("@", "src")
        };
        assert!(validate_fs(&config).is_ok());
    }
}
