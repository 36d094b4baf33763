//! Configuration for lineage: discovery, layered loading and validation.

pub mod config;
pub mod discovery;
pub mod error;
pub mod tsconfig;
pub mod validation;

pub use config::*;
pub use error::*;

pub use discovery::{CONFIG_FILE, ConfigDiscovery, ENV_PREFIX, PACKAGE_FIELD, discover};
pub use tsconfig::tsconfig_aliases;
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
