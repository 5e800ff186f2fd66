//! ConfigLoader facade over the `config` crate builder.

use super::sources::{environment, file};
use super::DirTreeConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults and environment.
    pub fn load() -> Result<DirTreeConfig, ConfigError> {
        let builder = Self::builder_with_defaults()?;
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file with environment overlay.
    /// Precedence: defaults (lowest) -> file -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<DirTreeConfig, ConfigError> {
        let builder = Self::builder_with_defaults()?;
        let builder = file::add_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("store.id_prefix", "dir-")?
            .set_default("store.check_invariants", false)
    }
}
