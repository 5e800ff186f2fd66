//! Configuration
//!
//! `DirTreeConfig` groups the logging setup and the store settings.
//! Sources are layered by `ConfigLoader`: built-in defaults, then an
//! optional TOML file, then `DIRTREE__*` environment variables.

pub mod facade;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirTreeConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Tree store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Prefix for generated node ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Run the full invariant check after every mutation
    #[serde(default)]
    pub check_invariants: bool,
}

fn default_id_prefix() -> String {
    "dir-".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            check_invariants: false,
        }
    }
}
