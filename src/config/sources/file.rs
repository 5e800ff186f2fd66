//! TOML file source

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Add a required TOML file to the builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = path
        .to_str()
        .ok_or_else(|| ConfigError::Message(format!("Config path is not UTF-8: {:?}", path)))?;
    Ok(builder.add_source(File::new(path, FileFormat::Toml).required(true)))
}
