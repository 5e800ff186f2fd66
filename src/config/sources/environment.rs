//! Environment variable source: DIRTREE__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `DIRTREE__STORE__ID_PREFIX=n` sets `store.id_prefix`; the separator
/// also sits between the prefix and the key.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("DIRTREE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
