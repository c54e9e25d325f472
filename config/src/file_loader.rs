//! # Configuration File Loading
//!
//! Loads configuration overrides from a TOML file. Only the fields present
//! in the file are treated as overrides.

use crate::config::{ConfigError, ConfigOverrides};
use std::path::Path;

/// Load configuration overrides from a TOML file.
pub fn load_from_file(path: &Path) -> Result<ConfigOverrides, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

    let overrides: ConfigOverrides =
        toml::from_str(&contents).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

    tracing::debug!(path = %path.display(), "Loaded configuration file");
    Ok(overrides)
}
