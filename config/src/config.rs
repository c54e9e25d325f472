//! Configuration structures for the Inkpad client.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Configuration error covering loading, parsing, and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Invalid value for {variable}: {value}")]
    InvalidEnvValue { variable: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Client configuration: where the notes API lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ClientConfig {
    /// Absolute backend URL, e.g. `http://localhost:8000`.
    #[validate(custom(function = "validate_base_url"))]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix all endpoints live under.
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Request timeout applied to the underlying HTTP client.
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default page size for note listings.
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Where the token pair is persisted; `None` keeps tokens in memory.
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_root() -> String {
    "/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    20
}

fn validate_base_url(value: &str) -> Result<(), ValidationError> {
    url::Url::parse(value).map_err(|_| ValidationError::new("base_url"))?;
    Ok(())
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_root: default_api_root(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            token_file: None,
        }
    }
}

impl ClientConfig {
    /// Base URL with any trailing slash removed plus the API root, the
    /// prefix every request path is appended to.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.api_root)
    }

    /// Load configuration with standard precedence: defaults, then the
    /// optional TOML file, then `INKPAD_*` environment variables. The
    /// result is validated before being returned.
    pub fn load(file: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let from_file = match file {
            Some(path) => crate::file_loader::load_from_file(path)?,
            None => ConfigOverrides::default(),
        };
        let from_env = crate::load_from_env()?;
        let config = crate::merge_configs(Self::default(), from_file, from_env);
        config.validate()?;
        Ok(config)
    }
}

/// Partial configuration from a single source; unset fields defer to lower
/// precedence sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub api_root: Option<String>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
    pub token_file: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
