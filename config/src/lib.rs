//! # Configuration System
//!
//! Client configuration for Inkpad:
//! - Configuration structure with `validator`-based validation
//! - Environment variable loading (`INKPAD_*`, 12-factor style)
//! - TOML file loading
//! - Precedence: environment > file > defaults

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;

pub use config::{ClientConfig, ConfigError, ConfigOverrides};
pub use file_loader::load_from_file;
pub use loader::load_from_env;
pub use precedence::merge_configs;
pub use validator::Validate;
