//! # Configuration Precedence
//!
//! Merges configuration from multiple sources with precedence rules:
//! environment variables > configuration file > defaults.

use crate::config::{ClientConfig, ConfigOverrides};

/// Merge overrides onto the defaults, applying the file source first and
/// the environment source on top.
pub fn merge_configs(
    defaults: ClientConfig,
    file: ConfigOverrides,
    env: ConfigOverrides,
) -> ClientConfig {
    let mut config = defaults;
    apply(&mut config, file, "file");
    apply(&mut config, env, "env");
    config
}

fn apply(config: &mut ClientConfig, overrides: ConfigOverrides, source: &str) {
    if let Some(base_url) = overrides.base_url {
        tracing::debug!(source, field = "base_url", "Applying config override");
        config.base_url = base_url;
    }
    if let Some(api_root) = overrides.api_root {
        tracing::debug!(source, field = "api_root", "Applying config override");
        config.api_root = api_root;
    }
    if let Some(timeout_secs) = overrides.timeout_secs {
        tracing::debug!(source, field = "timeout_secs", "Applying config override");
        config.timeout_secs = timeout_secs;
    }
    if let Some(page_size) = overrides.page_size {
        tracing::debug!(source, field = "page_size", "Applying config override");
        config.page_size = page_size;
    }
    if let Some(token_file) = overrides.token_file {
        tracing::debug!(source, field = "token_file", "Applying config override");
        config.token_file = Some(token_file);
    }
}
