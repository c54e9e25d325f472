//! # Environment Variable Loader
//!
//! Loads configuration overrides from `INKPAD_*` environment variables
//! following 12-factor app principles.
//!
//! - `INKPAD_BASE_URL`: absolute backend URL
//! - `INKPAD_API_ROOT`: API path prefix (default `/api`)
//! - `INKPAD_TIMEOUT_SECS`: request timeout in seconds
//! - `INKPAD_PAGE_SIZE`: default note list page size
//! - `INKPAD_TOKEN_FILE`: token persistence path

use crate::config::{ConfigError, ConfigOverrides};
use std::env;

/// Load configuration overrides from the environment. Unset variables leave
/// the corresponding field untouched; unparsable numeric values are an
/// error rather than a silent fallback.
pub fn load_from_env() -> Result<ConfigOverrides, ConfigError> {
    let mut overrides = ConfigOverrides::default();

    if let Ok(value) = env::var("INKPAD_BASE_URL") {
        overrides.base_url = Some(value);
    }
    if let Ok(value) = env::var("INKPAD_API_ROOT") {
        overrides.api_root = Some(value);
    }
    if let Ok(value) = env::var("INKPAD_TIMEOUT_SECS") {
        let parsed = value
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidEnvValue {
                variable: "INKPAD_TIMEOUT_SECS".to_string(),
                value: value.clone(),
            })?;
        overrides.timeout_secs = Some(parsed);
    }
    if let Ok(value) = env::var("INKPAD_PAGE_SIZE") {
        let parsed = value
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidEnvValue {
                variable: "INKPAD_PAGE_SIZE".to_string(),
                value: value.clone(),
            })?;
        overrides.page_size = Some(parsed);
    }
    if let Ok(value) = env::var("INKPAD_TOKEN_FILE") {
        overrides.token_file = Some(value.into());
    }

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "INKPAD_BASE_URL",
            "INKPAD_API_ROOT",
            "INKPAD_TIMEOUT_SECS",
            "INKPAD_PAGE_SIZE",
            "INKPAD_TOKEN_FILE",
        ] {
            unsafe { env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn empty_environment_yields_no_overrides() {
        clear_env();
        let overrides = load_from_env().unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    #[serial]
    fn reads_base_url_and_timeout() {
        clear_env();
        unsafe {
            env::set_var("INKPAD_BASE_URL", "http://api.example.com");
            env::set_var("INKPAD_TIMEOUT_SECS", "5");
        }
        let overrides = load_from_env().unwrap();
        assert_eq!(
            overrides.base_url.as_deref(),
            Some("http://api.example.com")
        );
        assert_eq!(overrides.timeout_secs, Some(5));
        clear_env();
    }

    #[test]
    #[serial]
    fn rejects_unparsable_timeout() {
        clear_env();
        unsafe { env::set_var("INKPAD_TIMEOUT_SECS", "soon") };
        let err = load_from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvValue { .. }));
        clear_env();
    }
}
