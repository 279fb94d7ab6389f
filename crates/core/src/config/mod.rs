//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (RAGDOCS_*)
//! 2. TOML config file (if RAGDOCS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (RAGDOCS_*)
/// 2. TOML config file (if RAGDOCS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Explicit cache root, overriding the platform default.
    ///
    /// Set via RAGDOCS_CACHE_DIR environment variable.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via RAGDOCS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum document size in bytes.
    ///
    /// Set via RAGDOCS_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Re-download documents even when a cached copy exists.
    ///
    /// Set via RAGDOCS_FORCE_REFRESH environment variable.
    #[serde(default)]
    pub force_refresh: bool,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via RAGDOCS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Treat cached documents without ETag/Last-Modified as fresh.
    ///
    /// Set via RAGDOCS_TRUST_UNVALIDATED_CACHE environment variable.
    #[serde(default = "default_true")]
    pub trust_unvalidated_cache: bool,

    /// Treat the cache as fresh when revalidation fails at the transport level.
    ///
    /// Set via RAGDOCS_TRUST_CACHE_ON_TRANSPORT_ERROR environment variable.
    #[serde(default = "default_true")]
    pub trust_cache_on_transport_error: bool,

    /// Maximum number of redirects to follow.
    ///
    /// Set via RAGDOCS_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_user_agent() -> String {
    "ragdocs/0.1".into()
}

fn default_true() -> bool {
    true
}

fn default_max_redirects() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            force_refresh: false,
            user_agent: default_user_agent(),
            trust_unvalidated_cache: true,
            trust_cache_on_transport_error: true,
            max_redirects: default_max_redirects(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `RAGDOCS_`
    /// 2. TOML file from `RAGDOCS_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("RAGDOCS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("RAGDOCS_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.cache_dir.is_none());
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.max_bytes, 10 * 1024 * 1024);
        assert!(!config.force_refresh);
        assert_eq!(config.user_agent, "ragdocs/0.1");
        assert!(config.trust_unvalidated_cache);
        assert!(config.trust_cache_on_transport_error);
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string(
            r#"
            cache_dir = "/srv/ragdocs"
            max_bytes = 2048
            force_refresh = true
            "#,
        ));

        let config: AppConfig = figment.extract().unwrap();
        assert_eq!(config.cache_dir, Some(PathBuf::from("/srv/ragdocs")));
        assert_eq!(config.max_bytes, 2048);
        assert!(config.force_refresh);
        assert_eq!(config.timeout_ms, 30_000);
    }
}
