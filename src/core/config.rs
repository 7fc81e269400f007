//! Loading client settings from the environment or a JSON file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::client::{CacheConfig, RetryConfig};
use crate::core::GhostError;

pub const ENV_ADMIN_DOMAIN: &str = "GHOST_ADMIN_DOMAIN";
pub const ENV_API_KEY: &str = "GHOST_CONTENT_API_KEY";
pub const ENV_API_VERSION: &str = "GHOST_API_VERSION";

/// Serializable client settings.
///
/// ```json
/// {
///   "admin_domain": "demo.ghost.io",
///   "api_key": "22444f78447824223cefc48062",
///   "cache": { "ttl_seconds": 60, "max_items": 50 },
///   "retry": { "max_attempts": 5, "use_exponential_backoff": false }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostConfig {
    pub admin_domain: String,
    pub api_key: String,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub retry: RetrySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_seconds: f64,
    pub max_items: usize,
    pub is_enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let cfg = CacheConfig::default();
        Self {
            ttl_seconds: cfg.ttl.as_secs_f64(),
            max_items: cfg.max_items,
            is_enabled: cfg.enabled,
        }
    }
}

impl From<CacheSettings> for CacheConfig {
    fn from(s: CacheSettings) -> Self {
        CacheConfig {
            ttl: secs(s.ttl_seconds),
            max_items: s.max_items,
            enabled: s.is_enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_seconds: f64,
    pub use_exponential_backoff: bool,
    pub max_delay_seconds: f64,
    pub retryable_status_codes: Vec<u16>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        let cfg = RetryConfig::default();
        let mut codes: Vec<u16> = cfg.retryable_status.into_iter().collect();
        codes.sort_unstable();
        Self {
            max_attempts: cfg.max_attempts,
            base_delay_seconds: cfg.base_delay.as_secs_f64(),
            use_exponential_backoff: cfg.exponential_backoff,
            max_delay_seconds: cfg.max_delay.as_secs_f64(),
            retryable_status_codes: codes,
        }
    }
}

impl From<RetrySettings> for RetryConfig {
    fn from(s: RetrySettings) -> Self {
        RetryConfig {
            max_attempts: s.max_attempts,
            base_delay: secs(s.base_delay_seconds),
            exponential_backoff: s.use_exponential_backoff,
            max_delay: secs(s.max_delay_seconds),
            retryable_status: s.retryable_status_codes.into_iter().collect(),
        }
    }
}

// Negative, NaN or huge values collapse to zero / the maximum instead of panicking.
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::MAX)
}

impl GhostConfig {
    pub fn new(admin_domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            admin_domain: admin_domain.into(),
            api_key: api_key.into(),
            api_version: None,
            cache: CacheSettings::default(),
            retry: RetrySettings::default(),
        }
    }

    /// Reads `GHOST_ADMIN_DOMAIN`, `GHOST_CONTENT_API_KEY` and the optional
    /// `GHOST_API_VERSION` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`GhostError::Config`] naming the first missing variable.
    pub fn from_env() -> Result<Self, GhostError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`GhostConfig::from_env`], with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns [`GhostError::Config`] naming the first missing variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GhostError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| GhostError::Config(format!("environment variable {name} is not set")))
        };
        let mut config = Self::new(required(ENV_ADMIN_DOMAIN)?, required(ENV_API_KEY)?);
        config.api_version = lookup(ENV_API_VERSION).filter(|v| !v.trim().is_empty());
        Ok(config)
    }

    /// Parses settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`GhostError::Config`] if the document is not valid.
    pub fn from_json_str(json: &str) -> Result<Self, GhostError> {
        serde_json::from_str(json).map_err(|e| GhostError::Config(format!("invalid config JSON: {e}")))
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`GhostError::Config`] if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GhostError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GhostError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}
