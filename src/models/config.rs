// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote document service settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Local cache and diagnostics settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Transient fetch retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Page ids crawled when none are given on the command line
    #[serde(default)]
    pub seeds: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.remote.user_agent.trim().is_empty() {
            return Err(AppError::config("remote.user_agent is empty"));
        }
        if self.remote.timeout_secs == 0 {
            return Err(AppError::config("remote.timeout_secs must be > 0"));
        }
        self.remote.base_url()?;
        if self.retry.max_attempts == 0 {
            return Err(AppError::config("retry.max_attempts must be > 0"));
        }
        if self.cache.cache_dir == self.cache.log_dir {
            return Err(AppError::config(
                "cache.cache_dir and cache.log_dir must differ",
            ));
        }
        Ok(())
    }
}

/// Remote document service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Pages are fetched from `{base_url}/{id}`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Parsed base URL, always ending in `/` so ids join as a path segment.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Local cache and diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Serve pages from the cache before asking the remote service
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Directory holding one JSON file per page
    #[serde(default = "defaults::cache_dir")]
    pub cache_dir: PathBuf,

    /// Directory holding per-page request traces
    #[serde(default = "defaults::log_dir")]
    pub log_dir: PathBuf,

    /// Write a request trace for every download
    #[serde(default = "defaults::enabled")]
    pub log_requests: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            cache_dir: defaults::cache_dir(),
            log_dir: defaults::log_dir(),
            log_requests: defaults::enabled(),
        }
    }
}

/// Retry policy for transient fetch failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Fixed wait before each retry
    #[serde(default = "defaults::delay")]
    pub delay_secs: u64,
}

impl RetryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::max_attempts(),
            delay_secs: defaults::delay(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Remote defaults
    pub fn base_url() -> String {
        "http://localhost:8080/pages/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; page-mirror/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Cache defaults
    pub fn enabled() -> bool {
        true
    }
    pub fn cache_dir() -> PathBuf {
        PathBuf::from("notion_cache")
    }
    pub fn log_dir() -> PathBuf {
        PathBuf::from("log")
    }

    // Retry defaults
    pub fn max_attempts() -> u32 {
        3
    }
    pub fn delay() -> u64 {
        3
    }
}
