//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{FileStore, SnapshotCache, CACHE_KEY};
use crate::client::{resolve_api_base, FetchError, HttpSnapshotSource};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Explicit API base URL; overrides host-based resolution
    #[serde(default)]
    pub base_url: Option<String>,

    /// Host the dashboard is served as; loopback hosts default to the local backend
    #[serde(default = "default_hostname")]
    pub hostname: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            hostname: default_hostname(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Resolved API base; empty when fetching is disabled
    pub fn api_base(&self) -> String {
        resolve_api_base(&self.hostname, self.base_url.as_deref())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Polling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    5
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Snapshot cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_dir")]
    pub dir: String,

    #[serde(default = "default_cache_key")]
    pub key: String,
}

fn default_cache_dir() -> String {
    dirs::cache_dir()
        .map(|p| p.join("tolkien").to_string_lossy().to_string())
        .unwrap_or_else(|| "./tolkien_cache".to_string())
}

fn default_cache_key() -> String {
    CACHE_KEY.to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            key: default_cache_key(),
        }
    }
}

/// Rendered page output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// HTML file rewritten after every render; none keeps the page in memory
    pub html_path: Option<String>,
}

impl OutputConfig {
    pub fn html_path(&self) -> Option<PathBuf> {
        self.html_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tolkien").join("config.toml")),
            Some(PathBuf::from("/etc/tolkien/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Load an explicit file if given, otherwise search the default locations
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Snapshot cache backed by the configured directory
    pub fn snapshot_cache(&self) -> SnapshotCache {
        SnapshotCache::with_key(Arc::new(FileStore::new(&self.cache.dir)), self.cache.key.clone())
    }

    /// HTTP source for the resolved API base, or `None` when fetching is disabled
    pub fn snapshot_source(&self) -> Result<Option<HttpSnapshotSource>, FetchError> {
        let base = self.api.api_base();
        if base.is_empty() {
            return Ok(None);
        }
        HttpSnapshotSource::new(base, self.api.request_timeout()).map(Some)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(base) = lookup("TOLKIEN_API_BASE") {
            self.api.base_url = Some(base);
        }
        if let Some(hostname) = lookup("TOLKIEN_HOSTNAME") {
            self.api.hostname = hostname;
        }

        // Poll overrides
        if let Some(interval) = lookup("TOLKIEN_POLL_INTERVAL_SECS") {
            if let Ok(secs) = interval.parse() {
                self.poll.interval_secs = secs;
            }
        }

        // Cache overrides
        if let Some(dir) = lookup("TOLKIEN_CACHE_DIR") {
            self.cache.dir = dir;
        }

        // Output overrides
        if let Some(path) = lookup("TOLKIEN_OUTPUT") {
            self.output.html_path = Some(path);
        }

        // Logging overrides
        if let Some(level) = lookup("TOLKIEN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TOLKIEN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Tolkien Dashboard Configuration
#
# Environment variables override these settings:
# - TOLKIEN_API_BASE
# - TOLKIEN_HOSTNAME
# - TOLKIEN_POLL_INTERVAL_SECS
# - TOLKIEN_CACHE_DIR
# - TOLKIEN_OUTPUT
# - TOLKIEN_LOG_LEVEL
# - TOLKIEN_LOG_FORMAT

[api]
# Dashboard API base URL. When unset, a loopback hostname uses
# http://127.0.0.1:8000 and any other hostname disables fetching.
# base_url = "https://api.example.com"

# Host the dashboard is served as
hostname = "localhost"

# Request timeout in seconds
request_timeout_secs = 10

[poll]
# Seconds between refreshes
interval_secs = 5

[cache]
# Directory holding the last good snapshot (default: <user cache dir>/tolkien)
# dir = "/var/cache/tolkien"

# Cache slot name
key = "tolkien_dashboard_cache_v1"

[output]
# HTML page rewritten after every render
# html_path = "./dashboard.html"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.poll.interval_secs, 5);
        assert_eq!(config.api.hostname, "localhost");
        assert_eq!(config.api.api_base(), "http://127.0.0.1:8000");
        assert_eq!(config.cache.key, "tolkien_dashboard_cache_v1");
        assert_eq!(config.output.html_path(), None);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.poll.interval(), Duration::from_secs(5));
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.cache.key, CACHE_KEY);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [api]
            hostname = "tolkien.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.api_base(), "");
        assert_eq!(config.poll.interval_secs, 5);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TOLKIEN_API_BASE", "https://api.example.com/"),
            ("TOLKIEN_HOSTNAME", "tolkien.example.com"),
            ("TOLKIEN_POLL_INTERVAL_SECS", "9"),
            ("TOLKIEN_OUTPUT", "/tmp/dashboard.html"),
            ("TOLKIEN_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.api_base(), "https://api.example.com");
        assert_eq!(config.poll.interval_secs, 9);
        assert_eq!(
            config.output.html_path(),
            Some(PathBuf::from("/tmp/dashboard.html"))
        );
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_interval_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| {
            (name == "TOLKIEN_POLL_INTERVAL_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.poll.interval_secs, 5);
    }

    #[test]
    fn test_zero_durations_are_floored() {
        let mut config = Config::default();
        config.poll.interval_secs = 0;
        config.api.request_timeout_secs = 0;
        assert_eq!(config.poll.interval(), Duration::from_secs(1));
        assert_eq!(config.api.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_snapshot_source_disabled_without_base() {
        let mut config = Config::default();
        config.api.hostname = "tolkien.example.com".to_string();
        assert!(config.snapshot_source().unwrap().is_none());

        config.api.base_url = Some("https://api.example.com/".to_string());
        let source = config.snapshot_source().unwrap().unwrap();
        assert_eq!(source.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_snapshot_cache_uses_configured_dir() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.cache.dir = dir.path().to_string_lossy().to_string();

        let cache = config.snapshot_cache();
        cache.save(&crate::snapshot::Snapshot {
            price_usd: 1.0,
            ..Default::default()
        });
        assert!(dir.path().join("tolkien_dashboard_cache_v1.json").exists());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[poll\ninterval_secs = ").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }
}
