//! Daemon configuration.
//!
//! Configuration for the LogHive daemon, including:
//! - HTTP bind address
//! - CORS allowed origins
//! - Storage backend selection
//! - Rate limiting policy
//! - Read cache policy

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hive_api::ApiConfig;
use serde::{Deserialize, Serialize};

use crate::error::DaemonError;

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Keep records in memory only.
    Memory,
    /// Persist records to a JSON Lines file.
    File,
}

/// Configuration for the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Which backend holds the records.
    pub backend: StoreBackend,
    /// Record file path, required for the file backend.
    pub path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            path: None,
        }
    }
}

/// Configuration for per-client rate limiting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enforced.
    pub enabled: bool,
    /// Maximum requests per client within the window.
    pub max_requests: u32,
    /// Window duration in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_secs: 60,
        }
    }
}

/// Configuration for the point-read cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Whether point reads are cached.
    pub enabled: bool,
    /// Entry time-to-live in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 60,
        }
    }
}

/// Main daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// CORS allowed origins; empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Rate limit configuration.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_origins: Vec::new(),
            store: StoreConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DaemonError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DaemonError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, DaemonError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DaemonError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), DaemonError> {
        if self.store.backend == StoreBackend::File && self.store.path.is_none() {
            return Err(DaemonError::Config(
                "store.path is required for the file backend".to_string(),
            ));
        }

        if self.rate_limit.enabled {
            if self.rate_limit.max_requests == 0 {
                return Err(DaemonError::Config(
                    "rate_limit.max_requests must be greater than 0".to_string(),
                ));
            }

            if self.rate_limit.window_secs == 0 {
                return Err(DaemonError::Config(
                    "rate_limit.window_secs must be greater than 0".to_string(),
                ));
            }
        }

        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(DaemonError::Config(
                "cache.ttl_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the API server configuration from this daemon config.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let mut api = ApiConfig::new(self.bind_addr)
            .with_rate_limit(
                self.rate_limit.max_requests,
                Duration::from_secs(self.rate_limit.window_secs),
            )
            .with_rate_limit_enabled(self.rate_limit.enabled)
            .with_cache_ttl(Duration::from_secs(self.cache.ttl_secs))
            .with_cache_enabled(self.cache.enabled);
        for origin in &self.cors_origins {
            api = api.with_cors_origin(origin.clone());
        }
        api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Helper to create a temporary config file
    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("failed to write temp file");
        file
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = ServerConfig::from_toml("").expect("should parse empty config");

        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 60);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            bind_addr = "127.0.0.1:9000"

            [store]
            backend = "file"
            path = "/var/lib/loghive/records.jsonl"

            [rate_limit]
            enabled = true
            max_requests = 5
            window_secs = 1

            [cache]
            enabled = false
            ttl_secs = 30
        "#;

        let config = ServerConfig::from_toml(toml).expect("should parse full config");

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(
            config.store.path,
            Some(PathBuf::from("/var/lib/loghive/records.jsonl"))
        );
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 1);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 30);
    }

    #[test]
    fn test_load_from_file() {
        let toml = r#"
            bind_addr = "127.0.0.1:8100"
        "#;

        let temp_file = create_temp_config(toml);
        let config = ServerConfig::from_file(temp_file.path()).expect("should load from file");

        assert_eq!(config.bind_addr.port(), 8100);
    }

    #[test]
    fn test_file_not_found() {
        let result = ServerConfig::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, DaemonError::Config(_)));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let toml = "this is not valid toml {{{";

        let result = ServerConfig::from_toml(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn test_file_backend_without_path_rejected() {
        let toml = r#"
            [store]
            backend = "file"
        "#;

        let result = ServerConfig::from_toml(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("store.path is required"));
    }

    #[test]
    fn test_zero_max_requests_rejected() {
        let toml = r#"
            [rate_limit]
            enabled = true
            max_requests = 0
            window_secs = 60
        "#;

        let result = ServerConfig::from_toml(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("max_requests must be greater than 0"));
    }

    #[test]
    fn test_zero_window_rejected() {
        let toml = r#"
            [rate_limit]
            enabled = true
            max_requests = 100
            window_secs = 0
        "#;

        let result = ServerConfig::from_toml(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("window_secs must be greater than 0"));
    }

    #[test]
    fn test_zero_limits_allowed_when_disabled() {
        let toml = r#"
            [rate_limit]
            enabled = false
            max_requests = 0
            window_secs = 0
        "#;

        let config = ServerConfig::from_toml(toml).expect("disabled limiter is not validated");
        assert!(!config.rate_limit.enabled);
    }

    #[test]
    fn test_zero_cache_ttl_rejected() {
        let toml = r#"
            [cache]
            enabled = true
            ttl_secs = 0
        "#;

        let result = ServerConfig::from_toml(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("ttl_secs must be greater than 0"));
    }

    #[test]
    fn test_invalid_backend_rejected() {
        let toml = r#"
            [store]
            backend = "redis"
        "#;

        let result = ServerConfig::from_toml(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = ServerConfig {
            bind_addr: "127.0.0.1:9100".parse().expect("valid addr"),
            cors_origins: vec!["http://localhost:3000".to_string()],
            store: StoreConfig {
                backend: StoreBackend::File,
                path: Some(PathBuf::from("/tmp/records.jsonl")),
            },
            rate_limit: RateLimitConfig {
                enabled: true,
                max_requests: 10,
                window_secs: 5,
            },
            cache: CacheConfig {
                enabled: true,
                ttl_secs: 120,
            },
        };

        let toml_str = toml::to_string(&original).expect("should serialize");
        let parsed = ServerConfig::from_toml(&toml_str).expect("should parse");

        assert_eq!(original, parsed);
    }

    #[test]
    fn test_api_config_mapping() {
        let toml = r#"
            bind_addr = "127.0.0.1:9200"

            [rate_limit]
            enabled = true
            max_requests = 7
            window_secs = 30

            [cache]
            enabled = false
            ttl_secs = 15
        "#;

        let config = ServerConfig::from_toml(toml).expect("should parse");
        let api = config.api_config();

        assert_eq!(api.bind_addr.port(), 9200);
        assert_eq!(api.rate_limit_max_requests, 7);
        assert_eq!(api.rate_limit_window, Duration::from_secs(30));
        assert!(api.rate_limit_enabled);
        assert_eq!(api.cache_ttl, Duration::from_secs(15));
        assert!(!api.cache_enabled);
    }

    #[test]
    fn test_cors_origins_parsed() {
        let toml = r#"
            cors_origins = ["http://localhost:3000", "https://ops.example.com"]
        "#;

        let config = ServerConfig::from_toml(toml).expect("should parse");
        assert_eq!(config.cors_origins.len(), 2);

        let api = config.api_config();
        assert_eq!(api.cors_origins.len(), 2);
    }

    #[test]
    fn test_cors_origins_default_empty() {
        let config = ServerConfig::from_toml("").expect("should parse");
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_store_config_default() {
        let default = StoreConfig::default();
        assert_eq!(default.backend, StoreBackend::Memory);
        assert!(default.path.is_none());
    }

    #[test]
    fn test_rate_limit_config_default() {
        let default = RateLimitConfig::default();
        assert!(default.enabled);
        assert_eq!(default.max_requests, 100);
        assert_eq!(default.window_secs, 60);
    }

    #[test]
    fn test_cache_config_default() {
        let default = CacheConfig::default();
        assert!(default.enabled);
        assert_eq!(default.ttl_secs, 60);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_backend_ignores_path() {
        let toml = r#"
            [store]
            backend = "memory"
            path = "/ignored/anyway.jsonl"
        "#;

        let config = ServerConfig::from_toml(toml).expect("should parse");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.store.path.is_some());
    }
}
