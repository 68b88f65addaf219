//! API server configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Maximum requests per client within the rate limit window.
    pub rate_limit_max_requests: u32,
    /// Rate limit window duration.
    pub rate_limit_window: Duration,
    /// Whether per-client rate limiting is enforced.
    pub rate_limit_enabled: bool,
    /// Time-to-live for cached point reads.
    pub cache_ttl: Duration,
    /// Whether point reads are served through the cache.
    pub cache_enabled: bool,
    /// CORS allowed origins (empty means all).
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".parse().unwrap_or_else(|_| {
                SocketAddr::from(([0, 0, 0, 0], 8000))
            }),
            rate_limit_max_requests: 100,
            rate_limit_window: Duration::from_secs(60),
            rate_limit_enabled: true,
            cache_ttl: Duration::from_secs(60),
            cache_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Set the rate limit: maximum requests per window.
    #[must_use]
    pub const fn with_rate_limit(mut self, max_requests: u32, window: Duration) -> Self {
        self.rate_limit_max_requests = max_requests;
        self.rate_limit_window = window;
        self
    }

    /// Enable or disable rate limiting.
    #[must_use]
    pub const fn with_rate_limit_enabled(mut self, enabled: bool) -> Self {
        self.rate_limit_enabled = enabled;
        self
    }

    /// Set the cache time-to-live for point reads.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Enable or disable the read cache.
    #[must_use]
    pub const fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();

        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.rate_limit_max_requests, 100);
        assert_eq!(config.rate_limit_window, Duration::from_secs(60));
        assert!(config.rate_limit_enabled);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert!(config.cache_enabled);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_config_new() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9000);
        let config = ApiConfig::new(addr);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.rate_limit_max_requests, 100);
    }

    #[test]
    fn test_config_builder() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9000);
        let config = ApiConfig::new(addr)
            .with_rate_limit(5, Duration::from_secs(1))
            .with_rate_limit_enabled(false)
            .with_cache_ttl(Duration::from_secs(120))
            .with_cache_enabled(false)
            .with_cors_origin("http://localhost:3000");

        assert_eq!(config.rate_limit_max_requests, 5);
        assert_eq!(config.rate_limit_window, Duration::from_secs(1));
        assert!(!config.rate_limit_enabled);
        assert_eq!(config.cache_ttl, Duration::from_secs(120));
        assert!(!config.cache_enabled);
        assert_eq!(config.cors_origins.len(), 1);
    }
}
