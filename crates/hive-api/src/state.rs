//! Shared state for the API server.

use std::sync::Arc;
use std::time::Instant;

use hive_logs::{LogService, RecordStore};

use crate::config::ApiConfig;
use crate::rate_limit::RequestRateLimiter;

/// Shared state for the API server.
#[derive(Debug)]
pub struct ApiState {
    /// API configuration.
    config: Arc<ApiConfig>,
    /// Log service façade over the record store.
    service: LogService,
    /// Per-client request rate limiter.
    limiter: RequestRateLimiter,
    /// Server start time.
    start_time: Instant,
}

impl ApiState {
    /// Create a new API state over the given store.
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn RecordStore>) -> Self {
        let limiter = RequestRateLimiter::from_config(&config);
        let service = if config.cache_enabled {
            LogService::with_cache(store, config.cache_ttl)
        } else {
            LogService::new(store)
        };
        Self {
            config: Arc::new(config),
            service,
            limiter,
            start_time: Instant::now(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Get the log service.
    #[must_use]
    pub fn service(&self) -> &LogService {
        &self.service
    }

    /// Get the rate limiter.
    #[must_use]
    pub fn limiter(&self) -> &RequestRateLimiter {
        &self.limiter
    }

    /// Get the server uptime in seconds.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
