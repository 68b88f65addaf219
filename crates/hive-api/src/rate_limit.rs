//! Per-client request rate limiting.

use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

/// Sliding window request timestamps for rate limiting.
#[derive(Debug)]
struct SlidingWindow {
    /// Request timestamps within the window.
    timestamps: VecDeque<Instant>,
    /// Window duration.
    window_size: Duration,
    /// Maximum requests allowed in window.
    max_requests: u32,
}

impl SlidingWindow {
    fn new(max_requests: u32, window_size: Duration) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(max_requests as usize + 1),
            window_size,
            max_requests,
        }
    }

    /// Drop timestamps that have left the window.
    fn prune(&mut self, now: Instant) {
        let Some(cutoff) = now.checked_sub(self.window_size) else {
            return;
        };
        while self.timestamps.front().is_some_and(|t| *t < cutoff) {
            self.timestamps.pop_front();
        }
    }

    /// Check if a new request is allowed and record it if so.
    fn try_request(&mut self) -> bool {
        let now = Instant::now();
        self.prune(now);

        if (self.timestamps.len() as u32) < self.max_requests {
            self.timestamps.push_back(now);
            true
        } else {
            false
        }
    }

    /// Get current request count in the window.
    fn current_count(&mut self) -> u32 {
        self.prune(Instant::now());
        self.timestamps.len() as u32
    }
}

/// Request rate limiter using a sliding window per client address.
#[derive(Debug)]
pub struct RequestRateLimiter {
    /// Maximum requests per window.
    max_requests: u32,
    /// Window size.
    window_size: Duration,
    /// Whether limiting is enabled.
    enabled: bool,
    /// Sliding windows per client address.
    windows: RwLock<HashMap<IpAddr, SlidingWindow>>,
}

impl RequestRateLimiter {
    /// Create a new rate limiter allowing `max_requests` per `window_size`.
    #[must_use]
    pub fn new(max_requests: u32, window_size: Duration) -> Self {
        Self {
            max_requests,
            window_size,
            enabled: true,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Create from configuration.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_requests: config.rate_limit_max_requests,
            window_size: config.rate_limit_window,
            enabled: config.rate_limit_enabled,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Check if a request is allowed and record it if so.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RateLimited`] if the client's budget is spent.
    pub fn check_and_record(&self, ip: &IpAddr) -> ApiResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut windows = self.windows.write();

        let window = windows
            .entry(*ip)
            .or_insert_with(|| SlidingWindow::new(self.max_requests, self.window_size));

        if window.try_request() {
            debug!(ip = %ip, count = window.timestamps.len(), "request allowed");
            Ok(())
        } else {
            Err(ApiError::RateLimited(*ip))
        }
    }

    /// Check if a request would be allowed (without recording).
    #[must_use]
    pub fn would_allow(&self, ip: &IpAddr) -> bool {
        if !self.enabled {
            return true;
        }

        let mut windows = self.windows.write();

        let window = windows
            .entry(*ip)
            .or_insert_with(|| SlidingWindow::new(self.max_requests, self.window_size));

        window.current_count() < self.max_requests
    }

    /// Get current request count for a client.
    #[must_use]
    pub fn current_count(&self, ip: &IpAddr) -> u32 {
        let mut windows = self.windows.write();

        windows
            .get_mut(ip)
            .map_or(0, SlidingWindow::current_count)
    }

    /// Remove tracking for a client.
    pub fn remove(&self, ip: &IpAddr) {
        self.windows.write().remove(ip);
    }

    /// Clear all tracking.
    pub fn clear(&self) {
        self.windows.write().clear();
    }

    /// Get number of tracked clients.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.windows.read().len()
    }

    /// Get the max requests per window.
    #[must_use]
    pub const fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Get the window size.
    #[must_use]
    pub const fn window_size(&self) -> Duration {
        self.window_size
    }

    /// Check if rate limiting is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Middleware enforcing the per-client rate limit on wrapped routes.
pub async fn enforce_rate_limit(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    match state.limiter().check_and_record(&ip) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

/// Resolve the client address, falling back to loopback when the
/// connection carries no peer info (e.g. in-process test requests).
fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(IpAddr::V4(Ipv4Addr::LOCALHOST), |info| info.0.ip())
}
