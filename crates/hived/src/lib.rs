//! hived - LogHive daemon
//!
//! This binary serves the LogHive ingestion and retrieval API over HTTP,
//! backed by an in-memory or file-based record store.

pub mod config;
pub mod error;

pub use config::{CacheConfig, RateLimitConfig, ServerConfig, StoreBackend, StoreConfig};
pub use error::DaemonError;
