//! # hive-api
//!
//! HTTP ingestion and retrieval API for LogHive.
//!
//! This crate exposes the [`hive_logs`] service façade over a versioned
//! REST API, built on top of the axum HTTP framework.
//!
//! ## Features
//!
//! - **Ingestion**: Validated JSON log record submission
//! - **Retrieval**: Filtered listings (newest first), point reads, deletion
//! - **Rate limiting**: Per-client sliding window on the versioned routes
//! - **Health**: Unversioned, unthrottled liveness endpoint
//!
//! ## Example
//!
//! ```rust,no_run
//! use hive_api::{ApiConfig, ApiServer};
//! use hive_logs::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ApiConfig::default();
//!     let addr = config.bind_addr;
//!
//!     let server = ApiServer::new(config, Arc::new(MemoryStore::new()));
//!     // server.serve(addr).await.unwrap();
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/health` | GET | Liveness check with uptime |
//! | `/v1/logs` | POST | Ingest a log record |
//! | `/v1/logs` | GET | List records, filtered, newest first |
//! | `/v1/logs/{id}` | GET | Fetch a single record |
//! | `/v1/logs/{id}` | DELETE | Delete a record |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use rate_limit::RequestRateLimiter;
pub use routes::create_router;
pub use server::ApiServer;
pub use state::ApiState;
