//! # hive-logs
//!
//! Core log ingestion and retrieval engine for LogHive.
//!
//! This crate provides:
//!
//! - [`LogRecord`] — Stored log records with assigned id and timestamp
//! - [`NewLogRecord`] — Unvalidated ingestion input
//! - [`RecordFilter`] — Exact-match filters over service and level
//! - [`RecordQuery`] — Filter plus resolved result limit
//! - [`RecordStore`] — Abstract trait for record backends
//! - [`MemoryStore`] — In-memory record storage
//! - [`FileStore`] — File-backed record storage (JSON Lines)
//! - [`TtlCache`] — Time-bounded cache for point reads
//! - [`LogService`] — Façade coordinating validation, storage, and caching
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hive_logs::{LogService, MemoryStore, NewLogRecord, RecordFilter};
//!
//! let service = LogService::new(Arc::new(MemoryStore::new()));
//!
//! // Ingest a record
//! let record = service
//!     .create(NewLogRecord::new("billing", "production", "error", "payment failed"))
//!     .unwrap();
//! assert_eq!(record.id.0, 1);
//!
//! // Query it back, newest first
//! let filter = RecordFilter::new().with_service("billing");
//! let records = service.list(filter, None).unwrap();
//! assert_eq!(records.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod file_store;
pub mod query;
pub mod service;
pub mod store;
pub mod traits;
pub mod types;

// Re-export main types
pub use cache::{TtlCache, DEFAULT_TTL};
pub use error::{LogError, Result};
pub use file_store::FileStore;
pub use query::{newest_first, resolve_limit, RecordFilter, RecordQuery, DEFAULT_LIMIT, MAX_LIMIT};
pub use service::LogService;
pub use store::MemoryStore;
pub use traits::RecordStore;
pub use types::{LogRecord, NewLogRecord, RecordDraft, RecordId};
