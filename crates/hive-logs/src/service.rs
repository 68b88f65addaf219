//! Service façade over a record store.
//!
//! This module provides [`LogService`], the single entry point callers use
//! to ingest, query, fetch, and delete log records. The service owns
//! validation and limit policy, delegates persistence to a [`RecordStore`],
//! and optionally serves point reads through a TTL cache.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::error::{LogError, Result};
use crate::query::{RecordFilter, RecordQuery};
use crate::traits::RecordStore;
use crate::types::{LogRecord, NewLogRecord, RecordId};

/// Façade coordinating validation, storage, and caching for log records.
pub struct LogService {
    store: Arc<dyn RecordStore>,
    cache: Option<TtlCache<RecordId, LogRecord>>,
}

impl LogService {
    /// Creates a service backed by the given store, with no read cache.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store, cache: None }
    }

    /// Creates a service whose point reads are cached for `ttl`.
    #[must_use]
    pub fn with_cache(store: Arc<dyn RecordStore>, ttl: Duration) -> Self {
        Self {
            store,
            cache: Some(TtlCache::with_ttl(ttl)),
        }
    }

    /// Validates and stores a new record, returning it with its assigned
    /// identifier and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Validation`] naming every missing or empty
    /// required field, or [`LogError::Store`] if persistence fails.
    pub fn create(&self, new: NewLogRecord) -> Result<LogRecord> {
        let draft = new.validate()?;
        let record = self.store.insert(draft)?;
        info!(
            id = record.id.0,
            service = %record.service,
            level = %record.level,
            "log record stored"
        );
        Ok(record)
    }

    /// Returns records matching the filter, newest first, capped at the
    /// resolved limit.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Validation`] if `limit` is less than 1, or
    /// [`LogError::Store`] if the store fails.
    pub fn list(&self, filter: RecordFilter, limit: Option<i64>) -> Result<Vec<LogRecord>> {
        let query = RecordQuery::new(filter, limit)?;
        let records = self.store.select(&query)?;
        debug!(count = records.len(), limit = query.limit, "log records listed");
        Ok(records)
    }

    /// Fetches a single record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NotFound`] if no record has that identifier, or
    /// [`LogError::Store`] if the store fails.
    pub fn get(&self, id: RecordId) -> Result<LogRecord> {
        if let Some(cache) = &self.cache {
            if let Some(record) = cache.get(&id) {
                debug!(id = id.0, "log record served from cache");
                return Ok(record);
            }
        }

        let record = self.store.get(id)?.ok_or(LogError::NotFound(id.0))?;
        if let Some(cache) = &self.cache {
            cache.set(id, record.clone());
        }
        Ok(record)
    }

    /// Deletes a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NotFound`] if no record has that identifier, or
    /// [`LogError::Store`] if the store fails.
    pub fn delete(&self, id: RecordId) -> Result<()> {
        let deleted = self.store.delete(id)?;
        if let Some(cache) = &self.cache {
            cache.forget(&id);
        }
        if deleted {
            info!(id = id.0, "log record deleted");
            Ok(())
        } else {
            Err(LogError::NotFound(id.0))
        }
    }

    /// Returns the number of records currently stored.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.store.len()
    }
}

impl std::fmt::Debug for LogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogService")
            .field("records", &self.store.len())
            .field("cached_reads", &self.cache.is_some())
            .finish()
    }
}
