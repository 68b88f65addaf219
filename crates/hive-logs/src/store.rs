//! In-memory record storage.
//!
//! This module provides:
//! - [`MemoryStore`] — Thread-safe in-memory record store
//! - Implementation of [`RecordStore`] for generic usage

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;

use crate::error::Result;
use crate::query::RecordQuery;
use crate::traits::RecordStore;
use crate::types::{LogRecord, RecordDraft, RecordId};

/// Thread-safe in-memory record store.
///
/// The reference backend: records keyed by ID behind an `RwLock`, with IDs
/// assigned from an atomic counter starting at 1. `created_at` is stamped
/// at insertion.
pub struct MemoryStore {
    /// Records keyed by ID
    records: RwLock<BTreeMap<RecordId, LogRecord>>,
    /// Next record ID counter
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Inserts a validated draft, assigning its ID and timestamp.
    pub fn insert(&self, draft: RecordDraft) -> Result<LogRecord> {
        let id = RecordId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = draft.into_record(id, Utc::now());
        self.records.write().insert(id, record.clone());
        Ok(record)
    }

    /// Selects records matching the query, newest first.
    pub fn select(&self, query: &RecordQuery) -> Result<Vec<LogRecord>> {
        let records = self.records.read();
        Ok(query.select(records.values()))
    }

    /// Fetches a record by ID.
    pub fn get(&self, id: RecordId) -> Result<Option<LogRecord>> {
        Ok(self.records.read().get(&id).cloned())
    }

    /// Deletes a record by ID, reporting whether one was removed.
    pub fn delete(&self, id: RecordId) -> Result<bool> {
        Ok(self.records.write().remove(&id).is_some())
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, draft: RecordDraft) -> Result<LogRecord> {
        MemoryStore::insert(self, draft)
    }

    fn select(&self, query: &RecordQuery) -> Result<Vec<LogRecord>> {
        MemoryStore::select(self, query)
    }

    fn get(&self, id: RecordId) -> Result<Option<LogRecord>> {
        MemoryStore::get(self, id)
    }

    fn delete(&self, id: RecordId) -> Result<bool> {
        MemoryStore::delete(self, id)
    }

    fn len(&self) -> usize {
        MemoryStore::len(self)
    }
}
