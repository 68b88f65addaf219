//! Traits for record storage backends.
//!
//! This module provides the [`RecordStore`] trait for abstracting over
//! persistence backends (in-memory, file-based, etc.). The rest of the
//! system depends only on this interface, never on a concrete backend.

use crate::error::Result;
use crate::query::RecordQuery;
use crate::types::{LogRecord, RecordDraft, RecordId};

/// Trait for durable record storage backends.
///
/// Implementations must be safe for concurrent use by many simultaneous
/// requests; each method is a single round trip with no partial state.
pub trait RecordStore: Send + Sync {
    /// Inserts a validated draft, assigning its `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the record.
    fn insert(&self, draft: RecordDraft) -> Result<LogRecord>;

    /// Selects records matching the query.
    ///
    /// Results are ordered newest first (ID ascending on timestamp ties)
    /// and bounded by the query's resolved limit. A query matching nothing
    /// yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot execute the selection.
    fn select(&self, query: &RecordQuery) -> Result<Vec<LogRecord>>;

    /// Fetches a record by ID.
    ///
    /// Returns `Ok(None)` when no record exists; absence is not a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend lookup itself fails.
    fn get(&self, id: RecordId) -> Result<Option<LogRecord>>;

    /// Deletes a record by ID.
    ///
    /// Returns `true` if a record was removed and `false` if the ID had no
    /// record (zero affected rows). Absence is not a store failure; callers
    /// decide what it means.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot perform the deletion.
    fn delete(&self, id: RecordId) -> Result<bool>;

    /// Returns the number of stored records.
    fn len(&self) -> usize;

    /// Returns true if the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
