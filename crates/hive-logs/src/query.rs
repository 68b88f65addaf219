//! Filter criteria and query resolution for record selection.
//!
//! This module provides:
//! - [`RecordFilter`] — Optional conjunctive match criteria
//! - [`RecordQuery`] — A filter plus a resolved, bounded limit
//! - [`newest_first`] — The total result order (newest first, ID ties ascending)

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};
use crate::types::LogRecord;

/// Number of records returned when no limit is requested.
pub const DEFAULT_LIMIT: usize = 100;

/// Hard ceiling on the number of records a single query may return.
///
/// Requested limits above this are clamped, not rejected.
pub const MAX_LIMIT: usize = 500;

/// Optional criteria narrowing a list query.
///
/// Criteria are conjunctive: a record matches only if every supplied
/// criterion matches. Matching is case-sensitive exact equality on the
/// field value; absent criteria impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Exact-match service name
    pub service: Option<String>,
    /// Exact-match severity label
    pub level: Option<String>,
}

impl RecordFilter {
    /// Creates an empty filter that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service criterion.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Adds a level criterion.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Checks whether a record satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(ref service) = self.service {
            if record.service != *service {
                return false;
            }
        }

        if let Some(ref level) = self.level {
            if record.level != *level {
                return false;
            }
        }

        true
    }

    /// Returns true when no criteria are set.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.service.is_none() && self.level.is_none()
    }
}

/// A fully resolved selection: filter criteria plus a bounded limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    /// Conjunctive match criteria
    pub filter: RecordFilter,
    /// Maximum records returned, already defaulted and clamped
    pub limit: usize,
}

impl RecordQuery {
    /// Resolves a query from filter criteria and an optional requested limit.
    ///
    /// A missing limit defaults to [`DEFAULT_LIMIT`]; a limit above
    /// [`MAX_LIMIT`] is clamped to the ceiling.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the requested limit is below 1.
    pub fn new(filter: RecordFilter, requested_limit: Option<i64>) -> Result<Self> {
        let limit = resolve_limit(requested_limit)?;
        Ok(Self { filter, limit })
    }

    /// Resolves an unfiltered query with the default limit.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self {
            filter: RecordFilter::new(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Applies this query to a set of records: match, order, limit.
    ///
    /// Results are ordered by [`newest_first`]; a query matching nothing
    /// yields an empty vector, never an error.
    pub fn select<'a, I>(&self, records: I) -> Vec<LogRecord>
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        let mut matched: Vec<LogRecord> = records
            .into_iter()
            .filter(|record| self.filter.matches(record))
            .cloned()
            .collect();

        matched.sort_by(newest_first);
        matched.truncate(self.limit);
        matched
    }
}

/// Applies the limit policy: default when absent, clamp above the ceiling,
/// reject below 1.
///
/// # Errors
///
/// Returns a validation error when the requested limit is below 1.
pub fn resolve_limit(requested: Option<i64>) -> Result<usize> {
    match requested {
        None => Ok(DEFAULT_LIMIT),
        Some(n) if n < 1 => Err(LogError::Validation(format!(
            "limit must be at least 1, got {n}"
        ))),
        Some(n) => Ok(usize::try_from(n).unwrap_or(MAX_LIMIT).min(MAX_LIMIT)),
    }
}

/// Total order for query results.
///
/// `created_at` descending, ties broken by `id` ascending, so reissuing a
/// query with no intervening writes returns an identical sequence.
#[must_use]
pub fn newest_first(a: &LogRecord, b: &LogRecord) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}
