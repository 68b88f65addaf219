//! File-backed record storage.
//!
//! This module provides:
//! - [`FileStore`] — Persistent record storage in a JSON-lines file
//! - Implementation of [`RecordStore`] for generic usage
//!
//! One serialized record per line. The full set is materialized in memory
//! on open; inserts append a line; deletes rewrite the file without the
//! removed record. No rotation and no retention.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use tracing::warn;

use crate::error::Result;
use crate::query::RecordQuery;
use crate::traits::RecordStore;
use crate::types::{LogRecord, RecordDraft, RecordId};

/// Persistent record store backed by a JSON-lines file.
pub struct FileStore {
    /// Path of the backing file
    path: PathBuf,
    /// Records keyed by ID, mirroring the file contents
    records: RwLock<BTreeMap<RecordId, LogRecord>>,
    /// Next record ID counter, resumed past the highest ID on disk
    next_id: AtomicU64,
}

impl FileStore {
    /// Opens a store at the given path, creating parent directories as
    /// needed. A missing file is an empty store.
    ///
    /// Existing records are materialized and the ID sequence resumes past
    /// the highest ID seen. Lines that fail to parse are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or directories cannot
    /// be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut records = BTreeMap::new();
        let mut max_id = 0u64;

        match File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                for line in reader.lines() {
                    let line = line?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<LogRecord>(&line) {
                        Ok(record) => {
                            max_id = max_id.max(record.id.0);
                            records.insert(record.id, record);
                        }
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "skipping unparseable record line");
                        }
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            path,
            records: RwLock::new(records),
            next_id: AtomicU64::new(max_id + 1),
        })
    }

    /// Inserts a validated draft, appending it to the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    pub fn insert(&self, draft: RecordDraft) -> Result<LogRecord> {
        let id = RecordId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = draft.into_record(id, Utc::now());
        let json = serde_json::to_string(&record)?;

        // Hold the write lock across the append so file and map stay in sync.
        let mut records = self.records.write();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        records.insert(id, record.clone());
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

    /// Deletes a record by ID, rewriting the backing file without it.
    ///
    /// # Errors
    ///
    /// Returns an error if the rewrite fails; the in-memory set is only
    /// updated after the rewrite lands.
    pub fn delete(&self, id: RecordId) -> Result<bool> {
        let mut records = self.records.write();
        if !records.contains_key(&id) {
            return Ok(false);
        }

        Self::rewrite(
            &self.path,
            records.values().filter(|record| record.id != id),
        )?;
        records.remove(&id);
        Ok(true)
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

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rewrite<'a, I>(path: &Path, records: I) -> Result<()>
    where
        I: Iterator<Item = &'a LogRecord>,
    {
        let tmp = path.with_extension("tmp");
        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            for record in records {
                let json = serde_json::to_string(record)?;
                writer.write_all(json.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn insert(&self, draft: RecordDraft) -> Result<LogRecord> {
        FileStore::insert(self, draft)
    }

    fn select(&self, query: &RecordQuery) -> Result<Vec<LogRecord>> {
        FileStore::select(self, query)
    }

    fn get(&self, id: RecordId) -> Result<Option<LogRecord>> {
        FileStore::get(self, id)
    }

    fn delete(&self, id: RecordId) -> Result<bool> {
        FileStore::delete(self, id)
    }

    fn len(&self) -> usize {
        FileStore::len(self)
    }
}
