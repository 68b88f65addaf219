//! Core types for the log record model.
//!
//! This module provides:
//! - [`RecordId`] — Unique identifier for stored records
//! - [`LogRecord`] — A stored log record with its assigned identity
//! - [`NewLogRecord`] — An inbound submission prior to validation
//! - [`RecordDraft`] — A validated submission ready for storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};

/// Unique identifier for a stored log record.
///
/// Assigned by the store at insertion time; clients never supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Parses a record ID from its decimal string form.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the string is not an unsigned integer.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| LogError::Validation(format!("invalid record id: {e}")))
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored log record.
///
/// Immutable once created; the only mutation the system performs on a
/// record is full deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Store-assigned identifier
    pub id: RecordId,
    /// Emitting service name
    pub service: String,
    /// Deployment environment, e.g. "production" or "staging"
    pub environment: String,
    /// Severity label; free-form ("INFO"/"WARN"/"ERROR" are conventional, not enforced)
    pub level: String,
    /// Human-readable log payload
    pub log_message: String,
    /// Optional correlation identifier
    #[serde(default)]
    pub trace_id: Option<String>,
    /// Optional structured context; schemaless nested document
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    /// Store-assigned insertion timestamp
    pub created_at: DateTime<Utc>,
}

/// An inbound log submission, prior to validation.
///
/// Every field is optional at this stage so that [`NewLogRecord::validate`]
/// can report all missing and empty required fields together instead of
/// rejecting them one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLogRecord {
    /// Emitting service name
    pub service: Option<String>,
    /// Deployment environment
    pub environment: Option<String>,
    /// Severity label
    pub level: Option<String>,
    /// Human-readable log payload
    pub log_message: Option<String>,
    /// Optional correlation identifier
    #[serde(default)]
    pub trace_id: Option<String>,
    /// Optional structured context
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl NewLogRecord {
    /// Creates a submission with all four required fields set.
    #[must_use]
    pub fn new(
        service: impl Into<String>,
        environment: impl Into<String>,
        level: impl Into<String>,
        log_message: impl Into<String>,
    ) -> Self {
        Self {
            service: Some(service.into()),
            environment: Some(environment.into()),
            level: Some(level.into()),
            log_message: Some(log_message.into()),
            trace_id: None,
            metadata: None,
        }
    }

    /// Sets the correlation identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets the structured metadata document.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Validates the submission into a storable draft.
    ///
    /// Required fields must be present and non-empty; optional fields pass
    /// through untouched, preserving absent-vs-present. Pure transform, no
    /// side effects.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming every missing or empty required
    /// field.
    pub fn validate(self) -> Result<RecordDraft> {
        fn required(
            value: Option<String>,
            name: &'static str,
            missing: &mut Vec<&'static str>,
        ) -> String {
            match value {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        }

        let mut missing = Vec::new();
        let service = required(self.service, "service", &mut missing);
        let environment = required(self.environment, "environment", &mut missing);
        let level = required(self.level, "level", &mut missing);
        let log_message = required(self.log_message, "log_message", &mut missing);

        if !missing.is_empty() {
            return Err(LogError::missing_fields(&missing));
        }

        Ok(RecordDraft {
            service,
            environment,
            level,
            log_message,
            trace_id: self.trace_id,
            metadata: self.metadata,
        })
    }
}

/// A validated submission, normalized and ready for storage.
///
/// Produced only by [`NewLogRecord::validate`]. The store assigns `id` and
/// `created_at` at insertion via [`RecordDraft::into_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    /// Emitting service name
    pub service: String,
    /// Deployment environment
    pub environment: String,
    /// Severity label
    pub level: String,
    /// Human-readable log payload
    pub log_message: String,
    /// Optional correlation identifier
    pub trace_id: Option<String>,
    /// Optional structured context
    pub metadata: Option<serde_json::Value>,
}

impl RecordDraft {
    /// Materializes the stored record with its store-assigned identity.
    #[must_use]
    pub fn into_record(self, id: RecordId, created_at: DateTime<Utc>) -> LogRecord {
        LogRecord {
            id,
            service: self.service,
            environment: self.environment,
            level: self.level,
            log_message: self.log_message,
            trace_id: self.trace_id,
            metadata: self.metadata,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // RecordId Tests
    // ===========================================

    #[test]
    fn record_id_parse_valid() {
        assert_eq!(RecordId::parse("42").ok(), Some(RecordId(42)));
        assert_eq!(RecordId::parse("0").ok(), Some(RecordId(0)));
    }

    #[test]
    fn record_id_parse_rejects_garbage() {
        assert!(RecordId::parse("abc").is_err());
        assert!(RecordId::parse("-1").is_err());
        assert!(RecordId::parse("4.2").is_err());
        assert!(RecordId::parse("").is_err());
    }

    #[test]
    fn record_id_parse_error_is_validation() {
        let err = RecordId::parse("not-a-number");
        assert!(matches!(err, Err(LogError::Validation(_))));
    }

    #[test]
    fn record_id_display() {
        assert_eq!(RecordId(123).to_string(), "123");
    }

    #[test]
    fn record_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&RecordId(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));
    }

    #[test]
    fn record_id_ordering() {
        assert!(RecordId(1) < RecordId(2));
        assert!(RecordId(100) > RecordId(99));
    }

    #[test]
    fn record_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(RecordId(1));
        set.insert(RecordId(2));
        set.insert(RecordId(1)); // Duplicate
        assert_eq!(set.len(), 2);
    }

    // ===========================================
    // NewLogRecord Validation Tests
    // ===========================================

    fn full_submission() -> NewLogRecord {
        NewLogRecord::new("payment-api", "production", "ERROR", "timeout")
            .with_trace_id("req-123")
            .with_metadata(serde_json::json!({"order_id": 9981}))
    }

    #[test]
    fn validate_accepts_full_submission() {
        let draft = full_submission().validate();
        assert!(draft.is_ok());

        if let Ok(draft) = draft {
            assert_eq!(draft.service, "payment-api");
            assert_eq!(draft.environment, "production");
            assert_eq!(draft.level, "ERROR");
            assert_eq!(draft.log_message, "timeout");
            assert_eq!(draft.trace_id.as_deref(), Some("req-123"));
            assert_eq!(draft.metadata, Some(serde_json::json!({"order_id": 9981})));
        }
    }

    #[test]
    fn validate_accepts_without_optional_fields() {
        let draft = NewLogRecord::new("auth", "staging", "INFO", "login ok").validate();
        assert!(draft.is_ok());

        if let Ok(draft) = draft {
            assert_eq!(draft.trace_id, None);
            assert_eq!(draft.metadata, None);
        }
    }

    #[test]
    fn validate_rejects_missing_service() {
        let mut submission = full_submission();
        submission.service = None;

        let err = submission.validate();
        assert!(matches!(err, Err(LogError::Validation(_))));
        if let Err(e) = err {
            assert!(e.to_string().contains("service"));
        }
    }

    #[test]
    fn validate_rejects_empty_required_field() {
        let mut submission = full_submission();
        submission.log_message = Some(String::new());

        let err = submission.validate();
        assert!(err.is_err());
        if let Err(e) = err {
            assert!(e.to_string().contains("log_message"));
        }
    }

    #[test]
    fn validate_names_all_offending_fields() {
        let submission = NewLogRecord {
            service: None,
            environment: Some(String::new()),
            level: Some("INFO".to_string()),
            log_message: None,
            trace_id: None,
            metadata: None,
        };

        let err = submission.validate();
        assert!(err.is_err());
        if let Err(e) = err {
            let msg = e.to_string();
            assert!(msg.contains("service"));
            assert!(msg.contains("environment"));
            assert!(msg.contains("log_message"));
            assert!(!msg.contains("level"));
        }
    }

    #[test]
    fn validate_rejects_fully_empty_submission() {
        let err = NewLogRecord::default().validate();
        assert!(err.is_err());
        if let Err(e) = err {
            let msg = e.to_string();
            assert!(msg.contains("service"));
            assert!(msg.contains("environment"));
            assert!(msg.contains("level"));
            assert!(msg.contains("log_message"));
        }
    }

    #[test]
    fn validate_checks_emptiness_exactly() {
        // Values are stored byte-for-byte; only "" fails, whitespace passes.
        let draft = NewLogRecord::new(" ", "production", "INFO", "msg").validate();
        assert!(draft.is_ok());
        if let Ok(draft) = draft {
            assert_eq!(draft.service, " ");
        }
    }

    #[test]
    fn validate_preserves_empty_metadata_object() {
        // An empty object is present, which is distinct from absent.
        let draft = NewLogRecord::new("svc", "prod", "INFO", "msg")
            .with_metadata(serde_json::json!({}))
            .validate();

        assert!(draft.is_ok());
        if let Ok(draft) = draft {
            assert_eq!(draft.metadata, Some(serde_json::json!({})));
        }
    }

    // ===========================================
    // Submission Deserialization Tests
    // ===========================================

    #[test]
    fn submission_deserializes_without_optional_fields() {
        let json = r#"{"service":"s","environment":"e","level":"INFO","log_message":"m"}"#;
        let parsed: std::result::Result<NewLogRecord, _> = serde_json::from_str(json);
        assert!(parsed.is_ok());

        if let Ok(submission) = parsed {
            assert_eq!(submission.trace_id, None);
            assert_eq!(submission.metadata, None);
        }
    }

    #[test]
    fn submission_deserializes_with_missing_required_fields() {
        // Missing fields surface through validate(), not as a decode error.
        let parsed: std::result::Result<NewLogRecord, _> =
            serde_json::from_str(r#"{"level":"INFO"}"#);
        assert!(parsed.is_ok());

        if let Ok(submission) = parsed {
            assert!(submission.validate().is_err());
        }
    }

    #[test]
    fn submission_null_metadata_is_absent() {
        let json = r#"{"service":"s","environment":"e","level":"I","log_message":"m","metadata":null}"#;
        let parsed: std::result::Result<NewLogRecord, _> = serde_json::from_str(json);
        assert!(parsed.is_ok());

        if let Ok(submission) = parsed {
            assert_eq!(submission.metadata, None);
        }
    }

    #[test]
    fn submission_nested_metadata_roundtrips() {
        let metadata = serde_json::json!({
            "order_id": 9981,
            "tags": ["billing", "retry"],
            "context": {"attempt": 3, "fatal": false}
        });
        let submission =
            NewLogRecord::new("s", "e", "ERROR", "m").with_metadata(metadata.clone());

        let draft = submission.validate();
        assert!(draft.is_ok());
        if let Ok(draft) = draft {
            assert_eq!(draft.metadata, Some(metadata));
        }
    }

    // ===========================================
    // LogRecord Tests
    // ===========================================

    fn make_record(id: u64) -> LogRecord {
        LogRecord {
            id: RecordId(id),
            service: "payment-api".to_string(),
            environment: "production".to_string(),
            level: "ERROR".to_string(),
            log_message: "timeout".to_string(),
            trace_id: None,
            metadata: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn record_serialization_roundtrip() {
        let record = make_record(1);
        let json = serde_json::to_string(&record);
        assert!(json.is_ok());

        if let Ok(json_str) = json {
            let parsed: std::result::Result<LogRecord, _> = serde_json::from_str(&json_str);
            assert_eq!(parsed.ok(), Some(record));
        }
    }

    #[test]
    fn record_serializes_absent_optionals_as_null() {
        let record = make_record(1);
        let value = serde_json::to_value(&record).ok();
        assert!(value.is_some());

        if let Some(value) = value {
            assert_eq!(value["trace_id"], serde_json::Value::Null);
            assert_eq!(value["metadata"], serde_json::Value::Null);
            assert_eq!(value["id"], serde_json::json!(1));
        }
    }

    #[test]
    fn record_created_at_serializes_as_rfc3339() {
        let record = make_record(1);
        let value = serde_json::to_value(&record).ok();
        assert!(value.is_some());

        if let Some(value) = value {
            let created_at = value["created_at"].as_str();
            assert!(created_at.is_some());
            if let Some(s) = created_at {
                assert!(chrono::DateTime::parse_from_rfc3339(s).is_ok());
            }
        }
    }

    #[test]
    fn draft_into_record_assigns_identity() {
        let draft = NewLogRecord::new("svc", "prod", "WARN", "disk low")
            .with_trace_id("t-1")
            .validate();
        assert!(draft.is_ok());

        if let Ok(draft) = draft {
            let now = Utc::now();
            let record = draft.into_record(RecordId(9), now);
            assert_eq!(record.id, RecordId(9));
            assert_eq!(record.created_at, now);
            assert_eq!(record.service, "svc");
            assert_eq!(record.environment, "prod");
            assert_eq!(record.level, "WARN");
            assert_eq!(record.log_message, "disk low");
            assert_eq!(record.trace_id.as_deref(), Some("t-1"));
            assert_eq!(record.metadata, None);
        }
    }

    #[test]
    fn record_clone_and_debug() {
        let record = make_record(5);
        let cloned = record.clone();
        assert_eq!(record, cloned);

        let debug = format!("{:?}", record);
        assert!(debug.contains("LogRecord"));
    }
}
