//! Error taxonomy and the in-memory error log.
//!
//! Every failure raised by the board carries one of eight [`ErrorKind`]s
//! plus a human-readable message, an optional structured details payload,
//! and a `recoverable` flag. Errors are diagnostics: the controller records
//! them in an [`ErrorLog`] ring buffer and surfaces them as notifications,
//! but they never drive control flow beyond triggering recovery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Default capacity of the error log ring buffer.
pub const DEFAULT_ERROR_LOG_CAPACITY: usize = 50;

/// The kinds of errors the board can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A referenced task does not exist.
    TaskNotFound,
    /// A referenced column does not exist.
    ColumnNotFound,
    /// A drop landed on a target that cannot accept the task.
    InvalidDropTarget,
    /// Drag payload was missing or malformed.
    DragDataCorrupted,
    /// A collaborator refused the operation (e.g. notifications denied).
    PermissionDenied,
    /// A network-backed collaborator failed.
    NetworkError,
    /// Task data failed validation.
    ValidationError,
    /// An unexpected internal failure.
    UnknownError,
}

impl ErrorKind {
    /// Get the string representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::ColumnNotFound => "COLUMN_NOT_FOUND",
            Self::InvalidDropTarget => "INVALID_DROP_TARGET",
            Self::DragDataCorrupted => "DRAG_DATA_CORRUPTED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::NetworkError => "NETWORK_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised by a board operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// What kind of failure this is.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Optional structured payload with context for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// When the error was raised.
    pub timestamp: DateTime<Utc>,
    /// The operation that raised the error (e.g. "drop", "update").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Whether the board can continue after this error.
    pub recoverable: bool,
}

impl AppError {
    /// Create an error with the given kind and message.
    ///
    /// Errors are recoverable unless marked otherwise with
    /// [`non_recoverable`](Self::non_recoverable).
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
            action: None,
            recoverable: true,
        }
    }

    /// Attach a structured details payload.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Record the operation that raised the error.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Mark the error as non-recoverable.
    #[must_use]
    pub const fn non_recoverable(mut self) -> Self {
        self.recoverable = false;
        self
    }

    /// Error for a task id that matched nothing.
    #[must_use]
    pub fn task_not_found(task_id: &str, action: &str) -> Self {
        Self::new(ErrorKind::TaskNotFound, format!("task not found: \"{task_id}\""))
            .with_details(serde_json::json!({ "task_id": task_id }))
            .with_action(action)
    }

    /// Error for a column id that matched nothing.
    #[must_use]
    pub fn column_not_found(column_id: &str, action: &str) -> Self {
        Self::new(ErrorKind::ColumnNotFound, format!("column not found: \"{column_id}\""))
            .with_details(serde_json::json!({ "column_id": column_id }))
            .with_action(action)
    }

    /// Error for a missing or malformed drag payload.
    #[must_use]
    pub fn drag_data_corrupted(details: serde_json::Value) -> Self {
        Self::new(ErrorKind::DragDataCorrupted, "drag payload is missing or corrupted")
            .with_details(details)
            .with_action("drag")
    }

    /// Error for task data that failed validation.
    #[must_use]
    pub fn validation(message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::new(ErrorKind::ValidationError, message)
            .with_details(details)
            .with_action("validation")
    }

    /// Error for an unexpected internal failure.
    #[must_use]
    pub fn unknown(message: impl Into<String>, action: &str) -> Self {
        Self::new(ErrorKind::UnknownError, message).with_action(action)
    }
}

/// Aggregate statistics over the error log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorStats {
    /// Total number of errors currently retained.
    pub total: usize,
    /// Error counts per kind.
    pub by_kind: HashMap<ErrorKind, usize>,
}

/// A bounded, newest-first log of raised errors.
///
/// Pushing past capacity silently evicts the oldest entry. The log never
/// fails and never blocks an operation.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    entries: VecDeque<AppError>,
    capacity: usize,
}

impl ErrorLog {
    /// Create an empty log with the default capacity of 50 entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ERROR_LOG_CAPACITY)
    }

    /// Create an empty log with the given capacity.
    ///
    /// A capacity of zero is treated as one so a push is never a no-op.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Record an error, evicting the oldest entry if the log is full.
    pub fn push(&mut self, error: AppError) {
        self.entries.push_front(error);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Iterate over retained errors, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &AppError> {
        self.entries.iter()
    }

    /// Number of retained errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all retained errors.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Count retained errors in total and per kind.
    #[must_use]
    pub fn stats(&self) -> ErrorStats {
        let mut by_kind = HashMap::new();
        for error in &self.entries {
            *by_kind.entry(error.kind).or_insert(0) += 1;
        }
        ErrorStats { total: self.entries.len(), by_kind }
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new()
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::TaskNotFound.as_str(), "TASK_NOT_FOUND");
        assert_eq!(ErrorKind::ColumnNotFound.as_str(), "COLUMN_NOT_FOUND");
        assert_eq!(ErrorKind::InvalidDropTarget.as_str(), "INVALID_DROP_TARGET");
        assert_eq!(ErrorKind::DragDataCorrupted.as_str(), "DRAG_DATA_CORRUPTED");
        assert_eq!(ErrorKind::PermissionDenied.as_str(), "PERMISSION_DENIED");
        assert_eq!(ErrorKind::NetworkError.as_str(), "NETWORK_ERROR");
        assert_eq!(ErrorKind::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorKind::UnknownError.as_str(), "UNKNOWN_ERROR");
    }

    #[test]
    fn test_error_display() {
        let error = AppError::new(ErrorKind::TaskNotFound, "task not found: \"42\"");
        assert_eq!(error.to_string(), "TASK_NOT_FOUND: task not found: \"42\"");
    }

    #[test]
    fn test_error_defaults_recoverable() {
        let error = AppError::new(ErrorKind::UnknownError, "boom");
        assert!(error.recoverable);
        assert!(!error.non_recoverable().recoverable);
    }

    #[test]
    fn test_task_not_found_constructor() {
        let error = AppError::task_not_found("42", "drop");
        assert_eq!(error.kind, ErrorKind::TaskNotFound);
        assert_eq!(error.action.as_deref(), Some("drop"));
        assert_eq!(error.details.unwrap()["task_id"], "42");
        assert!(error.recoverable);
    }

    #[test]
    fn test_validation_constructor() {
        let error = AppError::validation("bad task", serde_json::json!({ "task_id": "" }));
        assert_eq!(error.kind, ErrorKind::ValidationError);
        assert_eq!(error.action.as_deref(), Some("validation"));
    }

    #[test]
    fn test_error_serialization_skips_empty_fields() {
        let error = AppError::new(ErrorKind::NetworkError, "offline");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["kind"], "NETWORK_ERROR");
        assert!(json.get("details").is_none());
        assert!(json.get("action").is_none());
    }

    #[test]
    fn test_error_log_newest_first() {
        let mut log = ErrorLog::new();
        log.push(AppError::new(ErrorKind::TaskNotFound, "first"));
        log.push(AppError::new(ErrorKind::ColumnNotFound, "second"));

        let messages: Vec<&str> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn test_error_log_evicts_oldest_at_capacity() {
        let mut log = ErrorLog::with_capacity(3);
        for i in 0..5 {
            log.push(AppError::new(ErrorKind::UnknownError, format!("error {i}")));
        }

        assert_eq!(log.len(), 3);
        let messages: Vec<&str> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["error 4", "error 3", "error 2"]);
    }

    #[test]
    fn test_error_log_default_capacity() {
        let mut log = ErrorLog::new();
        for i in 0..60 {
            log.push(AppError::new(ErrorKind::UnknownError, format!("error {i}")));
        }
        assert_eq!(log.len(), DEFAULT_ERROR_LOG_CAPACITY);
    }

    #[test]
    fn test_error_log_zero_capacity_retains_one() {
        let mut log = ErrorLog::with_capacity(0);
        log.push(AppError::new(ErrorKind::UnknownError, "kept"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_error_log_clear() {
        let mut log = ErrorLog::new();
        log.push(AppError::new(ErrorKind::TaskNotFound, "gone"));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.stats().total, 0);
    }

    #[test]
    fn test_error_log_stats_by_kind() {
        let mut log = ErrorLog::new();
        log.push(AppError::new(ErrorKind::TaskNotFound, "a"));
        log.push(AppError::new(ErrorKind::TaskNotFound, "b"));
        log.push(AppError::new(ErrorKind::ValidationError, "c"));

        let stats = log.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_kind[&ErrorKind::TaskNotFound], 2);
        assert_eq!(stats.by_kind[&ErrorKind::ValidationError], 1);
        assert!(!stats.by_kind.contains_key(&ErrorKind::NetworkError));
    }
}
