//! Data model for the task board.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Parse a priority from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid priority.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidPriority> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(InvalidPriority(s.to_string())),
        }
    }

    /// Get the string representation of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid priority string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPriority(pub String);

impl std::fmt::Display for InvalidPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid priority: '{}' (must be one of: low, medium, high)", self.0)
    }
}

impl std::error::Error for InvalidPriority {}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, generated client-side at creation time.
    pub id: String,
    /// Short title describing the task. Must be non-empty.
    pub title: String,
    /// Detailed description of the task.
    #[serde(default)]
    pub description: String,
    /// Priority level.
    #[serde(default)]
    pub priority: Priority,
    /// Id of the column the task currently sits in.
    pub column_id: String,
}

/// A fixed lane representing a workflow stage.
///
/// The set of columns is defined when the board is constructed and never
/// changes for the lifetime of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier (e.g. "todo").
    pub id: String,
    /// Display title (e.g. "To do").
    pub title: String,
}

impl Column {
    /// Create a column with the given id and title.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into() }
    }
}

/// Fields that can be changed on an existing task.
///
/// Only set fields are applied; unset fields keep the task's current
/// values. The task id is deliberately absent: identity is immutable.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title (if Some).
    pub title: Option<String>,
    /// New description (if Some).
    pub description: Option<String>,
    /// New priority (if Some).
    pub priority: Option<Priority>,
    /// New column id (if Some).
    pub column_id: Option<String>,
}

impl TaskPatch {
    /// Check if any fields are set for update.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.column_id.is_none()
    }

    /// A patch that moves a task to another column and changes nothing else.
    #[must_use]
    pub fn move_to(column_id: impl Into<String>) -> Self {
        Self { column_id: Some(column_id.into()), ..Self::default() }
    }

    /// Apply the patch to a task, producing the merged task.
    #[must_use]
    pub fn apply(&self, task: &Task) -> Task {
        Task {
            id: task.id.clone(),
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self.description.clone().unwrap_or_else(|| task.description.clone()),
            priority: self.priority.unwrap_or(task.priority),
            column_id: self.column_id.clone().unwrap_or_else(|| task.column_id.clone()),
        }
    }
}

/// Check that a task has the shape the board requires.
///
/// A task is valid iff its id, title and column id are all non-empty.
///
/// # Errors
///
/// Returns a `ValidationError` describing the offending task.
pub fn validate_task(task: &Task) -> crate::error::Result<()> {
    if task.id.is_empty() || task.title.is_empty() || task.column_id.is_empty() {
        return Err(AppError::validation(
            "task data failed validation",
            serde_json::json!({
                "task_id": task.id,
                "title": task.title,
                "column_id": task.column_id,
            }),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample_task() -> Task {
        Task {
            id: "1".to_string(),
            title: "Learn Rust".to_string(),
            description: "Work through the book".to_string(),
            priority: Priority::High,
            column_id: "todo".to_string(),
        }
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
        assert_eq!(Priority::from_str("MEDIUM").unwrap(), Priority::Medium);
        assert_eq!(Priority::from_str("High").unwrap(), Priority::High);
        assert!(Priority::from_str("urgent").is_err());
    }

    #[test]
    fn test_priority_as_str() {
        assert_eq!(Priority::Low.as_str(), "low");
        assert_eq!(Priority::Medium.as_str(), "medium");
        assert_eq!(Priority::High.as_str(), "high");
    }

    #[test]
    fn test_priority_default() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn test_invalid_priority_display() {
        let err = InvalidPriority("urgent".to_string());
        assert!(err.to_string().contains("urgent"));
        assert!(err.to_string().contains("low"));
    }

    #[test]
    fn test_task_serialization() {
        let task = sample_task();
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn test_task_deserialization_defaults() {
        let task: Task =
            serde_json::from_str(r#"{"id": "1", "title": "Bare", "column_id": "todo"}"#).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::move_to("done").is_empty());
    }

    #[test]
    fn test_patch_apply_retains_unset_fields() {
        let task = sample_task();
        let patch = TaskPatch { title: Some("Ship Rust".to_string()), ..TaskPatch::default() };

        let merged = patch.apply(&task);
        assert_eq!(merged.title, "Ship Rust");
        assert_eq!(merged.description, task.description);
        assert_eq!(merged.priority, task.priority);
        assert_eq!(merged.column_id, task.column_id);
        assert_eq!(merged.id, task.id);
    }

    #[test]
    fn test_patch_apply_all_fields() {
        let task = sample_task();
        let patch = TaskPatch {
            title: Some("New title".to_string()),
            description: Some("New description".to_string()),
            priority: Some(Priority::Low),
            column_id: Some("done".to_string()),
        };

        let merged = patch.apply(&task);
        assert_eq!(merged.title, "New title");
        assert_eq!(merged.description, "New description");
        assert_eq!(merged.priority, Priority::Low);
        assert_eq!(merged.column_id, "done");
    }

    #[test]
    fn test_patch_move_to() {
        let patch = TaskPatch::move_to("in-progress");
        assert_eq!(patch.column_id.as_deref(), Some("in-progress"));
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
        assert!(patch.priority.is_none());
    }

    #[test]
    fn test_validate_task_ok() {
        assert!(validate_task(&sample_task()).is_ok());
    }

    #[test]
    fn test_validate_task_empty_fields() {
        for strip in ["id", "title", "column_id"] {
            let mut task = sample_task();
            match strip {
                "id" => task.id = String::new(),
                "title" => task.title = String::new(),
                _ => task.column_id = String::new(),
            }
            let err = validate_task(&task).unwrap_err();
            assert_eq!(err.kind, ErrorKind::ValidationError, "field: {strip}");
            assert!(err.recoverable);
        }
    }

    #[test]
    fn test_validate_task_empty_description_is_fine() {
        let mut task = sample_task();
        task.description = String::new();
        assert!(validate_task(&task).is_ok());
    }
}
