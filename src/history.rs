//! The action history log.
//!
//! Every committed mutation is recorded as an [`Action`] in an append-only
//! log with a movable cursor. Pushing while the cursor sits before the end
//! discards everything after it (linear-undo branch semantics), and every
//! cursor movement is reflected into a [`NavigationMirror`].
//!
//! Navigating the log repositions the cursor and reports the entry found
//! there; it does NOT revert or reapply task mutations. The log records
//! intent for audit and navigation display, not replayable undo commands.

use crate::board::Task;
use crate::traits::NavigationMirror;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded description of a past mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// A task was moved between columns.
    MoveTask {
        /// Id of the moved task.
        task_id: String,
        /// Column the task left.
        from: String,
        /// Column the task entered.
        to: String,
        /// When the move was committed.
        timestamp: DateTime<Utc>,
    },
    /// A task's fields were updated.
    UpdateTask {
        /// Id of the updated task.
        task_id: String,
        /// The task as it was before the update.
        old_values: Task,
        /// The task as committed.
        new_values: Task,
        /// When the update was committed.
        timestamp: DateTime<Utc>,
    },
    /// A task was deleted.
    DeleteTask {
        /// Id of the deleted task.
        task_id: String,
        /// The task as it was at deletion time.
        deleted_task: Task,
        /// When the deletion was committed.
        timestamp: DateTime<Utc>,
    },
}

impl Action {
    /// The id of the task the action touched.
    #[must_use]
    pub fn task_id(&self) -> &str {
        match self {
            Self::MoveTask { task_id, .. }
            | Self::UpdateTask { task_id, .. }
            | Self::DeleteTask { task_id, .. } => task_id,
        }
    }

    /// When the action was committed.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::MoveTask { timestamp, .. }
            | Self::UpdateTask { timestamp, .. }
            | Self::DeleteTask { timestamp, .. } => *timestamp,
        }
    }

    /// The action's tag as it appears in serialized form.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MoveTask { .. } => "move_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
        }
    }
}

/// One record in the history log.
///
/// Once pushed, entries are immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The recorded action.
    pub state: Action,
    /// Display title for the entry.
    pub title: String,
    /// Url fragment mirrored to the navigation stack.
    pub url: String,
    /// Position of the entry in the log at push time.
    pub index: usize,
}

/// Snapshot of the log's state for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryInfo {
    /// All entries, oldest first.
    pub entries: Vec<HistoryEntry>,
    /// Cursor position; `None` means "before the first entry".
    pub current_index: Option<usize>,
    /// Number of entries.
    pub total_entries: usize,
    /// Whether [`HistoryLog::go_back`] would move the cursor.
    pub can_go_back: bool,
    /// Whether [`HistoryLog::go_forward`] would move the cursor.
    pub can_go_forward: bool,
    /// The entry under the cursor, if any.
    pub current_entry: Option<HistoryEntry>,
}

/// Append-only action log with a movable cursor.
///
/// Invariant: the cursor is always `None` or a valid index into the
/// entries, i.e. `-1 <= cursor < len` in signed terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    current: Option<usize>,
}

impl HistoryLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new(), current: None }
    }

    /// Record a new action.
    ///
    /// Entries after the cursor are discarded first, then the new entry is
    /// appended and the cursor moves onto it. A new frame is pushed onto
    /// the navigation mirror.
    pub fn push_state(
        &mut self,
        action: Action,
        title: impl Into<String>,
        url: impl Into<String>,
        mirror: &dyn NavigationMirror,
    ) {
        let keep = self.current.map_or(0, |i| i + 1);
        self.entries.truncate(keep);

        let entry = HistoryEntry {
            state: action,
            title: title.into(),
            url: url.into(),
            index: self.entries.len(),
        };
        mirror.push_entry(&entry.state, &entry.title, &entry.url);
        self.entries.push(entry);
        self.current = Some(self.entries.len() - 1);
    }

    /// Step the cursor back one entry and return the entry now under it.
    ///
    /// A no-op returning `None` when the cursor is already at the start.
    pub fn go_back(&mut self, mirror: &dyn NavigationMirror) -> Option<&HistoryEntry> {
        match self.current {
            Some(i) if i > 0 => {
                self.current = Some(i - 1);
                mirror.step_back();
                Some(&self.entries[i - 1])
            }
            _ => None,
        }
    }

    /// Step the cursor forward one entry and return the entry now under it.
    ///
    /// A no-op returning `None` when the cursor is already at the end.
    pub fn go_forward(&mut self, mirror: &dyn NavigationMirror) -> Option<&HistoryEntry> {
        let next = self.current.map_or(0, |i| i + 1);
        if next < self.entries.len() {
            self.current = Some(next);
            mirror.step_forward();
            Some(&self.entries[next])
        } else {
            None
        }
    }

    /// Jump the cursor to an arbitrary entry.
    ///
    /// Out-of-range targets leave the log unchanged and return `None`.
    /// Jumping to the current position returns the entry without touching
    /// the mirror. Any other jump replaces the mirror's current frame in
    /// place rather than pushing a new one.
    pub fn go_to(
        &mut self,
        target: usize,
        mirror: &dyn NavigationMirror,
    ) -> Option<&HistoryEntry> {
        if target >= self.entries.len() {
            return None;
        }

        if self.current == Some(target) {
            return Some(&self.entries[target]);
        }

        self.current = Some(target);
        let entry = &self.entries[target];
        mirror.replace_current_entry(&entry.state, &entry.title, &entry.url);
        Some(entry)
    }

    /// Reset to an empty log.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    /// Whether the cursor can move back.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        matches!(self.current, Some(i) if i > 0)
    }

    /// Whether the cursor can move forward.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.current.map_or(0, |i| i + 1) < self.entries.len()
    }

    /// Cursor position; `None` means "before the first entry".
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The entry under the cursor, if any.
    #[must_use]
    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.current.map(|i| &self.entries[i])
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot the log's state for display.
    #[must_use]
    pub fn info(&self) -> HistoryInfo {
        HistoryInfo {
            entries: self.entries.clone(),
            current_index: self.current,
            total_entries: self.entries.len(),
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
            current_entry: self.current_entry().cloned(),
        }
    }
}
