//! The board controller.
//!
//! Orchestrates every task mutation: validates inputs, computes the next
//! store value, verifies post-conditions, commits, notifies, and records
//! the action in the history log. On validation failures it recovers by
//! rolling the store back to the last-known-good snapshot; every raised
//! error is retained in the controller's error log.

use crate::board::{generate_task_id, validate_task, Column, Priority, Task, TaskPatch, TaskStore};
use crate::config::BoardConfig;
use crate::error::{AppError, ErrorLog, ErrorStats, Result};
use crate::history::{Action, HistoryEntry, HistoryInfo, HistoryLog};
use crate::traits::{ConfirmationPrompt, NavigationMirror, Notifier};
use chrono::Utc;

/// Result of a move operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task changed columns.
    Moved,
    /// The task was already in the target column; nothing happened.
    AlreadyInColumn,
}

/// Result of a delete operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The task was removed.
    Deleted,
    /// The user declined the confirmation; nothing happened.
    Cancelled,
}

/// Owns the board state and coordinates all mutations.
///
/// The controller is single-threaded and event-driven: each operation
/// runs to completion on the calling thread and is atomic from the
/// outside: either fully committed with a paired history entry and
/// notification, or not committed at all.
pub struct BoardController {
    columns: Vec<Column>,
    store: TaskStore,
    last_valid: TaskStore,
    history: HistoryLog,
    errors: ErrorLog,
    dragged_task_id: Option<String>,
    editing_task_id: Option<String>,
    notifier: Box<dyn Notifier>,
    confirmation: Box<dyn ConfirmationPrompt>,
    mirror: Box<dyn NavigationMirror>,
}

impl std::fmt::Debug for BoardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardController")
            .field("columns", &self.columns)
            .field("store", &self.store)
            .field("history_len", &self.history.len())
            .field("errors", &self.errors.len())
            .finish_non_exhaustive()
    }
}

impl BoardController {
    /// Create a controller for the default board.
    #[must_use]
    pub fn new(
        notifier: Box<dyn Notifier>,
        confirmation: Box<dyn ConfirmationPrompt>,
        mirror: Box<dyn NavigationMirror>,
    ) -> Self {
        Self::with_config(&BoardConfig::default(), notifier, confirmation, mirror)
    }

    /// Create a controller for the board described by `config`.
    #[must_use]
    pub fn with_config(
        config: &BoardConfig,
        notifier: Box<dyn Notifier>,
        confirmation: Box<dyn ConfirmationPrompt>,
        mirror: Box<dyn NavigationMirror>,
    ) -> Self {
        let store = TaskStore::from_tasks(config.seed_tasks.iter().cloned());
        Self {
            columns: config.columns.clone(),
            last_valid: store.clone(),
            store,
            history: HistoryLog::new(),
            errors: ErrorLog::with_capacity(config.error_log_capacity),
            dragged_task_id: None,
            editing_task_id: None,
            notifier,
            confirmation,
            mirror,
        }
    }

    // === Task operations ===

    /// Move a task to another column.
    ///
    /// Moving a task to the column it is already in is a successful no-op:
    /// neither the store nor the history log changes.
    ///
    /// # Errors
    ///
    /// - `DragDataCorrupted` when `task_id` is empty;
    /// - `TaskNotFound` / `ColumnNotFound` when a reference is dangling;
    /// - `ValidationError` when the stored task fails validation (the
    ///   store is rolled back to the last valid snapshot);
    /// - `UnknownError` when the move did not apply; nothing is committed.
    pub fn move_task(&mut self, task_id: &str, target_column_id: &str) -> Result<MoveOutcome> {
        if task_id.is_empty() {
            let error = AppError::drag_data_corrupted(serde_json::json!({
                "task_id": task_id,
                "column_id": target_column_id,
            }));
            return Err(self.report(error));
        }

        let Some(task) = self.store.find_by_id(task_id).cloned() else {
            return Err(self.report(AppError::task_not_found(task_id, "drop")));
        };

        let Some(target_column) = self.find_column(target_column_id).cloned() else {
            return Err(self.report(AppError::column_not_found(target_column_id, "drop")));
        };

        if task.column_id == target_column_id {
            return Ok(MoveOutcome::AlreadyInColumn);
        }

        if let Err(error) = validate_task(&task) {
            self.errors.push(error.clone());
            self.recover_from_error("invalid task data");
            return Err(error);
        }

        let (next, _) = self.store.update(task_id, &TaskPatch::move_to(target_column_id));
        let applied =
            next.find_by_id(task_id).is_some_and(|moved| moved.column_id == target_column_id);
        if !applied {
            let error = AppError::unknown("failed to apply task move", "drop").with_details(
                serde_json::json!({
                    "task_id": task_id,
                    "column_id": target_column_id,
                    "original_column": task.column_id,
                }),
            );
            return Err(self.report(error));
        }

        self.commit(next);

        let from_title = self
            .find_column(&task.column_id)
            .map_or_else(|| task.column_id.clone(), |c| c.title.clone());
        self.notifier.notify(
            "Task moved!",
            &format!("\"{}\" moved from \"{}\" to \"{}\"", task.title, from_title, target_column.title),
            "task-moved",
        );

        self.history.push_state(
            Action::MoveTask {
                task_id: task.id.clone(),
                from: task.column_id.clone(),
                to: target_column_id.to_string(),
                timestamp: Utc::now(),
            },
            format!("Moved {}", task.title),
            format!("?moved={}", task.id),
            &*self.mirror,
        );

        Ok(MoveOutcome::Moved)
    }

    /// Update a task's fields from a patch.
    ///
    /// Returns the task as committed.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` when the id matches nothing;
    /// - `ValidationError` when the merged task fails validation (the
    ///   store is rolled back to the last valid snapshot).
    pub fn update_task(&mut self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        let Some(old_task) = self.store.find_by_id(task_id).cloned() else {
            return Err(self.report(AppError::task_not_found(task_id, "update")));
        };

        let updated = patch.apply(&old_task);
        if let Err(error) = validate_task(&updated) {
            self.errors.push(error.clone());
            self.recover_from_error("invalid task data in update");
            return Err(error);
        }

        let (next, _) = self.store.update(task_id, patch);
        self.commit(next);

        self.notifier.notify(
            "Task updated!",
            &format!("\"{}\" was updated", updated.title),
            "task-updated",
        );

        self.history.push_state(
            Action::UpdateTask {
                task_id: task_id.to_string(),
                old_values: old_task,
                new_values: updated.clone(),
                timestamp: Utc::now(),
            },
            "Updated task",
            format!("?updated={task_id}"),
            &*self.mirror,
        );

        Ok(updated)
    }

    /// Delete a task after an interactive confirmation.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` when the id matches nothing (including a repeat
    ///   delete of the same id);
    /// - `UnknownError` when the removal did not apply; nothing is
    ///   committed.
    pub fn delete_task(&mut self, task_id: &str) -> Result<DeleteOutcome> {
        let Some(task) = self.store.find_by_id(task_id).cloned() else {
            return Err(self.report(AppError::task_not_found(task_id, "delete")));
        };

        let message = format!("Are you sure you want to delete task \"{}\"?", task.title);
        if !self.confirmation.confirm(&message) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let next = self.store.delete(task_id);
        if next.find_by_id(task_id).is_some() {
            let error = AppError::unknown("failed to delete task", "delete").with_details(
                serde_json::json!({ "task_id": task_id, "title": task.title }),
            );
            return Err(self.report(error));
        }

        self.commit(next);

        self.notifier.notify(
            "Task deleted!",
            &format!("\"{}\" was deleted", task.title),
            "task-deleted",
        );

        self.history.push_state(
            Action::DeleteTask {
                task_id: task.id.clone(),
                deleted_task: task.clone(),
                timestamp: Utc::now(),
            },
            format!("Deleted {}", task.title),
            format!("?deleted={}", task.id),
            &*self.mirror,
        );

        Ok(DeleteOutcome::Deleted)
    }

    /// Create a task with defaulted fields in the board's first column.
    ///
    /// No history entry is recorded for creation.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the generated task fails validation;
    /// the store is unchanged.
    pub fn create_task(&mut self) -> Result<Task> {
        let column_id =
            self.columns.first().map_or_else(|| "todo".to_string(), |c| c.id.clone());
        let task = Task {
            id: generate_task_id(),
            title: format!("New task {}", self.store.len() + 1),
            description: "Description of the new task".to_string(),
            priority: Priority::Medium,
            column_id,
        };
        self.create_task_with(task)
    }

    /// Create a specific task on the board.
    ///
    /// Like [`create_task`](Self::create_task), no history entry is
    /// recorded.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the task fails validation; the
    /// store is unchanged.
    pub fn create_task_with(&mut self, task: Task) -> Result<Task> {
        let next = match self.store.create(task.clone()) {
            Ok(next) => next,
            Err(error) => {
                self.errors.push(error.clone());
                self.notifier.notify("Error", "failed to create task", "error");
                return Err(error);
            }
        };

        self.commit(next);
        self.notifier.notify("Task created!", &format!("\"{}\" created", task.title), "task-created");
        Ok(task)
    }

    /// Roll the store back to the last-known-good snapshot.
    ///
    /// Clears transient drag/edit state and notifies the user with the
    /// triggering error message. This is the board's only rollback
    /// mechanism: coarse-grained, not operation-scoped.
    pub fn recover_from_error(&mut self, message: &str) {
        self.store = self.last_valid.clone();
        self.dragged_task_id = None;
        self.editing_task_id = None;

        self.notifier.notify(
            "State recovered",
            &format!("Recovered after error: {message}"),
            "recovery",
        );
    }

    // === Transient UI state ===

    /// Mark a task as being edited.
    pub fn start_editing(&mut self, task_id: &str) {
        self.editing_task_id = Some(task_id.to_string());
    }

    /// Clear the editing marker.
    pub fn finish_editing(&mut self) {
        self.editing_task_id = None;
    }

    /// The task currently being edited, if any.
    #[must_use]
    pub fn editing_task_id(&self) -> Option<&str> {
        self.editing_task_id.as_deref()
    }

    /// Mark a task as being dragged.
    pub fn start_drag(&mut self, task_id: &str) {
        self.dragged_task_id = Some(task_id.to_string());
    }

    /// Clear the drag marker.
    pub fn end_drag(&mut self) {
        self.dragged_task_id = None;
    }

    /// The task currently being dragged, if any.
    #[must_use]
    pub fn dragged_task_id(&self) -> Option<&str> {
        self.dragged_task_id.as_deref()
    }

    // === Read views ===

    /// The board's columns, in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by id.
    #[must_use]
    pub fn find_column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    /// The current task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The tasks in a column, in insertion order.
    #[must_use]
    pub fn tasks_for_column(&self, column_id: &str) -> Vec<&Task> {
        self.store.list_by_column(column_id)
    }

    // === History ===

    /// Step the history cursor back; see [`HistoryLog::go_back`].
    pub fn go_back(&mut self) -> Option<&HistoryEntry> {
        self.history.go_back(&*self.mirror)
    }

    /// Step the history cursor forward; see [`HistoryLog::go_forward`].
    pub fn go_forward(&mut self) -> Option<&HistoryEntry> {
        self.history.go_forward(&*self.mirror)
    }

    /// Jump the history cursor; see [`HistoryLog::go_to`].
    pub fn go_to(&mut self, target: usize) -> Option<&HistoryEntry> {
        self.history.go_to(target, &*self.mirror)
    }

    /// Whether the history cursor can move back.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    /// Whether the history cursor can move forward.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Snapshot of the history log for display.
    #[must_use]
    pub fn history_info(&self) -> HistoryInfo {
        self.history.info()
    }

    /// Reset the history log.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // === Error log ===

    /// Retained errors, newest first.
    #[must_use]
    pub fn errors(&self) -> Vec<AppError> {
        self.errors.iter().cloned().collect()
    }

    /// Aggregate error statistics.
    #[must_use]
    pub fn error_stats(&self) -> ErrorStats {
        self.errors.stats()
    }

    /// Drop all retained errors.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    // === Internals ===

    /// Replace the store and refresh the last-valid snapshot.
    ///
    /// The snapshot only tracks non-empty stores, so recovery after the
    /// final task is deleted restores the board as it was just before.
    fn commit(&mut self, next: TaskStore) {
        self.store = next;
        if !self.store.is_empty() {
            self.last_valid = self.store.clone();
        }
    }

    /// Record an error and surface it as a notification.
    fn report(&mut self, error: AppError) -> AppError {
        self.notifier.notify("Error", &error.message, "error");
        self.errors.push(error.clone());
        error
    }
}
