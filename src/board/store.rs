//! The in-memory task store.
//!
//! The store is a value: every transform returns a new store and leaves
//! the receiver untouched. The controller relies on this to keep a
//! last-known-good snapshot it can roll back to atomically.

use crate::board::models::{validate_task, Task, TaskPatch};
use crate::error::Result;

/// An ordered, in-memory collection of tasks.
///
/// Insertion order is preserved and is the order tasks are listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Create a store seeded with the given tasks.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self { tasks: tasks.into_iter().collect() }
    }

    /// Look up a task by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// List the tasks in a column, in insertion order.
    #[must_use]
    pub fn list_by_column(&self, column_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.column_id == column_id).collect()
    }

    /// Add a task, returning the new store.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the task's id, title or column id
    /// is empty. The receiving store is unchanged on failure.
    pub fn create(&self, task: Task) -> Result<Self> {
        validate_task(&task)?;
        let mut tasks = self.tasks.clone();
        tasks.push(task);
        Ok(Self { tasks })
    }

    /// Merge a patch into the task with the given id.
    ///
    /// Returns the new store and whether the id was found. When the id is
    /// absent the returned store is identical to the receiver.
    #[must_use]
    pub fn update(&self, id: &str, patch: &TaskPatch) -> (Self, bool) {
        let mut found = false;
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    found = true;
                    patch.apply(task)
                } else {
                    task.clone()
                }
            })
            .collect();
        (Self { tasks }, found)
    }

    /// Remove the task with the given id, returning the new store.
    ///
    /// Idempotent: deleting an absent id returns an identical store.
    #[must_use]
    pub fn delete(&self, id: &str) -> Self {
        Self { tasks: self.tasks.iter().filter(|task| task.id != id).cloned().collect() }
    }

    /// Iterate over all tasks in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Number of tasks in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
