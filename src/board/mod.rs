//! Task board data model and storage.
//!
//! This module provides the board's data layer:
//! - Tasks with title, description, priority, and column assignment
//! - Fixed columns representing workflow stages
//! - Typed patches for merge-style task updates
//! - An immutable-value task store supporting atomic rollback
//!
//! # Example
//!
//! ```
//! use taskboard::board::{Task, TaskPatch, TaskStore, Priority};
//!
//! let store = TaskStore::new();
//! let store = store
//!     .create(Task {
//!         id: "1".to_string(),
//!         title: "Learn Rust".to_string(),
//!         description: String::new(),
//!         priority: Priority::High,
//!         column_id: "todo".to_string(),
//!     })
//!     .unwrap();
//!
//! let (store, found) = store.update("1", &TaskPatch::move_to("done"));
//! assert!(found);
//! assert_eq!(store.find_by_id("1").unwrap().column_id, "done");
//! ```

pub mod id;
pub mod models;
pub mod store;

pub use id::generate_task_id;
pub use models::{validate_task, Column, InvalidPriority, Priority, Task, TaskPatch};
pub use store::TaskStore;
