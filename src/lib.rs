//! # `taskboard`
//!
//! A kanban-style task board core: tasks move between fixed columns, and
//! every committed mutation is recorded in an in-memory action history
//! synchronized with an external navigation-stack mirror.
//!
//! The [`controller::BoardController`] owns all state; rendering,
//! drag-and-drop visuals and notification delivery are collaborator
//! traits supplied by the embedding application (see [`traits`]).

pub mod board;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod event_log;
pub mod history;
pub mod testing;
pub mod traits;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
