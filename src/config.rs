//! Board configuration.
//!
//! This module handles the `.taskboard/board-config.yaml` file which
//! defines the board's fixed columns, the tasks it starts with, and a few
//! tunables. Absent file or fields fall back to the built-in board: three
//! columns (to do / in progress / done) seeded with two example tasks.

use crate::board::{Column, Priority, Task};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to the base directory.
pub const CONFIG_FILE_PATH: &str = ".taskboard/board-config.yaml";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Board configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardConfig {
    /// The board's fixed columns, in display order. The first column is
    /// where newly created tasks land.
    #[serde(default = "default_columns")]
    pub columns: Vec<Column>,

    /// Tasks present when the board starts.
    #[serde(default = "default_seed_tasks")]
    pub seed_tasks: Vec<Task>,

    /// Capacity of the error log ring buffer.
    #[serde(default = "default_error_log_capacity")]
    pub error_log_capacity: usize,

    /// Whether to append board operations to the JSONL event log.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            seed_tasks: default_seed_tasks(),
            error_log_capacity: default_error_log_capacity(),
            debug_logging: false,
        }
    }
}

/// The built-in column set.
fn default_columns() -> Vec<Column> {
    vec![
        Column::new("todo", "To do"),
        Column::new("in-progress", "In progress"),
        Column::new("done", "Done"),
    ]
}

/// The two example tasks a fresh board starts with.
fn default_seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            title: "Learn the board".to_string(),
            description: "Move this card between columns to try the board out".to_string(),
            priority: Priority::High,
            column_id: "todo".to_string(),
        },
        Task {
            id: "2".to_string(),
            title: "Configure columns".to_string(),
            description: "Edit board-config.yaml to change columns and seed tasks".to_string(),
            priority: Priority::Medium,
            column_id: "todo".to_string(),
        },
    ]
}

const fn default_error_log_capacity() -> usize {
    crate::error::DEFAULT_ERROR_LOG_CAPACITY
}

impl BoardConfig {
    /// Load config from a specific base directory.
    ///
    /// Returns `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = base_dir.join(CONFIG_FILE_PATH);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from a base directory, falling back to the defaults
    /// when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(base_dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self::load_from(base_dir)?.unwrap_or_default())
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<(), ConfigError> {
        let config_path = base_dir.join(CONFIG_FILE_PATH);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    #[must_use]
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }
}
