//! Debug event logging.
//!
//! When `debug_logging` is enabled in the board config, board operations
//! are appended as JSONL lines to `.taskboard/board-events.jsonl`. This
//! allows debugging a session by inspecting exactly what operations ran.

use crate::config::BoardConfig;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Event log path relative to the base directory.
pub const EVENT_LOG_FILE_PATH: &str = ".taskboard/board-events.jsonl";

/// Log a board event if debug logging is enabled.
///
/// Checks the board config for the `debug_logging` flag. If enabled,
/// appends a JSONL line containing the operation name, timestamp, and
/// payload to the event log file.
///
/// Errors are silently ignored — logging should never break an operation.
pub fn log_board_event(op: &str, payload: &serde_json::Value, base_dir: &Path) {
    let Ok(Some(config)) = BoardConfig::load_from(base_dir) else {
        return;
    };

    if !config.debug_logging {
        return;
    }

    write_board_event(op, payload, base_dir);
}

/// Write the event to the log file.
fn write_board_event(op: &str, payload: &serde_json::Value, base_dir: &Path) {
    let log_path = base_dir.join(EVENT_LOG_FILE_PATH);

    if let Some(parent) = log_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let entry = serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "op": op,
        "payload": payload,
    });

    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let _ = writeln!(file, "{entry}");
}
