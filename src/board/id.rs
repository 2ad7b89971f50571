//! Task id generation.
//!
//! Ids are generated client-side from the current time in milliseconds
//! since the Unix epoch, with a monotonic tie-break so two tasks created
//! within the same millisecond still get distinct ids.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Last id handed out, used both for the monotonic tie-break and for
/// deterministic ID generation in tests.
static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Whether to use deterministic IDs (for testing).
static USE_DETERMINISTIC_IDS: AtomicBool = AtomicBool::new(false);

/// Enable deterministic ID generation for testing.
///
/// When enabled, ids are a simple counter starting at 1.
pub fn enable_deterministic_ids() {
    USE_DETERMINISTIC_IDS.store(true, Ordering::SeqCst);
    LAST_ID.store(0, Ordering::SeqCst);
}

/// Disable deterministic ID generation.
pub fn disable_deterministic_ids() {
    USE_DETERMINISTIC_IDS.store(false, Ordering::SeqCst);
    LAST_ID.store(0, Ordering::SeqCst);
}

/// Generate a new task id.
///
/// The id is the current epoch-millisecond timestamp as a decimal string,
/// bumped past the previously issued id when the clock has not advanced.
#[must_use]
pub fn generate_task_id() -> String {
    let candidate = if USE_DETERMINISTIC_IDS.load(Ordering::SeqCst) {
        0
    } else {
        now_millis()
    };

    // fetch_update with a Some closure cannot fail; the returned value is
    // the previous id, so the issued id is recomputed from it.
    let previous = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(candidate.max(last.saturating_add(1)))
        })
        .unwrap_or(candidate);

    candidate.max(previous.saturating_add(1)).to_string()
}

/// Milliseconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> u64 {
    // Truncation is fine: u64 milliseconds cover the next ~580 million years
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}
