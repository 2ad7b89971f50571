//! Integration tests for `taskboard`.

use taskboard::board::{Priority, TaskPatch};
use taskboard::config::BoardConfig;
use taskboard::controller::{BoardController, DeleteOutcome, MoveOutcome};
use taskboard::history::Action;
use taskboard::testing::{RecordingMirror, RecordingNotifier, ScriptedConfirmation};
use taskboard::VERSION;
use std::rc::Rc;

#[test]
fn test_version_exists() {
    assert!(!VERSION.is_empty());
}

#[test]
fn test_full_board_session() {
    let notifier = Rc::new(RecordingNotifier::new());
    let confirmation = Rc::new(ScriptedConfirmation::with_answers([false, true]));
    let mirror = Rc::new(RecordingMirror::new());

    let mut board = BoardController::with_config(
        &BoardConfig::default(),
        Box::new(Rc::clone(&notifier)),
        Box::new(Rc::clone(&confirmation)),
        Box::new(Rc::clone(&mirror)),
    );

    // Work a task across the board
    assert_eq!(board.move_task("1", "in-progress").unwrap(), MoveOutcome::Moved);
    assert_eq!(board.move_task("1", "done").unwrap(), MoveOutcome::Moved);

    // Rename the other task
    let patch = TaskPatch { title: Some("Tune the board".to_string()), ..TaskPatch::default() };
    let updated = board.update_task("2", &patch).unwrap();
    assert_eq!(updated.title, "Tune the board");
    assert_eq!(updated.priority, Priority::Medium);

    // First deletion attempt is declined, second goes through
    assert_eq!(board.delete_task("2").unwrap(), DeleteOutcome::Cancelled);
    assert_eq!(board.delete_task("2").unwrap(), DeleteOutcome::Deleted);

    // Create a fresh task; creation is not recorded in history
    let created = board.create_task().unwrap();
    assert_eq!(created.column_id, "todo");

    let info = board.history_info();
    let kinds: Vec<&str> = info.entries.iter().map(|e| e.state.kind()).collect();
    assert_eq!(kinds, vec!["move_task", "move_task", "update_task", "delete_task"]);
    assert_eq!(info.current_index, Some(3));

    // Navigating the log never touches the task store
    let store_before = board.store().clone();
    let entry = board.go_back().unwrap().clone();
    assert_eq!(entry.state.kind(), "update_task");
    assert_eq!(board.store(), &store_before);

    // The mirror saw one frame per commit, then the back step
    assert_eq!(
        mirror.calls(),
        vec![
            "push:?moved=1".to_string(),
            "push:?moved=1".to_string(),
            "push:?updated=2".to_string(),
            "push:?deleted=2".to_string(),
            "back".to_string(),
        ]
    );

    // Pushing after navigating back discards the forward branch
    board.move_task(&created.id, "in-progress").unwrap();
    let info = board.history_info();
    assert_eq!(info.total_entries, 4);
    assert_eq!(info.entries[3].state.kind(), "move_task");

    assert_eq!(
        notifier.tags(),
        vec![
            "task-moved".to_string(),
            "task-moved".to_string(),
            "task-updated".to_string(),
            "task-deleted".to_string(),
            "task-created".to_string(),
            "task-moved".to_string(),
        ]
    );
    assert!(board.errors().is_empty());
}

#[test]
fn test_failed_operations_leave_no_trace_in_history() {
    let notifier = Rc::new(RecordingNotifier::new());
    let mut board = BoardController::with_config(
        &BoardConfig::default(),
        Box::new(Rc::clone(&notifier)),
        Box::new(ScriptedConfirmation::new()),
        Box::new(RecordingMirror::new()),
    );

    assert!(board.move_task("missing", "done").is_err());
    assert!(board.update_task("missing", &TaskPatch::default()).is_err());
    assert!(board.delete_task("missing").is_err());
    assert!(board.move_task("1", "nowhere").is_err());

    assert!(board.history_info().entries.is_empty());
    assert_eq!(board.store().len(), 2);
    assert_eq!(board.error_stats().total, 4);
    assert_eq!(notifier.tags(), vec!["error".to_string(); 4]);
}

#[test]
fn test_recovery_restores_last_committed_state() {
    let mut board = BoardController::with_config(
        &BoardConfig::default(),
        Box::new(RecordingNotifier::new()),
        Box::new(ScriptedConfirmation::new()),
        Box::new(RecordingMirror::new()),
    );

    board.move_task("1", "done").unwrap();
    let snapshot = board.store().clone();

    let wipe_title = TaskPatch { title: Some(String::new()), ..TaskPatch::default() };
    let err = board.update_task("1", &wipe_title).unwrap_err();
    assert_eq!(err.kind, taskboard::error::ErrorKind::ValidationError);

    assert_eq!(board.store(), &snapshot);

    // The board keeps working after recovery
    board.move_task("2", "in-progress").unwrap();
    match &board.history_info().entries[1].state {
        Action::MoveTask { task_id, to, .. } => {
            assert_eq!(task_id, "2");
            assert_eq!(to, "in-progress");
        }
        other => panic!("expected MoveTask, got {other:?}"),
    }
}
