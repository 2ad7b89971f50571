//! Interactive command-line front end for the board.
//!
//! The binary is a thin wrapper around [`run`]: it builds a
//! [`BoardController`] wired to console collaborators and drives it from
//! stdin, one command per line. All command handling lives in
//! [`execute_line`] so it is testable without a terminal.

use crate::board::{Priority, TaskPatch};
use crate::config::BoardConfig;
use crate::controller::{BoardController, DeleteOutcome, MoveOutcome};
use crate::event_log::log_board_event;
use crate::traits::{ConfirmationPrompt, Notifier, NullMirror};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Interactive kanban task board.
///
/// Starts a shell over an in-memory board. State is ephemeral: it lives
/// for the session and is gone when the shell exits.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base directory containing the .taskboard/ config directory.
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Answer yes to every confirmation instead of prompting.
    #[arg(long)]
    pub yes: bool,
}

/// A notifier that prints to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str, tag: &str) {
        eprintln!("[{tag}] {title}: {body}");
    }
}

/// A confirmation prompt reading answers from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirmation;

impl ConfirmationPrompt for StdinConfirmation {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Outcome of executing one input line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keep reading commands; print these messages first.
    Messages(Vec<String>),
    /// Exit the shell.
    Quit,
}

/// Run the interactive shell until stdin closes or the user quits.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub fn run(cli: &Cli) -> std::io::Result<()> {
    let config = BoardConfig::load_or_default(&cli.base_dir).unwrap_or_else(|e| {
        eprintln!("Warning: could not load config: {e}");
        BoardConfig::default()
    });

    let confirmation: Box<dyn ConfirmationPrompt> = if cli.yes {
        Box::new(crate::traits::AlwaysConfirm(true))
    } else {
        Box::new(StdinConfirmation)
    };
    let mut controller = BoardController::with_config(
        &config,
        Box::new(ConsoleNotifier),
        confirmation,
        // There is no native navigation stack in a terminal session
        Box::new(NullMirror),
    );

    println!("taskboard v{} (type 'help' for commands)", crate::VERSION);
    print_messages(&render_board(&controller));

    // Stdin is read one line at a time so the confirmation prompt can
    // also read from it mid-command.
    let mut line = String::new();
    loop {
        line.clear();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        match execute_line(&mut controller, &line, &cli.base_dir) {
            LineOutcome::Quit => break,
            LineOutcome::Messages(messages) => print_messages(&messages),
        }
    }

    Ok(())
}

fn print_messages(messages: &[String]) {
    for message in messages {
        println!("{message}");
    }
}

/// Execute one command line against the controller.
pub fn execute_line(
    controller: &mut BoardController,
    line: &str,
    base_dir: &Path,
) -> LineOutcome {
    let words: Vec<&str> = line.split_whitespace().collect();

    let messages = match words.as_slice() {
        [] => vec![],
        ["quit" | "exit"] => return LineOutcome::Quit,
        ["help"] => usage(),
        ["board"] => render_board(controller),
        ["add"] => match controller.create_task() {
            Ok(task) => {
                log_board_event(
                    "create_task",
                    &serde_json::json!({ "task_id": task.id }),
                    base_dir,
                );
                vec![format!("created [{}] {}", task.id, task.title)]
            }
            Err(e) => vec![format!("error: {e}")],
        },
        ["move", task_id, column_id] => match controller.move_task(task_id, column_id) {
            Ok(MoveOutcome::Moved) => {
                log_board_event(
                    "move_task",
                    &serde_json::json!({ "task_id": task_id, "column_id": column_id }),
                    base_dir,
                );
                vec![format!("moved {task_id} to {column_id}")]
            }
            Ok(MoveOutcome::AlreadyInColumn) => {
                vec![format!("{task_id} is already in {column_id}")]
            }
            Err(e) => vec![format!("error: {e}")],
        },
        ["edit", task_id, field, value @ ..] if !value.is_empty() => {
            match parse_patch(field, &value.join(" ")) {
                Ok(patch) => match controller.update_task(task_id, &patch) {
                    Ok(task) => {
                        log_board_event(
                            "update_task",
                            &serde_json::json!({ "task_id": task_id, "field": field }),
                            base_dir,
                        );
                        vec![format!("updated [{}] {}", task.id, task.title)]
                    }
                    Err(e) => vec![format!("error: {e}")],
                },
                Err(message) => vec![message],
            }
        }
        ["delete", task_id] => match controller.delete_task(task_id) {
            Ok(DeleteOutcome::Deleted) => {
                log_board_event(
                    "delete_task",
                    &serde_json::json!({ "task_id": task_id }),
                    base_dir,
                );
                vec![format!("deleted {task_id}")]
            }
            Ok(DeleteOutcome::Cancelled) => vec!["deletion cancelled".to_string()],
            Err(e) => vec![format!("error: {e}")],
        },
        ["back"] => controller.go_back().map_or_else(
            || vec!["already at the start of history".to_string()],
            |entry| vec![format!("now at: {}", entry.title)],
        ),
        ["forward"] => controller.go_forward().map_or_else(
            || vec!["already at the end of history".to_string()],
            |entry| vec![format!("now at: {}", entry.title)],
        ),
        ["goto", index] => match index.parse::<usize>() {
            Ok(target) => {
                let total_entries = controller.history_info().total_entries;
                controller.go_to(target).map_or_else(
                    || {
                        vec![format!(
                            "invalid index: {target} (history has {total_entries} entries)"
                        )]
                    },
                    |entry| vec![format!("now at: {}", entry.title)],
                )
            }
            Err(_) => vec![format!("not an index: {index}")],
        },
        ["history"] => render_history(controller),
        ["clear-history"] => {
            controller.clear_history();
            vec!["history cleared".to_string()]
        }
        ["errors"] => render_errors(controller),
        ["clear-errors"] => {
            controller.clear_errors();
            vec!["error log cleared".to_string()]
        }
        _ => vec![format!("unknown command: {line} (type 'help')")],
    };

    LineOutcome::Messages(messages)
}

fn usage() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  board                     show the board".to_string(),
        "  add                       create a task in the first column".to_string(),
        "  move <id> <column>        move a task to a column".to_string(),
        "  edit <id> <field> <text>  set title, description or priority".to_string(),
        "  delete <id>               delete a task (asks for confirmation)".to_string(),
        "  back | forward | goto <n> navigate the action history".to_string(),
        "  history                   show the action history".to_string(),
        "  clear-history             reset the action history".to_string(),
        "  errors | clear-errors     show or reset the error log".to_string(),
        "  quit                      exit".to_string(),
    ]
}

fn parse_patch(field: &str, value: &str) -> Result<TaskPatch, String> {
    match field {
        "title" => Ok(TaskPatch { title: Some(value.to_string()), ..TaskPatch::default() }),
        "description" => {
            Ok(TaskPatch { description: Some(value.to_string()), ..TaskPatch::default() })
        }
        "priority" => match Priority::from_str(value) {
            Ok(priority) => Ok(TaskPatch { priority: Some(priority), ..TaskPatch::default() }),
            Err(e) => Err(format!("error: {e}")),
        },
        other => Err(format!("unknown field: {other} (title, description, priority)")),
    }
}

fn render_board(controller: &BoardController) -> Vec<String> {
    let mut lines = Vec::new();
    for column in controller.columns() {
        lines.push(format!("== {} ({}) ==", column.title, column.id));
        let tasks = controller.tasks_for_column(&column.id);
        if tasks.is_empty() {
            lines.push("  (empty)".to_string());
        }
        for task in tasks {
            lines.push(format!("  [{}] {} ({})", task.id, task.title, task.priority));
        }
    }
    lines
}

fn render_history(controller: &BoardController) -> Vec<String> {
    let info = controller.history_info();
    if info.entries.is_empty() {
        return vec!["history is empty".to_string()];
    }

    let mut lines = vec![format!(
        "position {} of {}",
        info.current_index.map_or(0, |i| i + 1),
        info.total_entries
    )];
    for entry in &info.entries {
        let marker = if info.current_index == Some(entry.index) { ">" } else { " " };
        lines.push(format!("{marker} {}: {} ({})", entry.index, entry.title, entry.url));
    }
    lines
}

fn render_errors(controller: &BoardController) -> Vec<String> {
    let errors = controller.errors();
    if errors.is_empty() {
        return vec!["no errors recorded".to_string()];
    }

    let stats = controller.error_stats();
    let mut lines = vec![format!("{} error(s), newest first:", stats.total)];
    for error in errors {
        let severity = if error.recoverable { "WARN" } else { "ERROR" };
        lines.push(format!("  [{severity}] {error}"));
    }
    lines
}
