//! Testing utilities and mock collaborators.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]

use crate::history::Action;
use crate::traits::{ConfirmationPrompt, NavigationMirror, Notifier};
use std::cell::RefCell;
use std::collections::VecDeque;

/// A notifier that records every message it is asked to surface.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: RefCell<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    /// Create a new recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(title, body, tag)` triples received so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<(String, String, String)> {
        self.notifications.borrow().clone()
    }

    /// The tags received so far, oldest first.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.notifications.borrow().iter().map(|(_, _, tag)| tag.clone()).collect()
    }

    /// The most recent notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<(String, String, String)> {
        self.notifications.borrow().last().cloned()
    }

    /// Number of notifications received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.borrow().len()
    }

    /// Whether no notification was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.borrow().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str, tag: &str) {
        self.notifications.borrow_mut().push((
            title.to_string(),
            body.to_string(),
            tag.to_string(),
        ));
    }
}

/// A confirmation prompt that plays back queued answers.
///
/// Records every message it is asked about and panics when asked more
/// questions than answers were queued.
#[derive(Debug, Default)]
pub struct ScriptedConfirmation {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedConfirmation {
    /// Create a prompt with no queued answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a prompt answering each question in order.
    #[must_use]
    pub fn with_answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self { answers: RefCell::new(answers.into_iter().collect()), asked: RefCell::default() }
    }

    /// Queue an answer for the next confirmation.
    pub fn push_answer(&self, answer: bool) {
        self.answers.borrow_mut().push_back(answer);
    }

    /// The messages asked so far, oldest first.
    #[must_use]
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl ConfirmationPrompt for ScriptedConfirmation {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected confirmation: {message} (no more answers)"))
    }
}

/// A navigation mirror that records the sequence of calls it receives.
///
/// Calls are recorded as `push:<url>`, `back`, `forward` and
/// `replace:<url>` for easy assertion on ordering.
#[derive(Debug, Default)]
pub struct RecordingMirror {
    calls: RefCell<Vec<String>>,
}

impl RecordingMirror {
    /// Create a new recording mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl NavigationMirror for RecordingMirror {
    fn push_entry(&self, _state: &Action, _title: &str, url: &str) {
        self.calls.borrow_mut().push(format!("push:{url}"));
    }

    fn step_back(&self) {
        self.calls.borrow_mut().push("back".to_string());
    }

    fn step_forward(&self) {
        self.calls.borrow_mut().push("forward".to_string());
    }

    fn replace_current_entry(&self, _state: &Action, _title: &str, url: &str) {
        self.calls.borrow_mut().push(format!("replace:{url}"));
    }
}
