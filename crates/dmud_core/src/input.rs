//! Input controller: routes a submitted line and owns the history.

use crate::history::{Direction, History};

/// Commands handled locally instead of being sent (trimmed, case-insensitive).
pub const CLEAR_COMMANDS: [&str; 2] = ["/clear", ":clear"];

/// Notice appended after a local clear.
pub const NOTICE_CLEARED: &str = "Cleared output.";

/// What the caller should do with a submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Empty or whitespace only; nothing recorded.
    Ignored,
    /// Clear the output locally; nothing is sent.
    Clear,
    /// Send the text as typed.
    Send(String),
}

#[derive(Debug, Clone, Default)]
pub struct InputController {
    history: History,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn submit(&mut self, value: &str) -> Submission {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Submission::Ignored;
        }
        let lowered = trimmed.to_lowercase();
        let submission = if CLEAR_COMMANDS.contains(&lowered.as_str()) {
            Submission::Clear
        } else {
            Submission::Send(value.to_string())
        };
        self.history.push(value);
        submission
    }

    /// Text to show after navigating, or `None` to leave the input as is.
    pub fn navigate(&mut self, direction: Direction) -> Option<String> {
        self.history.navigate(direction).map(str::to_string)
    }
}
