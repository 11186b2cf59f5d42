//! Messages exchanged between the runtime and the UI.

use crate::connection::ConnectionState;
use crate::theme::ThemeRoot;

/// Runtime → UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    /// Endpoint resolved at startup.
    Endpoint(String),
    Status(ConnectionState),
    InputEnabled(bool),
    /// Raw server text for the line renderer.
    Output(String),
    /// Client-generated notice.
    Notice(String),
    /// Resolved theme after any change.
    Theme(ThemeRoot),
}

/// UI → runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// A command to send (or queue).
    Submit(String),
    /// User-triggered reconnect.
    Reconnect,
    /// Re-resolve the palette from computed styles.
    RefreshTheme,
    /// Close the connection and stop.
    Shutdown,
}

impl ConsoleEvent {
    pub fn notice(text: impl Into<String>) -> Self {
        ConsoleEvent::Notice(text.into())
    }
}
