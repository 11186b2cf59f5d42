//! dmud-core: sans-IO building blocks for the dmud console.
//!
//! Nothing in this crate touches the network, the terminal, or a clock. The
//! runtime feeds transport and timer events into [ConnectionManager] and
//! executes the [Effect]s it returns; the UI owns a [LineBuffer] and an
//! [InputController]; [ThemeSync] resolves the palette.

pub mod connection;
pub mod endpoint;
pub mod error;
pub mod event;
pub mod history;
pub mod input;
pub mod lines;
pub mod params;
pub mod theme;

pub use connection::{
    AttemptId, ConnectionManager, ConnectionState, Effect, Payload, ReadyState, RECONNECT_DELAY,
};
pub use endpoint::{resolve_websocket_url, PageLocation};
pub use error::{ConsoleError, Result};
pub use event::{ConsoleCommand, ConsoleEvent};
pub use history::{Direction, History};
pub use input::{InputController, Submission, CLEAR_COMMANDS};
pub use lines::{AppendOutcome, Line, LineBuffer, LineKind, Viewport, MAX_LINES, NEAR_BOTTOM_THRESHOLD};
pub use params::LaunchParams;
pub use theme::{ColorScheme, ParentFrame, StyleSheet, StyleSource, ThemeRole, ThemeRoot, ThemeSync};
