//! dmud-tui: terminal UI for the dmud console.
//!
//! Theming in `theme`; layout in `layouts`; state and view in [state] and [view].
//! Run with [run_console].

pub mod layouts;
pub mod run;
pub mod runtime_events;
pub mod state;
pub mod theme;
pub mod utils;
pub mod view;

pub use run::{handle_event, run_console, Action};
pub use runtime_events::apply_console_event;
pub use state::{ConsoleState, Screen};
pub use view::draw as draw_view;
