//! Theme resolution: a fixed palette of CSS custom properties kept in sync
//! across three sources, lowest precedence first:
//!
//! 1. computed styles ([StyleSource]), with per-role fallback names and a
//!    hard-coded default;
//! 2. launch parameters (per-role aliases, plus `colorScheme`/`scheme`/`theme`);
//! 3. theme messages posted by an embedding host ([ThemeSync::handle_message]).
//!
//! Messages apply incrementally. A later [ThemeSync::refresh_from_computed]
//! re-resolves from computed styles only, so it can override values that
//! came from earlier messages.

mod color;
mod message;
mod role;
mod root;
mod style;
mod sync;

pub use color::{normalise_color, ColorScheme};
pub use message::{
    classify_message, parse_message_theme, ThemeMessage, ThemeUpdate, REQUEST_THEME_TYPE,
    THEME_MESSAGE_TYPES, THEME_REQUEST_TYPE,
};
pub use role::{ThemeRole, MESSAGE_ALIASES};
pub use root::ThemeRoot;
pub use style::{StyleSheet, StyleSource};
pub use sync::{MessageOutcome, NoParent, ParentFrame, ThemeSync, ThemeSyncOptions, REQUEST_RETRY_DELAY};
