//! Shared utilities for the console TUI.
//!
//! - **[constants]**: Spacing, scroll steps and buffer caps.
//! - **[layout]**: Rect padding, scroll clamping, character wrapping.

mod constants;
mod layout;

pub use constants::*;
pub use layout::{horizontal_padding, horizontal_padding_with, scroll_with_buffer, wrap_to_width, wrapped_height};
