//! Console theme: terminal colors resolved from the shared [dmud_core::ThemeRoot].
//!
//! # Example
//!
//! ```ignore
//! use dmud_tui::theme::ConsolePalette;
//!
//! let palette = ConsolePalette::from_root(&root);
//! let accent = palette.accent.tuple(); // (r, g, b) for ratatui
//! ```

mod appearance;
mod palette;
mod rgb;

pub use appearance::Appearance;
pub use palette::ConsolePalette;
pub use rgb::Rgb;
