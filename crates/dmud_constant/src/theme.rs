//! Theme color constants for the console palette.
//!
//! Each role is exposed as a CSS custom property so embedding hosts can
//! override it by name. Defaults match the dark web console.

/// `--mud-bg`: #0f0f10
pub const BACKGROUND: &str = "#0f0f10";
/// `--mud-surface`: #151517
pub const SURFACE: &str = "#151517";
/// `--mud-border`: #1f2024
pub const BORDER: &str = "#1f2024";
/// `--mud-text`: #f5f6f7
pub const TEXT: &str = "#f5f6f7";
/// `--mud-subtle-text`: #a1a7b3
pub const SUBTLE_TEXT: &str = "#a1a7b3";
/// `--mud-accent`: #f97316
pub const ACCENT: &str = "#f97316";
/// `--mud-accent-text`: #0b0c0f
pub const ACCENT_TEXT: &str = "#0b0c0f";
/// `--mud-success`: #16a34a
pub const SUCCESS: &str = "#16a34a";
/// `--mud-error`: #ef4444
pub const ERROR: &str = "#ef4444";

/// Status dot while a connection attempt is in flight: #eab308
pub const CONNECTING: (u8, u8, u8) = (234, 179, 8);
