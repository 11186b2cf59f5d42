//! Shared constants for the dmud console: app metadata and default theme colors.

pub mod app;
pub mod theme;
