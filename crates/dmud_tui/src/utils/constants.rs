//! TUI spacing and sizing constants.

/// Horizontal padding in characters (each side).
pub const HORIZONTAL_PADDING: u16 = 2;

/// Left indent for system notices (two spaces).
pub const LEFT_PADDING: &str = "  ";

/// Rows moved per mouse wheel notch.
pub const WHEEL_SCROLL_LINES: usize = 3;

/// Rows kept in view when paging (PageUp/PageDown move viewport minus this).
pub const PAGE_OVERLAP_LINES: usize = 2;

/// Max debug trace lines kept (older lines dropped).
pub const MAX_TRACE_LINES: usize = 2000;
