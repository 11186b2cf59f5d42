//! Layout components built from [crate::utils] and [crate::theme].
//!
//! - **[split]**: Split the screen into header, body, footer.
//! - **[style]**: Map palette [crate::theme::Rgb] to ratatui styles.
//! - **[head]**: Header strip: title, endpoint, status dot.
//! - **[output]**: Scrollback body: line styling and row counting.
//! - **[input]**: Command input block.
//! - **[shortcut]**: Shortcut hint line (below input).

mod head;
mod input;
mod output;
mod shortcut;
mod split;
mod style;

pub use head::{block_for_head, header_line, render_header, status_dot_style, HeadLayout, HEADER_TITLE};
pub use input::{block_for_input_bordered, input_placeholder, INPUT_ICON, INPUT_PADDING_H};
pub use output::{line_height, output_lines, OutputLayout, SYSTEM_MARKER};
pub use shortcut::{shortcut_inner_rect, shortcut_line, ShortcutContext};
pub use split::{main_splits, main_splits_with_padding, vertical_split, MainSplits, FOOTER_HEIGHT, HEADER_HEIGHT};
pub use style::{
    background_style, border_focused_style, border_style, danger_style, rgb_to_color, success_style,
    text_muted_style, text_style, warning_style,
};
