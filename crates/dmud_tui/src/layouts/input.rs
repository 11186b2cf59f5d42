//! Command input block: rounded border, dimmed while the connection is down.

use dmud_core::ConnectionState;
use ratatui::widgets::{Block, BorderType, Borders, Padding};

use super::style::{background_style, border_focused_style, border_style};
use crate::theme::ConsolePalette;

/// Horizontal padding inside the input block (each side).
pub const INPUT_PADDING_H: u16 = 2;

/// Prompt shown at the start of the input line.
pub const INPUT_ICON: &str = "▸ ";

/// Block for the input area with full rounded border and horizontal padding.
/// Enabled input gets the accent-tinted border; disabled input the plain one.
pub fn block_for_input_bordered(palette: &ConsolePalette, enabled: bool) -> Block<'static> {
    let border = if enabled {
        border_focused_style(palette.border_focused)
    } else {
        border_style(palette.border)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(background_style(palette.surface))
        .padding(Padding::new(INPUT_PADDING_H, INPUT_PADDING_H, 0, 0))
}

/// Placeholder for an empty input line.
pub fn input_placeholder(enabled: bool, status: ConnectionState) -> &'static str {
    if enabled {
        return "Type a command…";
    }
    match status {
        ConnectionState::Connecting => "Connecting…",
        _ => "Waiting for the server… (Ctrl+R to reconnect)",
    }
}
