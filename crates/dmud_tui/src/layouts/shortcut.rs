//! Shortcut hint line: fixed line below input (muted style), context-aware hints.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use super::input::INPUT_PADDING_H;
use super::style::{text_muted_style, warning_style};
use crate::theme::ConsolePalette;

/// Horizontal inset so hints align with input content (input border + input padding).
const SHORTCUT_INSET_H: u16 = 1 + INPUT_PADDING_H;

/// Rect for the shortcut line, aligned with the input content above.
pub fn shortcut_inner_rect(area: Rect) -> Rect {
    let inset = SHORTCUT_INSET_H;
    let w = area.width.saturating_sub(inset.saturating_mul(2));
    Rect {
        x: area.x.saturating_add(inset),
        y: area.y,
        width: w,
        height: area.height,
    }
}

/// What the footer hints should reflect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutContext<'a> {
    pub input_enabled: bool,
    pub input_has_text: bool,
    /// Scrolled away from the newest output.
    pub scrolled_up: bool,
    /// Transient note (e.g. "Reconnecting…") shown before the hints.
    pub note: Option<&'a str>,
}

/// Build the shortcut line for the footer:
/// - When disconnected: reconnect hint first
/// - When input has text: "Enter: send  ·  Esc: clear  ·  ↑↓: history"
/// - When scrolled up: "End: jump to latest"
/// - Otherwise the general key list
pub fn shortcut_line(palette: &ConsolePalette, ctx: ShortcutContext<'_>) -> Line<'static> {
    let hint = if !ctx.input_enabled {
        "Ctrl+R: reconnect  ·  PgUp/PgDn: scroll  ·  Ctrl+D: logs  ·  Ctrl+C: quit"
    } else if ctx.input_has_text {
        "Enter: send  ·  Esc: clear  ·  ↑↓: history  ·  Ctrl+C: quit"
    } else if ctx.scrolled_up {
        "End: jump to latest  ·  PgUp/PgDn: scroll  ·  Ctrl+C: quit"
    } else {
        "↑↓: history  ·  PgUp/PgDn: scroll  ·  Ctrl+L: clear  ·  Ctrl+T: theme  ·  Ctrl+D: logs  ·  Ctrl+C: quit"
    };
    let mut spans = Vec::new();
    if let Some(note) = ctx.note.filter(|n| !n.is_empty()) {
        spans.push(Span::styled(format!("{note}  ·  "), warning_style(palette.warning)));
    }
    spans.push(Span::styled(hint.to_string(), text_muted_style(palette.text_muted)));
    Line::from(spans)
}
