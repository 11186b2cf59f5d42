//! Header strip: title and endpoint on the left, status dot and label on the right.

use dmud_core::ConnectionState;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::style::{background_style, border_style, danger_style, success_style, text_muted_style, text_style, warning_style};
use crate::theme::ConsolePalette;
use crate::utils::horizontal_padding;

/// Title shown at the left of the header.
pub const HEADER_TITLE: &str = dmud_constant::app::DISPLAY_NAME;

/// Layout for the header: outer area and padded inner rect for content.
#[derive(Debug, Clone)]
pub struct HeadLayout {
    pub area: Rect,
    pub inner: Rect,
}

impl HeadLayout {
    pub fn new(area: Rect) -> Self {
        let inner = horizontal_padding(area);
        Self { area, inner }
    }
}

/// Dot color per state: green connected, yellow connecting, red issue, muted disconnected.
pub fn status_dot_style(status: ConnectionState, palette: &ConsolePalette) -> Style {
    match status {
        ConnectionState::Connected => success_style(palette.success),
        ConnectionState::Connecting => warning_style(palette.warning),
        ConnectionState::Error => danger_style(palette.danger),
        ConnectionState::Disconnected => text_muted_style(palette.text_muted),
    }
}

/// Title (bold), endpoint (muted), then right-aligned `● label`. The endpoint
/// is truncated from the right when the row is too narrow.
pub fn header_line(
    title: &str,
    endpoint: &str,
    status: ConnectionState,
    palette: &ConsolePalette,
    width: u16,
) -> Line<'static> {
    let title_style = text_style(palette.text).add_modifier(Modifier::BOLD);
    let label = status.label();
    let right_len = 2 + label.width();
    let left_len = title.width();
    let room = (width as usize).saturating_sub(left_len + right_len + 3);
    let endpoint: String = if endpoint.width() <= room {
        endpoint.to_string()
    } else {
        truncate_to_width(endpoint, room)
    };
    let used = left_len + if endpoint.is_empty() { 0 } else { 2 + endpoint.width() };
    let gap = (width as usize).saturating_sub(used + right_len);

    let mut spans = vec![Span::styled(title.to_string(), title_style)];
    if !endpoint.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(endpoint, text_muted_style(palette.text_muted)));
    }
    spans.push(Span::raw(" ".repeat(gap)));
    spans.push(Span::styled("● ".to_string(), status_dot_style(status, palette)));
    spans.push(Span::styled(label.to_string(), text_muted_style(palette.text_muted)));
    Line::from(spans)
}

fn truncate_to_width(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Block for the header bar: surface background, bottom border on the second line.
pub fn block_for_head(palette: &ConsolePalette) -> Block<'static> {
    Block::default()
        .borders(Borders::BOTTOM)
        .border_style(border_style(palette.border))
        .style(background_style(palette.surface))
}

/// Draw the header: two-line block (title line, then border).
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    palette: &ConsolePalette,
    endpoint: &str,
    status: ConnectionState,
) {
    let layout = HeadLayout::new(area);
    let line = header_line(HEADER_TITLE, endpoint, status, palette, layout.inner.width);
    frame.render_widget(block_for_head(palette), layout.area);
    frame.render_widget(Paragraph::new(line).style(background_style(palette.surface)), layout.inner);
}
