//! Scrollback body: turns buffered lines into pre-wrapped terminal rows.
//!
//! Rows are wrapped here (not by the paragraph widget) so the row count used
//! for scrolling and the near-bottom check is exact.

use dmud_core::{LineBuffer, LineKind};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::style::{text_muted_style, text_style};
use crate::theme::ConsolePalette;
use crate::utils::{wrap_to_width, wrapped_height, LEFT_PADDING};

/// Prefix marking client notices.
pub const SYSTEM_MARKER: &str = "» ";

/// Layout for the scrollback: the body area minus a one-column scrollbar gutter.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub area: Rect,
    pub inner: Rect,
    pub scrollbar: Rect,
}

impl OutputLayout {
    pub fn new(area: Rect) -> Self {
        let inner = Rect {
            width: area.width.saturating_sub(2),
            ..area
        };
        let scrollbar = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y,
            width: area.width.min(1),
            height: area.height,
        };
        Self { area, inner, scrollbar }
    }
}

/// Render every buffered line as rows of at most `width` columns.
pub fn output_lines(buffer: &LineBuffer, palette: &ConsolePalette, width: usize) -> Vec<Line<'static>> {
    let content = text_style(palette.text);
    let system = text_muted_style(palette.text_muted).add_modifier(Modifier::ITALIC);
    let marker = text_style(palette.accent);
    let mut rows = Vec::with_capacity(buffer.len());
    for line in buffer.iter() {
        match line.kind {
            LineKind::Blank => rows.push(Line::from("")),
            LineKind::Content => {
                for row in wrap_to_width(&line.text, width) {
                    rows.push(Line::from(Span::styled(row, content)));
                }
            }
            LineKind::System => {
                let text_width = width.saturating_sub(SYSTEM_MARKER.width());
                for (i, row) in wrap_to_width(&line.text, text_width).into_iter().enumerate() {
                    let lead = if i == 0 {
                        Span::styled(SYSTEM_MARKER, marker)
                    } else {
                        Span::raw(LEFT_PADDING)
                    };
                    rows.push(Line::from(vec![lead, Span::styled(row, system)]));
                }
            }
        }
    }
    rows
}

/// Rows one buffered line takes at `width`.
pub fn line_height(line: &dmud_core::Line, width: usize) -> usize {
    match line.kind {
        LineKind::Blank => 1,
        LineKind::Content => wrapped_height(&line.text, width),
        LineKind::System => wrapped_height(&line.text, width.saturating_sub(SYSTEM_MARKER.width())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmud_core::Viewport;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn layout_reserves_scrollbar_column() {
        let layout = OutputLayout::new(Rect::new(2, 2, 76, 18));
        assert_eq!(layout.inner.width, 74);
        assert_eq!(layout.scrollbar.x, 77);
        assert_eq!(layout.scrollbar.height, 18);
    }

    #[test]
    fn layout_zero_size() {
        let layout = OutputLayout::new(Rect::new(0, 0, 0, 0));
        assert_eq!(layout.inner.width, 0);
        assert_eq!(layout.scrollbar.width, 0);
    }

    #[test]
    fn kinds_render_differently() {
        let mut buf = LineBuffer::new();
        let v = Viewport::default();
        buf.append_message("You see a door.\n\nExits: north", &v);
        buf.append_system("Reconnected to the server.", &v);
        let palette = ConsolePalette::default();
        let rows = output_lines(&buf, &palette, 80);
        assert_eq!(rows.len(), 4);
        assert_eq!(text_of(&rows[0]), "You see a door.");
        assert_eq!(text_of(&rows[1]), "");
        assert_eq!(text_of(&rows[3]), "» Reconnected to the server.");
        assert_eq!(rows[3].spans[1].style, text_muted_style(palette.text_muted).add_modifier(Modifier::ITALIC));
    }

    #[test]
    fn long_lines_wrap_and_height_matches() {
        let mut buf = LineBuffer::new();
        let v = Viewport::default();
        buf.append_message(&"x".repeat(25), &v);
        buf.append_system("a notice that wraps", &v);
        let rows = output_lines(&buf, &ConsolePalette::default(), 10);
        let height: usize = buf.iter().map(|l| line_height(l, 10)).sum();
        assert_eq!(rows.len(), height);
        assert_eq!(text_of(&rows[2]), "xxxxx");
        assert!(text_of(&rows[4]).starts_with(LEFT_PADDING));
    }
}
