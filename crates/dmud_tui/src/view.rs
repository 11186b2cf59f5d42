//! TUI view: header (fixed top), scrollback body, input + shortcuts (fixed bottom).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::layouts::{
    background_style, block_for_input_bordered, border_style, input_placeholder, main_splits_with_padding,
    render_header, rgb_to_color, shortcut_inner_rect, shortcut_line, text_muted_style, text_style, vertical_split,
    OutputLayout, ShortcutContext, INPUT_ICON,
};
use crate::state::{ConsoleState, Screen};

/// Draw the console or the runtime log screen depending on `state.screen`.
pub fn draw(frame: &mut Frame, state: &mut ConsoleState, area: Rect) {
    frame.render_widget(Block::default().style(background_style(state.palette.background)), area);
    match state.screen {
        Screen::DebugTraces => draw_debug_traces(frame, state, area),
        Screen::Main => draw_main(frame, state, area),
    }
}

/// Runtime logs screen: scrollable list of tracing output. Ctrl+D to close.
fn draw_debug_traces(frame: &mut Frame, state: &mut ConsoleState, area: Rect) {
    let palette = state.palette.clone();
    let block = Block::default()
        .title(" Runtime logs (Ctrl+D to close) ")
        .borders(Borders::ALL)
        .border_style(border_style(palette.border))
        .style(background_style(palette.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content_height = state.trace_lines.len();
    let viewport_height = inner.height as usize;
    let max_scroll = content_height.saturating_sub(viewport_height);
    state.trace_scroll = state.trace_scroll.min(max_scroll);
    let offset = max_scroll - state.trace_scroll;

    let lines: Vec<Line> = state
        .trace_lines
        .iter()
        .skip(offset)
        .take(viewport_height)
        .map(|s| Line::from(Span::styled(s.clone(), text_muted_style(palette.text_muted))))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_main(frame: &mut Frame, state: &mut ConsoleState, area: Rect) {
    let splits = main_splits_with_padding(area);

    // ---- Header (fixed at top) ----
    render_header(frame, splits.header, &state.palette, &state.endpoint, state.status);

    // ---- Body: scrollback ----
    let output = OutputLayout::new(splits.body);
    let width = output.inner.width as usize;
    let viewport_height = output.inner.height as usize;
    let content_height = state.rows(width).len();

    // state.scroll is rows up from the bottom (0 = newest output visible).
    let max_scroll = content_height.saturating_sub(viewport_height);
    state.scroll = state.scroll.min(max_scroll);
    state.last_content_height = content_height;
    state.last_viewport_height = viewport_height;
    state.last_content_width = width;
    let offset_from_top = max_scroll - state.scroll;

    let palette = &state.palette;
    if state.lines.is_empty() {
        let waiting = format!("Waiting for {}…", display_endpoint(&state.endpoint));
        let para = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(crate::layouts::HEADER_TITLE, text_style(palette.text))),
            Line::from(""),
            Line::from(Span::styled(waiting, text_muted_style(palette.text_muted))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(para, output.inner);
    } else {
        let visible: Vec<Line> = state
            .cached_rows
            .iter()
            .skip(offset_from_top)
            .take(viewport_height)
            .cloned()
            .collect();
        frame.render_widget(Paragraph::new(visible), output.inner);
    }

    if content_height > viewport_height && viewport_height > 0 {
        draw_scrollbar(frame, state, output.scrollbar, content_height, offset_from_top);
    }

    // ---- Footer: input block + shortcut ----
    let palette = &state.palette;
    let (input_rect, shortcut_rect) = vertical_split(splits.footer, 3);
    let block = block_for_input_bordered(palette, state.input_enabled);
    let inner = block.inner(input_rect);
    frame.render_widget(block, input_rect);

    let (icon_style, content_style) = if !state.input_enabled {
        (text_style(palette.text_disabled), text_style(palette.text_disabled))
    } else if state.input_buffer.is_empty() {
        (text_style(palette.accent), text_style(palette.text_placeholder))
    } else {
        (text_style(palette.accent), text_style(palette.text))
    };
    let content = if state.input_buffer.is_empty() {
        input_placeholder(state.input_enabled, state.status).to_string()
    } else {
        state.input_buffer.clone()
    };
    let input_line = Line::from(vec![
        Span::styled(INPUT_ICON.to_string(), icon_style),
        Span::styled(content, content_style),
    ]);
    frame.render_widget(Paragraph::new(input_line), inner);

    // Cursor: display width (unicode-width) for position
    let icon_width = INPUT_ICON.width();
    let before_cursor = &state.input_buffer[..state.input_cursor.min(state.input_buffer.len())];
    let cursor_col = (inner.x as usize + icon_width + before_cursor.width()).min((inner.x + inner.width) as usize);
    if inner.height > 0 {
        frame.set_cursor_position((cursor_col as u16, inner.y));
    }

    let ctx = ShortcutContext {
        input_enabled: state.input_enabled,
        input_has_text: !state.input_buffer.is_empty(),
        scrolled_up: state.is_scrolled_up(),
        note: Some(state.note.as_str()),
    };
    frame.render_widget(Paragraph::new(shortcut_line(palette, ctx)), shortcut_inner_rect(shortcut_rect));
}

/// Scrollbar thumb sits at the bottom when following output, at the top when
/// scrolled all the way back.
fn draw_scrollbar(frame: &mut Frame, state: &ConsoleState, rect: Rect, content_height: usize, offset_from_top: usize) {
    let palette = &state.palette;
    let viewport_height = rect.height as usize;
    let max_scroll = content_height.saturating_sub(viewport_height);
    let thumb_height = ((viewport_height * viewport_height).div_ceil(content_height.max(1))).max(1);
    let ratio = if max_scroll == 0 {
        1.0
    } else {
        offset_from_top as f64 / max_scroll as f64
    };
    let thumb_y = (ratio * viewport_height.saturating_sub(thumb_height) as f64).round() as u16;

    let track_style = Style::default().bg(rgb_to_color(palette.scrollbar_track));
    frame.render_widget(Block::default().style(track_style), rect);
    let thumb_rect = Rect {
        x: rect.x,
        y: rect.y + thumb_y,
        width: rect.width,
        height: thumb_height as u16,
    };
    let thumb_style = Style::default().bg(rgb_to_color(palette.scrollbar_thumb));
    frame.render_widget(Block::default().style(thumb_style), thumb_rect);
}

fn display_endpoint(endpoint: &str) -> &str {
    if endpoint.is_empty() { "the server" } else { endpoint }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmud_core::ConnectionState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &mut ConsoleState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, state, f.area())).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn empty_console_shows_waiting_message() {
        let mut s = ConsoleState::new();
        s.set_endpoint("ws://localhost:4000/ws".into());
        let screen = render(&mut s, 80, 16);
        assert!(screen.contains("dmud console"));
        assert!(screen.contains("Waiting for ws://localhost:4000/ws"));
        assert!(screen.contains("Connecting…"));
    }

    #[test]
    fn newest_output_visible_and_geometry_recorded() {
        let mut s = ConsoleState::new();
        s.set_status(ConnectionState::Connected);
        s.set_input_enabled(true);
        let text: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        s.append_output(&text.join("\n"));
        let screen = render(&mut s, 60, 16);
        assert!(screen.contains("line 49"));
        assert!(screen.contains("line 40"));
        assert!(!screen.contains("line 39"));
        assert_eq!(s.last_content_height, 50);
        assert_eq!(s.last_viewport_height, 10);
        assert!(screen.contains("Type a command…"));
    }

    #[test]
    fn scrolled_view_shows_older_rows() {
        let mut s = ConsoleState::new();
        let text: Vec<String> = (0..50).map(|i| format!("row-{i:02}")).collect();
        s.append_output(&text.join("\n"));
        render(&mut s, 60, 16);
        s.scroll_up(40);
        let screen = render(&mut s, 60, 16);
        assert!(screen.contains("row-00"));
        assert!(!screen.contains("row-49"));
    }

    #[test]
    fn debug_screen_lists_traces() {
        let mut s = ConsoleState::new();
        s.push_trace_line("INFO connection opened".into());
        s.toggle_screen();
        let screen = render(&mut s, 60, 10);
        assert!(screen.contains("Runtime logs"));
        assert!(screen.contains("INFO connection opened"));
    }
}
