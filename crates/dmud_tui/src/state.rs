//! Console state: scrollback, input line, connection badge, palette.
//!
//! [ConsoleState] holds everything the view needs to render. Scroll is kept
//! as rows up from the bottom (0 = following new output); the near-bottom
//! rule from [dmud_core::Viewport] decides whether appends keep following.

use std::time::{Duration, Instant};

use dmud_core::input::NOTICE_CLEARED;
use dmud_core::{
    AppendOutcome, ConnectionState, ConsoleCommand, Direction, InputController, LineBuffer, Submission,
    ThemeRoot, Viewport,
};
use ratatui::text::Line;

use crate::layouts::{line_height, output_lines};
use crate::theme::ConsolePalette;
use crate::utils::{MAX_TRACE_LINES, PAGE_OVERLAP_LINES};

/// Transient footer notes clear after this long.
pub const NOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Which screen is currently shown (console vs runtime logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    DebugTraces,
}

#[derive(Debug)]
pub struct ConsoleState {
    /// Scrollback (server text and client notices).
    pub lines: LineBuffer,
    /// Submission routing and command history.
    pub input: InputController,
    /// Current input line (footer).
    pub input_buffer: String,
    /// Cursor position within input_buffer (byte offset, 0..=len).
    pub input_cursor: usize,
    /// False while no connection is open; Enter does nothing then.
    pub input_enabled: bool,
    pub status: ConnectionState,
    /// Resolved WebSocket endpoint shown in the header.
    pub endpoint: String,
    /// Rows scrolled up from the bottom.
    pub scroll: usize,
    pub palette: ConsolePalette,
    /// When true, next draw should run; cleared after draw.
    pub needs_redraw: bool,
    /// Wrapped rows for the current width; rebuilt when dirty.
    pub cached_rows: Vec<Line<'static>>,
    pub cache_dirty: bool,
    /// Width the cache was built for.
    pub cached_width: usize,
    /// Rows and viewport size from the previous draw.
    pub last_content_height: usize,
    pub last_viewport_height: usize,
    pub last_content_width: usize,
    /// Transient footer note (e.g. "Reconnecting…").
    pub note: String,
    pub note_set_at: Option<Instant>,
    pub screen: Screen,
    /// Runtime log lines for the debug screen. Newest at end.
    pub trace_lines: Vec<String>,
    /// Scroll offset for the debug screen (lines up from the newest).
    pub trace_scroll: usize,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            lines: LineBuffer::new(),
            input: InputController::new(),
            input_buffer: String::new(),
            input_cursor: 0,
            input_enabled: false,
            status: ConnectionState::Connecting,
            endpoint: String::new(),
            scroll: 0,
            palette: ConsolePalette::default(),
            needs_redraw: true,
            cached_rows: Vec::new(),
            cache_dirty: true,
            cached_width: 0,
            last_content_height: 0,
            last_viewport_height: 0,
            last_content_width: 0,
            note: String::new(),
            note_set_at: None,
            screen: Screen::Main,
            trace_lines: Vec::new(),
            trace_scroll: 0,
        }
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll geometry as of the last draw, in the top-offset form the line
    /// buffer expects.
    pub fn viewport(&self) -> Viewport {
        let max_scroll = self.last_content_height.saturating_sub(self.last_viewport_height);
        Viewport {
            scroll_top: max_scroll.saturating_sub(self.scroll),
            content_height: self.last_content_height,
            viewport_height: self.last_viewport_height,
        }
    }

    pub fn is_scrolled_up(&self) -> bool {
        self.scroll > 0
    }

    /// Append server text.
    pub fn append_output(&mut self, raw: &str) {
        let viewport = self.viewport();
        let outcome = self.lines.append_message(raw, &viewport);
        self.after_append(outcome);
    }

    /// Append a client notice.
    pub fn append_notice(&mut self, message: &str) {
        let viewport = self.viewport();
        let outcome = self.lines.append_system(message, &viewport);
        self.after_append(outcome);
    }

    fn after_append(&mut self, outcome: AppendOutcome) {
        let rows = self.rows_of_last(outcome.appended);
        if outcome.pin_to_bottom {
            self.scroll = 0;
        } else {
            self.scroll = self.scroll.saturating_add(rows);
        }
        // Evicted rows are accounted for on the next draw.
        self.last_content_height = self.last_content_height.saturating_add(rows);
        self.cache_dirty = true;
        self.needs_redraw = true;
    }

    fn rows_of_last(&self, count: usize) -> usize {
        let width = self.last_content_width;
        let skip = self.lines.len().saturating_sub(count);
        self.lines
            .iter()
            .skip(skip)
            .map(|line| line_height(line, width))
            .sum()
    }

    /// Drop all output and note it with a single system line.
    pub fn clear_output(&mut self) {
        self.lines.clear();
        self.scroll = 0;
        self.last_content_height = 0;
        self.append_notice(NOTICE_CLEARED);
    }

    /// Submit the input line. Returns the command to forward to the runtime,
    /// if any. Does nothing while input is disabled or the line is blank.
    pub fn submit(&mut self) -> Option<ConsoleCommand> {
        if !self.input_enabled || self.input_buffer.trim().is_empty() {
            return None;
        }
        let value = self.input_take();
        match self.input.submit(&value) {
            Submission::Ignored => None,
            Submission::Clear => {
                self.clear_output();
                None
            }
            Submission::Send(text) => Some(ConsoleCommand::Submit(text)),
        }
    }

    /// Step through history; the input is replaced and the cursor moved to the end.
    pub fn navigate_history(&mut self, direction: Direction) {
        if let Some(text) = self.input.navigate(direction) {
            self.input_buffer = text;
            self.input_cursor = self.input_buffer.len();
            self.needs_redraw = true;
        }
    }

    pub fn set_status(&mut self, status: ConnectionState) {
        self.status = status;
        self.needs_redraw = true;
    }

    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.needs_redraw = true;
    }

    pub fn set_endpoint(&mut self, endpoint: String) {
        self.endpoint = endpoint;
        self.needs_redraw = true;
    }

    /// Rebuild the palette from a resolved theme.
    pub fn apply_theme(&mut self, root: &ThemeRoot) {
        self.palette = ConsolePalette::from_root(root);
        self.cache_dirty = true;
        self.needs_redraw = true;
    }

    /// Show a transient note in the footer.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
        self.note_set_at = Some(Instant::now());
        self.needs_redraw = true;
    }

    /// Clear the note once it is older than [NOTE_TIMEOUT].
    pub fn expire_note(&mut self, now: Instant) {
        if let Some(set_at) = self.note_set_at
            && now.saturating_duration_since(set_at) > NOTE_TIMEOUT
        {
            self.note.clear();
            self.note_set_at = None;
            self.needs_redraw = true;
        }
    }

    /// Wrapped rows for `width`, rebuilt only when the buffer, palette or width changed.
    pub fn rows(&mut self, width: usize) -> &[Line<'static>] {
        if self.cache_dirty || self.cached_width != width {
            self.cached_rows = output_lines(&self.lines, &self.palette, width);
            self.cached_width = width;
            self.cache_dirty = false;
        }
        &self.cached_rows
    }

    /// Input buffer: insert character at cursor.
    pub fn input_insert(&mut self, c: char) {
        self.input_buffer.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
        self.needs_redraw = true;
    }

    /// Input buffer: delete character before cursor (UTF-8 safe).
    pub fn input_backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let start = self.prev_boundary();
        self.input_buffer.drain(start..self.input_cursor);
        self.input_cursor = start;
        self.needs_redraw = true;
    }

    /// Input buffer: delete character at cursor (forward delete, UTF-8 safe).
    pub fn input_delete(&mut self) {
        if self.input_cursor >= self.input_buffer.len() {
            return;
        }
        let end = self.next_boundary();
        self.input_buffer.drain(self.input_cursor..end);
        self.needs_redraw = true;
    }

    pub fn input_cursor_left(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        self.input_cursor = self.prev_boundary();
        self.needs_redraw = true;
    }

    pub fn input_cursor_right(&mut self) {
        if self.input_cursor >= self.input_buffer.len() {
            return;
        }
        self.input_cursor = self.next_boundary();
        self.needs_redraw = true;
    }

    pub fn input_cursor_home(&mut self) {
        self.input_cursor = 0;
        self.needs_redraw = true;
    }

    /// Cursor to end of input; with an empty input also jump to the newest output.
    pub fn input_cursor_end(&mut self) {
        self.input_cursor = self.input_buffer.len();
        if self.input_buffer.is_empty() {
            self.scroll = 0;
        }
        self.needs_redraw = true;
    }

    /// Clear entire input buffer (Esc, Ctrl+U).
    pub fn input_clear_line(&mut self) {
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.needs_redraw = true;
    }

    /// Delete from cursor to end of line (Ctrl+K).
    pub fn input_kill_to_end(&mut self) {
        self.input_buffer.truncate(self.input_cursor);
        self.needs_redraw = true;
    }

    /// Input buffer: clear and return current line.
    pub fn input_take(&mut self) -> String {
        let line = std::mem::take(&mut self.input_buffer);
        self.input_cursor = 0;
        self.needs_redraw = true;
        line
    }

    fn prev_boundary(&self) -> usize {
        let mut start = self.input_cursor - 1;
        while start > 0 && !self.input_buffer.is_char_boundary(start) {
            start -= 1;
        }
        start
    }

    fn next_boundary(&self) -> usize {
        let mut end = self.input_cursor + 1;
        while end < self.input_buffer.len() && !self.input_buffer.is_char_boundary(end) {
            end += 1;
        }
        end
    }

    /// Scroll towards older output.
    pub fn scroll_up(&mut self, delta: usize) {
        let max_scroll = self.last_content_height.saturating_sub(self.last_viewport_height);
        self.scroll = self.scroll.saturating_add(delta).min(max_scroll);
        self.needs_redraw = true;
    }

    /// Scroll towards newer output.
    pub fn scroll_down(&mut self, delta: usize) {
        self.scroll = self.scroll.saturating_sub(delta);
        self.needs_redraw = true;
    }

    fn page_rows(&self) -> usize {
        self.last_viewport_height.saturating_sub(PAGE_OVERLAP_LINES).max(1)
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_rows());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_rows());
    }

    /// Append a line to the debug trace buffer. Drops oldest if over capacity.
    pub fn push_trace_line(&mut self, line: String) {
        self.trace_lines.push(line);
        if self.trace_lines.len() > MAX_TRACE_LINES {
            self.trace_lines.drain(0..self.trace_lines.len() - MAX_TRACE_LINES);
        }
        self.needs_redraw = true;
    }

    pub fn trace_scroll_up(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_add(delta);
        self.needs_redraw = true;
    }

    pub fn trace_scroll_down(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_sub(delta);
        self.needs_redraw = true;
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Main => Screen::DebugTraces,
            Screen::DebugTraces => Screen::Main,
        };
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmud_core::LineKind;

    fn connected() -> ConsoleState {
        let mut s = ConsoleState::new();
        s.set_input_enabled(true);
        s.set_status(ConnectionState::Connected);
        s
    }

    fn type_line(s: &mut ConsoleState, text: &str) {
        for c in text.chars() {
            s.input_insert(c);
        }
    }

    /// Pretend a draw happened with `content` rows in a `viewport`-row pane.
    fn drawn(s: &mut ConsoleState, content: usize, viewport: usize) {
        s.last_content_height = content;
        s.last_viewport_height = viewport;
        s.last_content_width = 80;
    }

    #[test]
    fn input_insert_utf8_emoji() {
        let mut s = ConsoleState::new();
        s.input_insert('é');
        s.input_insert('🎉');
        assert_eq!(s.input_buffer, "é🎉");
        assert_eq!(s.input_cursor, "é🎉".len());
    }

    #[test]
    fn input_backspace_at_end() {
        let mut s = ConsoleState::new();
        s.input_buffer = "hi".to_string();
        s.input_cursor = 2;
        s.input_backspace();
        assert_eq!(s.input_buffer, "h");
        assert_eq!(s.input_cursor, 1);
    }

    #[test]
    fn input_backspace_at_zero_no_op() {
        let mut s = ConsoleState::new();
        s.input_buffer = "x".to_string();
        s.input_backspace();
        assert_eq!(s.input_buffer, "x");
    }

    #[test]
    fn input_cursor_multibyte() {
        let mut s = ConsoleState::new();
        s.input_insert('你');
        s.input_insert('好');
        s.input_cursor_left();
        assert_eq!(s.input_cursor, "你".len());
        s.input_cursor_left();
        assert_eq!(s.input_cursor, 0);
        s.input_cursor_right();
        assert_eq!(s.input_cursor, "你".len());
    }

    #[test]
    fn input_delete_multibyte() {
        let mut s = ConsoleState::new();
        s.input_buffer = "你好".to_string();
        s.input_delete();
        assert_eq!(s.input_buffer, "好");
    }

    #[test]
    fn input_kill_to_end() {
        let mut s = ConsoleState::new();
        s.input_buffer = "look north".to_string();
        s.input_cursor = 4;
        s.input_kill_to_end();
        assert_eq!(s.input_buffer, "look");
    }

    #[test]
    fn submit_sends_verbatim_and_records_history() {
        let mut s = connected();
        type_line(&mut s, " say hi ");
        assert_eq!(s.submit(), Some(ConsoleCommand::Submit(" say hi ".to_string())));
        assert!(s.input_buffer.is_empty());
        assert_eq!(s.input.history().entries(), [" say hi "]);
    }

    #[test]
    fn submit_blank_keeps_input() {
        let mut s = connected();
        type_line(&mut s, "   ");
        assert_eq!(s.submit(), None);
        assert_eq!(s.input_buffer, "   ");
        assert!(s.input.history().is_empty());
    }

    #[test]
    fn submit_while_disabled_does_nothing() {
        let mut s = ConsoleState::new();
        type_line(&mut s, "look");
        assert_eq!(s.submit(), None);
        assert_eq!(s.input_buffer, "look");
        assert!(s.input.history().is_empty());
    }

    #[test]
    fn clear_command_clears_and_notes_once() {
        let mut s = connected();
        s.append_output("one\ntwo\nthree");
        type_line(&mut s, "/CLEAR");
        assert_eq!(s.submit(), None);
        assert_eq!(s.lines.len(), 1);
        let line = s.lines.last().unwrap();
        assert_eq!(line.kind, LineKind::System);
        assert_eq!(line.text, "Cleared output.");
        assert_eq!(s.input.history().entries(), ["/CLEAR"]);
    }

    #[test]
    fn history_navigation_fills_input() {
        let mut s = connected();
        type_line(&mut s, "north");
        s.submit();
        type_line(&mut s, "south");
        s.submit();
        s.navigate_history(Direction::Back);
        assert_eq!(s.input_buffer, "south");
        assert_eq!(s.input_cursor, 5);
        s.navigate_history(Direction::Back);
        s.navigate_history(Direction::Back);
        assert_eq!(s.input_buffer, "north");
        s.navigate_history(Direction::Forward);
        s.navigate_history(Direction::Forward);
        assert_eq!(s.input_buffer, "");
    }

    #[test]
    fn history_on_empty_leaves_input() {
        let mut s = connected();
        type_line(&mut s, "draft");
        s.navigate_history(Direction::Back);
        assert_eq!(s.input_buffer, "draft");
    }

    #[test]
    fn append_near_bottom_stays_pinned() {
        let mut s = ConsoleState::new();
        drawn(&mut s, 100, 20);
        s.scroll = 1;
        s.append_output("new line");
        assert_eq!(s.scroll, 0);
    }

    #[test]
    fn page_up_survives_new_output() {
        let mut s = ConsoleState::new();
        drawn(&mut s, 300, 20);
        s.page_up();
        assert_eq!(s.scroll, 18);
        s.append_output("a goblin arrives");
        assert_eq!(s.scroll, 19);
        s.append_notice("Reconnected to the server.");
        assert_eq!(s.scroll, 20);
    }

    #[test]
    fn wheel_scroll_survives_new_output() {
        let mut s = ConsoleState::new();
        drawn(&mut s, 300, 20);
        s.scroll_up(crate::utils::WHEEL_SCROLL_LINES);
        s.append_output("x");
        assert_eq!(s.scroll, crate::utils::WHEEL_SCROLL_LINES + 1);
    }

    #[test]
    fn append_when_scrolled_up_keeps_view() {
        let mut s = ConsoleState::new();
        drawn(&mut s, 100, 20);
        s.scroll = 50;
        s.append_output("a\nb\nc");
        assert_eq!(s.scroll, 53);
        s.append_notice("note");
        assert_eq!(s.scroll, 54);
    }

    #[test]
    fn scroll_up_is_clamped_and_down_returns_to_bottom() {
        let mut s = ConsoleState::new();
        drawn(&mut s, 30, 20);
        s.scroll_up(100);
        assert_eq!(s.scroll, 10);
        assert!(s.is_scrolled_up());
        s.scroll_down(100);
        assert_eq!(s.scroll, 0);
    }

    #[test]
    fn page_moves_by_viewport() {
        let mut s = ConsoleState::new();
        drawn(&mut s, 200, 20);
        s.page_up();
        assert_eq!(s.scroll, 18);
        s.page_down();
        assert_eq!(s.scroll, 0);
    }

    #[test]
    fn end_on_empty_input_jumps_to_latest() {
        let mut s = ConsoleState::new();
        drawn(&mut s, 200, 20);
        s.scroll = 40;
        s.input_cursor_end();
        assert_eq!(s.scroll, 0);
    }

    #[test]
    fn theme_updates_palette() {
        let mut s = ConsoleState::new();
        let mut root = ThemeRoot::new();
        root.set_property("--mud-accent", "#00ff00");
        s.cache_dirty = false;
        s.apply_theme(&root);
        assert_eq!(s.palette.accent, crate::theme::Rgb(0, 255, 0));
        assert!(s.cache_dirty);
    }

    #[test]
    fn note_expires() {
        let mut s = ConsoleState::new();
        s.set_note("Reconnecting…");
        let set_at = s.note_set_at.unwrap();
        s.expire_note(set_at + Duration::from_secs(1));
        assert_eq!(s.note, "Reconnecting…");
        s.expire_note(set_at + NOTE_TIMEOUT + Duration::from_millis(1));
        assert!(s.note.is_empty());
    }

    #[test]
    fn rows_cache_tracks_width() {
        let mut s = ConsoleState::new();
        s.append_output(&"x".repeat(30));
        assert_eq!(s.rows(80).len(), 1);
        assert_eq!(s.rows(10).len(), 3);
        assert!(!s.cache_dirty);
    }

    #[test]
    fn trace_lines_capped() {
        let mut s = ConsoleState::new();
        for i in 0..2500 {
            s.push_trace_line(format!("line {i}"));
        }
        assert_eq!(s.trace_lines.len(), MAX_TRACE_LINES);
        assert_eq!(s.trace_lines[0], "line 500");
    }

    #[test]
    fn toggle_screen_flips() {
        let mut s = ConsoleState::new();
        s.toggle_screen();
        assert_eq!(s.screen, Screen::DebugTraces);
        s.toggle_screen();
        assert_eq!(s.screen, Screen::Main);
    }
}
