//! Bounded scrollback of display lines.
//!
//! Server text is split into lines and appended; client notices go through
//! [LineBuffer::append_system]. Both paths evict the oldest lines once the
//! buffer holds more than [MAX_LINES], and both re-pin the viewport to the
//! bottom only when it was near the bottom before the batch.

use std::collections::VecDeque;

/// Maximum retained lines.
pub const MAX_LINES: usize = 1200;

/// Distance (in rows) from the bottom still treated as "following" output:
/// the last row may be partly hidden, anything more is a deliberate scroll.
pub const NEAR_BOTTOM_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Server text with visible content.
    Content,
    /// Server text that is empty or whitespace only.
    Blank,
    /// Client-generated notice.
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }
}

/// Scroll geometry of the output pane, in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Rows scrolled past at the top.
    pub scroll_top: usize,
    /// Total rendered rows.
    pub content_height: usize,
    /// Visible rows.
    pub viewport_height: usize,
}

impl Viewport {
    pub fn near_bottom(&self) -> bool {
        self.content_height
            .saturating_sub(self.scroll_top)
            .saturating_sub(self.viewport_height)
            < NEAR_BOTTOM_THRESHOLD
    }

    pub fn max_scroll_top(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll_top();
    }
}

/// Result of one append batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendOutcome {
    pub appended: usize,
    pub evicted: usize,
    /// The viewport was near the bottom before the batch; keep it pinned.
    pub pin_to_bottom: bool,
}

#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: VecDeque<Line>,
    max_lines: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINES)
    }

    pub fn with_capacity(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&Line> {
        self.lines.back()
    }

    /// Append server text. `\r\n` and `\r` count as newlines; empty segments
    /// are skipped while the buffer is still empty.
    pub fn append_message(&mut self, raw: &str, viewport: &Viewport) -> AppendOutcome {
        let pin_to_bottom = viewport.near_bottom();
        let text = raw.replace("\r\n", "\n").replace('\r', "\n");
        let mut appended = 0;
        for segment in text.split('\n') {
            if segment.is_empty() && self.lines.is_empty() {
                continue;
            }
            let line = if segment.trim().is_empty() {
                Line {
                    kind: LineKind::Blank,
                    text: String::new(),
                }
            } else {
                Line {
                    kind: LineKind::Content,
                    text: segment.to_string(),
                }
            };
            self.lines.push_back(line);
            appended += 1;
        }
        AppendOutcome {
            appended,
            evicted: self.evict(),
            pin_to_bottom,
        }
    }

    /// Append one client notice.
    pub fn append_system(&mut self, message: impl Into<String>, viewport: &Viewport) -> AppendOutcome {
        let pin_to_bottom = viewport.near_bottom();
        self.lines.push_back(Line {
            kind: LineKind::System,
            text: message.into(),
        });
        AppendOutcome {
            appended: 1,
            evicted: self.evict(),
            pin_to_bottom,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn evict(&mut self) -> usize {
        let over = self.lines.len().saturating_sub(self.max_lines);
        self.lines.drain(..over);
        over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottom() -> Viewport {
        Viewport::default()
    }

    fn texts(buf: &LineBuffer) -> Vec<&str> {
        buf.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn splits_and_normalises_line_endings() {
        let mut buf = LineBuffer::new();
        buf.append_message("one\r\ntwo\rthree\nfour", &bottom());
        assert_eq!(texts(&buf), vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn leading_empty_segment_dropped_on_empty_buffer() {
        let mut buf = LineBuffer::new();
        let out = buf.append_message("\nWelcome", &bottom());
        assert_eq!(texts(&buf), vec!["Welcome"]);
        assert_eq!(out.appended, 1);
    }

    #[test]
    fn leading_empty_segment_kept_when_buffer_has_lines() {
        let mut buf = LineBuffer::new();
        buf.append_message("first", &bottom());
        buf.append_message("\nsecond", &bottom());
        assert_eq!(buf.len(), 3);
        assert!(buf.iter().nth(1).unwrap().is_blank());
    }

    #[test]
    fn whitespace_segment_is_blank() {
        let mut buf = LineBuffer::new();
        buf.append_message("a\n   \nb", &bottom());
        let kinds: Vec<LineKind> = buf.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::Content, LineKind::Blank, LineKind::Content]);
    }

    #[test]
    fn trailing_newline_yields_blank_line() {
        let mut buf = LineBuffer::new();
        buf.append_message("prompt>\n", &bottom());
        assert_eq!(buf.len(), 2);
        assert!(buf.last().unwrap().is_blank());
    }

    #[test]
    fn never_exceeds_max_and_evicts_oldest() {
        let mut buf = LineBuffer::new();
        for i in 0..1300 {
            buf.append_message(&format!("line {i}"), &bottom());
            assert!(buf.len() <= MAX_LINES);
        }
        assert_eq!(buf.len(), MAX_LINES);
        assert_eq!(buf.iter().next().unwrap().text, "line 100");
        assert_eq!(buf.last().unwrap().text, "line 1299");
    }

    #[test]
    fn large_batch_is_trimmed_in_one_pass() {
        let mut buf = LineBuffer::with_capacity(5);
        let batch: Vec<String> = (0..8).map(|i| i.to_string()).collect();
        let out = buf.append_message(&batch.join("\n"), &bottom());
        assert_eq!(out.appended, 8);
        assert_eq!(out.evicted, 3);
        assert_eq!(texts(&buf), vec!["3", "4", "5", "6", "7"]);
    }

    #[test]
    fn system_lines_share_the_bound() {
        let mut buf = LineBuffer::with_capacity(3);
        buf.append_message("a\nb\nc", &bottom());
        let out = buf.append_system("Reconnected to the server.", &bottom());
        assert_eq!(out.evicted, 1);
        assert_eq!(buf.last().unwrap().kind, LineKind::System);
        assert_eq!(texts(&buf), vec!["b", "c", "Reconnected to the server."]);
    }

    #[test]
    fn near_bottom_checked_before_mutation() {
        let mut buf = LineBuffer::new();
        let scrolled_up = Viewport {
            scroll_top: 0,
            content_height: 200,
            viewport_height: 20,
        };
        assert!(!buf.append_message("x", &scrolled_up).pin_to_bottom);

        let following = Viewport {
            scroll_top: 179,
            content_height: 200,
            viewport_height: 20,
        };
        assert!(buf.append_system("note", &following).pin_to_bottom);
    }

    #[test]
    fn near_bottom_threshold_is_exclusive() {
        let at_threshold = Viewport {
            scroll_top: 78,
            content_height: 100,
            viewport_height: 20,
        };
        assert!(!at_threshold.near_bottom());
        let inside = Viewport {
            scroll_top: 79,
            ..at_threshold
        };
        assert!(inside.near_bottom());
    }

    #[test]
    fn one_page_up_is_not_near_bottom() {
        let paged_up = Viewport {
            scroll_top: 262,
            content_height: 300,
            viewport_height: 20,
        };
        let mut buf = LineBuffer::new();
        assert!(!buf.append_message("a goblin arrives", &paged_up).pin_to_bottom);
    }

    #[test]
    fn scroll_to_bottom_uses_max_offset() {
        let mut v = Viewport {
            scroll_top: 0,
            content_height: 50,
            viewport_height: 10,
        };
        v.scroll_to_bottom();
        assert_eq!(v.scroll_top, 40);
    }

    #[test]
    fn clear_discards_everything() {
        let mut buf = LineBuffer::new();
        buf.append_message("a\nb", &bottom());
        buf.append_system("note", &bottom());
        buf.clear();
        assert!(buf.is_empty());
    }
}
