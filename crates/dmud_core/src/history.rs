//! Linear command history with a recall cursor.
//!
//! The cursor ranges over `0..=len`; `len` is the "new command" slot past the
//! last entry. Only explicit navigation moves it; editing the recalled text
//! does not.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward older entries (arrow up).
    Back,
    /// Toward newer entries and the empty slot (arrow down).
    Forward,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission and reset the cursor past the end.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        self.cursor = self.entries.len();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Current cursor; equals [History::len] in the new-command slot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_past_end(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// Move one step and return the text the input should show. `None` when
    /// there is no history (input left untouched).
    pub fn navigate(&mut self, direction: Direction) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let len = self.entries.len();
        self.cursor = match direction {
            Direction::Back => self.cursor.min(len).saturating_sub(1),
            Direction::Forward => (self.cursor + 1).min(len),
        };
        Some(self.entries.get(self.cursor).map_or("", String::as_str))
    }
}
