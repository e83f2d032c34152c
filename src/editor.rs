//! Line buffer - single-line edit state
//!
//! A string plus a byte-offset cursor, with two invariants maintained by
//! every operation: 0 <= cursor <= len, and the cursor always sits on a
//! char boundary. Movement and deletion step over whole characters, so
//! multi-byte command names (hosts may register any name) are safe to
//! recall and edit.

/// The visible line split around the cursor: text left of the cursor, the
/// character under it (`None` when the cursor sits at end of line), and
/// the text to its right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineView<'a> {
    pub left: &'a str,
    pub cursor: Option<char>,
    pub right: &'a str,
}

/// The in-progress input line
#[derive(Debug, Default)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte offset of the char boundary left of `pos`
    fn prev_boundary(&self, pos: usize) -> usize {
        self.text[..pos]
            .chars()
            .next_back()
            .map_or(0, |ch| pos - ch.len_utf8())
    }

    /// Byte offset of the char boundary right of `pos`
    fn next_boundary(&self, pos: usize) -> usize {
        self.text[pos..]
            .chars()
            .next()
            .map_or(pos, |ch| pos + ch.len_utf8())
    }

    /// Insert a character at the cursor and advance past it.
    /// Control characters are ignored.
    pub fn insert(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete the character left of the cursor. No-op at position 0.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = self.prev_boundary(self.cursor);
        self.text.remove(self.cursor);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary(self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary(self.cursor);
    }

    /// Replace the whole line, cursor at end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    /// Take the line out, leaving an empty buffer with cursor 0.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn view(&self) -> LineView<'_> {
        let cursor = self.text[self.cursor..].chars().next();
        let right = match cursor {
            Some(ch) => &self.text[self.cursor + ch.len_utf8()..],
            None => "",
        };
        LineView {
            left: &self.text[..self.cursor],
            cursor,
            right,
        }
    }
}
