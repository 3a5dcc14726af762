//! The editable source document
//!
//! Text plus a cursor kept on a char boundary. Line/column helpers are 0-based;
//! they only feed the editor pane.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceDocument {
    text: String,
    /// Byte offset into `text`
    cursor: usize,
}

impl SourceDocument {
    /// New document with the cursor at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        SourceDocument { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole content
    pub fn replace(&mut self, text: impl Into<String>) {
        *self = SourceDocument::new(text);
    }

    pub fn clear(&mut self) {
        self.replace(String::new());
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    /// Delete the char under the cursor
    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.text[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, column);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            self.cursor = end;
            return;
        }
        let column = self.text[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        self.cursor = self.offset_in_line(end + 1, column);
    }

    /// (line, column) of the cursor, 0-based, column in chars
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let column = before[self.line_start(self.cursor)..].chars().count();
        (line, column)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn line_start(&self, offset: usize) -> usize {
        self.text[..offset].rfind('\n').map_or(0, |idx| idx + 1)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.text[offset..]
            .find('\n')
            .map_or(self.text.len(), |idx| offset + idx)
    }

    /// Byte offset of `column` chars into the line starting at `start`, clamped to the line
    fn offset_in_line(&self, start: usize, column: usize) -> usize {
        let end = self.line_end(start);
        self.text[start..end]
            .char_indices()
            .nth(column)
            .map_or(end, |(idx, _)| start + idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut doc = SourceDocument::default();
        for c in "let x;".chars() {
            doc.insert_char(c);
        }
        doc.backspace();
        assert_eq!(doc.text(), "let x");
        assert_eq!(doc.cursor(), 5);
    }

    #[test]
    fn test_multibyte_navigation() {
        let mut doc = SourceDocument::new("é→x");
        doc.move_left();
        doc.move_left();
        doc.delete();
        assert_eq!(doc.text(), "éx");
        doc.backspace();
        assert_eq!(doc.text(), "x");
        assert_eq!(doc.cursor(), 0);
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut doc = SourceDocument::new("let value = 1;\nx;\nprint value;");
        assert_eq!(doc.cursor_position(), (2, 12));

        doc.move_up();
        assert_eq!(doc.cursor_position(), (1, 2));

        doc.move_up();
        assert_eq!(doc.cursor_position(), (0, 2));

        doc.move_down();
        doc.move_down();
        assert_eq!(doc.cursor_position(), (2, 2));
    }

    #[test]
    fn test_home_end() {
        let mut doc = SourceDocument::new("a\nbcd");
        doc.move_home();
        assert_eq!(doc.cursor_position(), (1, 0));
        doc.move_up();
        doc.move_end();
        assert_eq!(doc.cursor_position(), (0, 1));
    }

    #[test]
    fn test_replace_moves_cursor_to_end() {
        let mut doc = SourceDocument::new("old");
        doc.move_home();
        doc.replace("print 42;");
        assert_eq!(doc.cursor(), "print 42;".len());
    }
}
