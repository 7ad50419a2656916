//! Character accumulator shared by every recognizer.

use crate::token::{Token, TokenKind};

/// An append-only run of characters anchored at a start offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBuffer {
    /// Character offset of the first buffered character.
    start: usize,
    /// Buffered text.
    value: String,
    /// Number of buffered characters.
    len: usize,
}

impl TokenBuffer {
    /// Creates an empty buffer anchored at `start`.
    pub fn new(start: usize) -> Self {
        Self {
            start,
            value: String::new(),
            len: 0,
        }
    }

    /// Creates a buffer anchored at `start` holding `initial`.
    pub fn with_value(start: usize, initial: &str) -> Self {
        Self {
            start,
            value: initial.to_string(),
            len: initial.chars().count(),
        }
    }

    /// Appends one character, extending `end`.
    pub fn append(&mut self, ch: char) {
        self.value.push(ch);
        self.len += 1;
    }

    /// The buffered text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Offset of the first character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Re-anchors the buffer without touching its contents.
    pub fn set_start(&mut self, start: usize) {
        self.start = start;
    }

    /// Offset of the last character, or `None` while empty.
    pub fn end(&self) -> Option<usize> {
        (self.len > 0).then(|| self.start + self.len - 1)
    }

    /// Truncates the buffer so its last character sits at `end`.
    ///
    /// An `end` before `start` empties the buffer; an `end` past the current end is ignored.
    pub fn set_end(&mut self, end: usize) {
        let keep = (end + 1).saturating_sub(self.start).min(self.len);
        if let Some((byte, _)) = self.value.char_indices().nth(keep) {
            self.value.truncate(byte);
        }
        self.len = keep;
    }

    /// Offset the next appended character will occupy.
    pub fn next_offset(&self) -> usize {
        self.start + self.len
    }

    /// Number of buffered characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been buffered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Empties the buffer and re-anchors it at `start`.
    pub fn clear(&mut self, start: usize) {
        self.start = start;
        self.value.clear();
        self.len = 0;
    }

    /// Materializes the buffer as a leaf token, or `None` when empty.
    pub fn token(&self, kind: TokenKind) -> Option<Token> {
        (!self.is_empty()).then(|| Token::new(kind, self.value.as_str(), self.start))
    }
}
