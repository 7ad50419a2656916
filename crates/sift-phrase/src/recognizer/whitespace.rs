//! Runs of blank characters.

use super::Recognizer;
use crate::{
    buffer::TokenBuffer,
    scanner::Scanner,
    token::{Token, TokenKind},
};

/// Recognizes one or more whitespace characters.
#[derive(Debug, Default)]
pub struct WhitespaceRecognizer {
    /// Buffered whitespace.
    buffer: TokenBuffer,
}

impl Recognizer for WhitespaceRecognizer {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn reset(&mut self, start: usize) {
        self.buffer.clear(start);
    }

    fn append(&mut self, next: char, _scanner: &Scanner<'_>) {
        self.buffer.append(next);
    }

    fn lock(&self, scanner: &Scanner<'_>) -> bool {
        let run = scanner.run();
        !run.is_empty() && run.chars().all(char::is_whitespace)
    }

    fn consume(&self, scanner: &Scanner<'_>) -> Option<Token> {
        if scanner.ahead_is_whitespace() || !self.buffer.value().chars().all(char::is_whitespace)
        {
            return None;
        }
        self.buffer.token(TokenKind::Whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::test_support::{drive, scanner_after};

    #[test]
    fn consumes_whole_run() {
        let token = drive(&mut WhitespaceRecognizer::default(), "   ").unwrap();
        assert_eq!(token.value, "   ");
        assert_eq!(token.kind, TokenKind::Whitespace);
        assert_eq!(token.end, 2);
    }

    #[test]
    fn stops_before_text() {
        let token = drive(&mut WhitespaceRecognizer::default(), " \tx").unwrap();
        assert_eq!(token.value, " \t");
    }

    #[test]
    fn declines_words() {
        assert!(drive(&mut WhitespaceRecognizer::default(), "ab").is_none());
    }

    #[test]
    fn locks_only_on_blank_runs() {
        let recognizer = WhitespaceRecognizer::default();
        assert!(recognizer.lock(&scanner_after("  a", "  ")));
        assert!(!recognizer.lock(&scanner_after(" a", " a")));
        assert!(!recognizer.lock(&scanner_after("", "")));
    }
}
