//! The catch-all word recognizer.

use super::Recognizer;
use crate::{
    buffer::TokenBuffer,
    scanner::Scanner,
    token::{Token, TokenKind},
};

/// Recognizes any run of non-blank characters.
#[derive(Debug, Default)]
pub struct WordRecognizer {
    /// Buffered characters.
    buffer: TokenBuffer,
}

impl Recognizer for WordRecognizer {
    fn name(&self) -> &'static str {
        "word"
    }

    fn reset(&mut self, start: usize) {
        self.buffer.clear(start);
    }

    fn append(&mut self, next: char, _scanner: &Scanner<'_>) {
        self.buffer.append(next);
    }

    fn lock(&self, scanner: &Scanner<'_>) -> bool {
        let run = scanner.run();
        !run.is_empty() && !run.chars().any(char::is_whitespace)
    }

    fn consume(&self, scanner: &Scanner<'_>) -> Option<Token> {
        if !scanner.at_boundary() || self.buffer.value().chars().any(char::is_whitespace) {
            return None;
        }
        self.buffer.token(TokenKind::Word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::test_support::{drive, scanner_after};

    #[test]
    fn consumes_at_end_of_input() {
        let token = drive(&mut WordRecognizer::default(), "howler.anal").unwrap();
        assert_eq!(token.value, "howler.anal");
        assert_eq!((token.start, token.end), (0, 10));
    }

    #[test]
    fn consumes_before_space() {
        let token = drive(&mut WordRecognizer::default(), "rust async").unwrap();
        assert_eq!(token.value, "rust");
    }

    #[test]
    fn locks_on_non_blank_runs() {
        let recognizer = WordRecognizer::default();
        assert!(recognizer.lock(&scanner_after("ab", "a")));
        assert!(!recognizer.lock(&scanner_after(" ", " ")));
    }
}
