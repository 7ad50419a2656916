//! Standalone connectives between matcher triples.

use std::sync::LazyLock;

use regex::Regex;

use super::Recognizer;
use crate::{
    buffer::TokenBuffer,
    keywords::{SEPARATORS, alternation, is_separator},
    scanner::Scanner,
    token::{Token, TokenKind},
};

/// Consumed text ending in a whitespace-preceded separator keyword.
static SEPARATOR_BEHIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:^|\s)(?:{})$", alternation(SEPARATORS)))
        .expect("separator pattern is valid")
});

/// Recognizes `and` / `or` between two matchers.
#[derive(Debug, Default)]
pub struct SeparatorRecognizer {
    /// Buffered keyword.
    buffer: TokenBuffer,
}

impl Recognizer for SeparatorRecognizer {
    fn name(&self) -> &'static str {
        "separator"
    }

    fn reset(&mut self, start: usize) {
        self.buffer.clear(start);
    }

    fn append(&mut self, next: char, _scanner: &Scanner<'_>) {
        self.buffer.append(next);
    }

    fn lock(&self, scanner: &Scanner<'_>) -> bool {
        is_separator(scanner.run())
            && scanner.test_behind(&SEPARATOR_BEHIND)
            && scanner.at_boundary()
    }

    fn consume(&self, scanner: &Scanner<'_>) -> Option<Token> {
        if is_separator(self.buffer.value()) && scanner.at_boundary() {
            self.buffer.token(TokenKind::Separator)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::test_support::{drive, scanner_after};

    #[test]
    fn consumes_keyword() {
        let token = drive(&mut SeparatorRecognizer::default(), "or x").unwrap();
        assert_eq!(token.kind, TokenKind::Separator);
        assert_eq!(token.value, "or");
    }

    #[test]
    fn locks_after_whitespace_only() {
        let recognizer = SeparatorRecognizer::default();

        let mut scanner = scanner_after("a = 1 AND b", "a = 1 ");
        scanner.mark();
        for _ in 0..3 {
            scanner.advance();
        }
        assert_eq!(scanner.run(), "AND");
        assert!(recognizer.lock(&scanner));

        let mut glued = scanner_after("xor", "x");
        glued.mark();
        glued.advance();
        glued.advance();
        assert!(!recognizer.lock(&glued));
    }

    #[test]
    fn declines_prefixes_of_longer_words() {
        let recognizer = SeparatorRecognizer::default();
        assert!(!recognizer.lock(&scanner_after("order", "or")));
    }
}
