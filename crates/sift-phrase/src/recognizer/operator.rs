//! Boolean keywords of the field-query grammar.

use super::Recognizer;
use crate::{
    buffer::TokenBuffer,
    keywords::is_boolean_operator,
    scanner::Scanner,
    token::{Token, TokenKind},
};

/// Recognizes `AND`, `OR`, `NOT` and their symbolic forms as standalone words.
#[derive(Debug, Default)]
pub struct BooleanOperatorRecognizer {
    /// Buffered keyword.
    buffer: TokenBuffer,
}

impl Recognizer for BooleanOperatorRecognizer {
    fn name(&self) -> &'static str {
        "operator"
    }

    fn reset(&mut self, start: usize) {
        self.buffer.clear(start);
    }

    fn append(&mut self, next: char, _scanner: &Scanner<'_>) {
        self.buffer.append(next);
    }

    fn lock(&self, scanner: &Scanner<'_>) -> bool {
        is_boolean_operator(scanner.run()) && scanner.at_boundary()
    }

    fn consume(&self, scanner: &Scanner<'_>) -> Option<Token> {
        if is_boolean_operator(self.buffer.value()) && scanner.at_boundary() {
            self.buffer.token(TokenKind::Operator)
        } else {
            None
        }
    }
}
