//! `field:value` terms of the field-query grammar.

use super::Recognizer;
use crate::{
    buffer::TokenBuffer,
    scanner::Scanner,
    token::{Token, TokenKind, closes_phrase},
};

/// Which part of the term the next character belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Context {
    /// Before the `:`.
    #[default]
    Field,
    /// Right after the `:`.
    Delimiter,
    /// After the first value character.
    Value,
}

/// Recognizes `field:value` and `field:"quoted value"`.
///
/// A single value ends at whitespace or end of input. A quoted value ends at its unescaped
/// closing quote; until then it absorbs whitespace, and at end of input it is flushed
/// unterminated.
#[derive(Debug, Default)]
pub struct FieldTermRecognizer {
    /// Current state.
    context: Context,
    /// Whether the value opened with a quote.
    phrase: bool,
    /// Field name.
    field: TokenBuffer,
    /// The `:`.
    delimiter: TokenBuffer,
    /// Value, quotes included.
    value: TokenBuffer,
}

impl FieldTermRecognizer {
    /// Whether the buffered value is complete at this position.
    fn value_complete(&self, scanner: &Scanner<'_>) -> bool {
        if scanner.ahead_is_empty() {
            return true;
        }
        if self.phrase {
            closes_phrase(self.value.value())
        } else {
            scanner.ahead_is_whitespace()
        }
    }

    /// Builds the composite token from the non-empty parts.
    fn term(&self) -> Option<Token> {
        let children = [
            self.field.token(TokenKind::Field),
            self.delimiter.token(TokenKind::Delimiter),
            self.value.token(TokenKind::Value),
        ]
        .into_iter()
        .flatten()
        .collect();
        Token::composite(TokenKind::Term, children)
    }
}

impl Recognizer for FieldTermRecognizer {
    fn name(&self) -> &'static str {
        "field"
    }

    fn reset(&mut self, start: usize) {
        self.context = Context::Field;
        self.phrase = false;
        self.field.clear(start);
        self.delimiter.clear(start);
        self.value.clear(start);
    }

    fn append(&mut self, next: char, _scanner: &Scanner<'_>) {
        match self.context {
            Context::Field if next == ':' => {
                self.delimiter.clear(self.field.next_offset());
                self.delimiter.append(next);
                self.context = Context::Delimiter;
            }
            Context::Field => self.field.append(next),
            Context::Delimiter => {
                self.value.clear(self.delimiter.next_offset());
                self.phrase = next == '"';
                self.value.append(next);
                self.context = Context::Value;
            }
            Context::Value => self.value.append(next),
        }
    }

    fn lock(&self, scanner: &Scanner<'_>) -> bool {
        let run = scanner.run();
        !run.is_empty()
            && !run.chars().any(char::is_whitespace)
            && scanner.ahead_starts_with_any(&[":"])
    }

    fn consume(&self, scanner: &Scanner<'_>) -> Option<Token> {
        let complete = match self.context {
            Context::Field => false,
            Context::Delimiter => scanner.at_boundary(),
            Context::Value => self.value_complete(scanner),
        };
        if complete { self.term() } else { None }
    }
}
