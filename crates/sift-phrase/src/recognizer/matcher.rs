//! `column operator value` triples of the matcher-phrase grammar.

use std::{mem, sync::LazyLock};

use regex::Regex;

use super::Recognizer;
use crate::{
    buffer::TokenBuffer,
    keywords::{SEPARATORS, alternation, is_matcher_operator},
    scanner::Scanner,
    token::{QuoteState, Token, TokenKind},
};

/// Remaining text that starts with a whitespace-delimited separator keyword.
static SEPARATOR_AHEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^\s+(?:{})(?:\s|$)", alternation(SEPARATORS)))
        .expect("separator pattern is valid")
});

/// Splits a matcher span into its groups. Always matches, so the split is lossless.
static SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(\S*)(\s*)(\S*)(\s*)(.*?)(\s*)$").expect("split pattern is valid")
});

/// Kinds of the [`SPLIT`] capture groups, in order.
const GROUP_KINDS: [TokenKind; 6] = [
    TokenKind::Column,
    TokenKind::Whitespace,
    TokenKind::Comparator,
    TokenKind::Whitespace,
    TokenKind::Value,
    TokenKind::Whitespace,
];

/// How far a buffered run has progressed through `column operator value`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Reading the column.
    #[default]
    Column,
    /// Whitespace after the column.
    AfterColumn,
    /// Reading the second word, which must be an operator.
    Operator,
    /// Whitespace after a valid operator.
    AfterOperator,
    /// At least one value character has been read.
    Value,
    /// The second word was not an operator, so the run only completes at end of input.
    NoOperator,
}

/// Recognizes a matcher triple. Partial triples (still being typed) are emitted at end of
/// input with whatever groups are present.
///
/// Progress and quoting are tracked as characters arrive, so [`Recognizer::consume`] does
/// not rescan the buffer.
#[derive(Debug, Default)]
pub struct MatcherRecognizer {
    /// Buffered triple.
    buffer: TokenBuffer,
    /// Progress through the triple.
    stage: Stage,
    /// Second word while it is being read.
    operator: String,
    /// Quotes seen so far.
    quotes: QuoteState,
}

impl MatcherRecognizer {
    /// Advances the stage over `next`.
    fn advance_stage(&mut self, next: char) {
        let blank = next.is_whitespace();
        self.stage = match (self.stage, blank) {
            (Stage::Column, true) => Stage::AfterColumn,
            (Stage::AfterColumn, false) => {
                self.operator.push(next);
                Stage::Operator
            }
            (Stage::Operator, false) => {
                self.operator.push(next);
                Stage::Operator
            }
            (Stage::Operator, true) => {
                if is_matcher_operator(&mem::take(&mut self.operator)) {
                    Stage::AfterOperator
                } else {
                    Stage::NoOperator
                }
            }
            (Stage::AfterOperator, false) => Stage::Value,
            (stage, _) => stage,
        };
    }
}

/// Decomposes a matcher span starting at `start` into child tokens.
fn split(text: &str, start: usize) -> Vec<Token> {
    let Some(captures) = SPLIT.captures(text) else {
        return vec![Token::new(TokenKind::Value, text, start)];
    };
    GROUP_KINDS
        .iter()
        .enumerate()
        .filter_map(|(index, &kind)| {
            let group = captures.get(index + 1)?;
            if group.is_empty() {
                return None;
            }
            let offset = start + text[..group.start()].chars().count();
            Some(Token::new(kind, group.as_str(), offset))
        })
        .collect()
}

impl Recognizer for MatcherRecognizer {
    fn name(&self) -> &'static str {
        "matcher"
    }

    fn reset(&mut self, start: usize) {
        self.buffer.clear(start);
        self.stage = Stage::Column;
        self.operator.clear();
        self.quotes = QuoteState::default();
    }

    fn append(&mut self, next: char, _scanner: &Scanner<'_>) {
        self.buffer.append(next);
        self.advance_stage(next);
        self.quotes.push(next);
    }

    fn lock(&self, scanner: &Scanner<'_>) -> bool {
        scanner
            .run()
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace())
    }

    fn consume(&self, scanner: &Scanner<'_>) -> Option<Token> {
        if self.buffer.is_empty() {
            return None;
        }
        let complete = scanner.ahead_is_empty()
            || (self.stage == Stage::Value
                && self.quotes.is_balanced()
                && scanner.test_ahead(&SEPARATOR_AHEAD));
        if !complete {
            return None;
        }
        Token::composite(
            TokenKind::Matcher,
            split(self.buffer.value(), self.buffer.start()),
        )
    }
}
