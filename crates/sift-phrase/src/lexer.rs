//! Query-phrase lexer.
//!
//! Runs an ordered list of [`Recognizer`]s over the input in one pass and returns a lossless
//! token list.
//!
//! # Precedence
//!
//! A grammar lists its recognizers most specific first. At the start of a run the first
//! recognizer whose `lock` holds becomes active (the last one is the fallback). After every
//! later character only recognizers registered *before* the active one are consulted, so a
//! specific grammar can pre-empt the generic word/whitespace fallback mid-run but never the
//! other way around.
//!
//! # End of input
//!
//! The active recognizer gets a final `consume` with nothing ahead. If it declines, the other
//! recognizers are seeded with the pending run and tried in order; if they all decline the run
//! is emitted as a [`TokenKind::Word`]. Input is never dropped.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    recognizer::{
        BooleanOperatorRecognizer, FieldTermRecognizer, MatcherRecognizer, Recognizer,
        SeparatorRecognizer, WhitespaceRecognizer, WordRecognizer,
    },
    scanner::Scanner,
    token::{Token, TokenKind},
};

/// Factory for the ordered recognizer list of one grammar.
///
/// Implement this to plug a custom grammar into [`Lexer::new`].
pub trait Grammar {
    /// Which built-in grammar this is, for display and configuration.
    fn kind(&self) -> GrammarKind;

    /// Recognizers in precedence order, most specific first.
    fn recognizers(&self) -> Vec<Box<dyn Recognizer>>;
}

/// Plain whitespace-separated words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordGrammar;

impl Grammar for WordGrammar {
    fn kind(&self) -> GrammarKind {
        GrammarKind::Word
    }

    fn recognizers(&self) -> Vec<Box<dyn Recognizer>> {
        vec![
            Box::new(WordRecognizer::default()),
            Box::new(WhitespaceRecognizer::default()),
        ]
    }
}

/// Boolean `field:value` queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldQueryGrammar;

impl Grammar for FieldQueryGrammar {
    fn kind(&self) -> GrammarKind {
        GrammarKind::Field
    }

    fn recognizers(&self) -> Vec<Box<dyn Recognizer>> {
        vec![
            Box::new(FieldTermRecognizer::default()),
            Box::new(BooleanOperatorRecognizer::default()),
            Box::new(WordRecognizer::default()),
            Box::new(WhitespaceRecognizer::default()),
        ]
    }
}

/// `column operator value` triples joined by `and` / `or`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatcherPhraseGrammar;

impl Grammar for MatcherPhraseGrammar {
    fn kind(&self) -> GrammarKind {
        GrammarKind::Matcher
    }

    fn recognizers(&self) -> Vec<Box<dyn Recognizer>> {
        vec![
            Box::new(SeparatorRecognizer::default()),
            Box::new(MatcherRecognizer::default()),
            Box::new(WhitespaceRecognizer::default()),
        ]
    }
}

/// The built-in grammars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarKind {
    /// [`WordGrammar`].
    #[default]
    Word,
    /// [`FieldQueryGrammar`].
    Field,
    /// [`MatcherPhraseGrammar`].
    Matcher,
}

impl GrammarKind {
    /// All grammars, in display order.
    pub const ALL: [Self; 3] = [Self::Word, Self::Field, Self::Matcher];

    /// Lowercase name as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Field => "field",
            Self::Matcher => "matcher",
        }
    }

    /// Builds a lexer for this grammar.
    pub fn lexer(self) -> Lexer {
        match self {
            Self::Word => Lexer::new(&WordGrammar),
            Self::Field => Lexer::new(&FieldQueryGrammar),
            Self::Matcher => Lexer::new(&MatcherPhraseGrammar),
        }
    }
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrammarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown grammar: {s} (expected word, field or matcher)"))
    }
}

/// Tokenizes text with one grammar.
pub struct Lexer {
    /// Which grammar the recognizers came from.
    kind: GrammarKind,
    /// Recognizers in precedence order.
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("kind", &self.kind)
            .field("precedence", &self.precedence())
            .finish()
    }
}

impl Lexer {
    /// Creates a lexer from a grammar's recognizer factory.
    pub fn new(grammar: &dyn Grammar) -> Self {
        Self {
            kind: grammar.kind(),
            recognizers: grammar.recognizers(),
        }
    }

    /// Lexer for [`WordGrammar`].
    pub fn word() -> Self {
        Self::new(&WordGrammar)
    }

    /// Lexer for [`FieldQueryGrammar`].
    pub fn field_query() -> Self {
        Self::new(&FieldQueryGrammar)
    }

    /// Lexer for [`MatcherPhraseGrammar`].
    pub fn matcher_phrase() -> Self {
        Self::new(&MatcherPhraseGrammar)
    }

    /// The grammar this lexer was built from.
    pub fn kind(&self) -> GrammarKind {
        self.kind
    }

    /// Recognizer names in precedence order.
    pub fn precedence(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    /// Tokenizes `text`. Concatenating the returned token values reproduces `text`.
    pub fn tokenize(&mut self, text: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(text);
        let mut tokens = Vec::new();
        let mut active: Option<usize> = None;
        self.reset(0);

        while let Some(ch) = scanner.advance() {
            let index = match active {
                None => {
                    let index = self
                        .select(&scanner, self.recognizers.len())
                        .unwrap_or(self.recognizers.len() - 1);
                    self.recognizers[index].init(scanner.start(), scanner.run(), &scanner);
                    index
                }
                Some(index) => {
                    self.recognizers[index].append(ch, &scanner);
                    match self.select(&scanner, index) {
                        Some(next) => {
                            trace!(
                                from = self.recognizers[index].name(),
                                to = self.recognizers[next].name(),
                                at = scanner.position(),
                                "recognizer lock"
                            );
                            self.recognizers[next].init(scanner.start(), scanner.run(), &scanner);
                            next
                        }
                        None => index,
                    }
                }
            };
            active = Some(index);

            if let Some(token) = self.recognizers[index].consume(&scanner) {
                trace!(kind = %token.kind, start = token.start, end = token.end, "token");
                tokens.push(token);
                scanner.mark();
                self.reset(scanner.position());
                active = None;
            }
        }

        if let Some(index) = active {
            tokens.push(self.flush(index, &scanner));
        }
        tokens
    }

    /// First recognizer before `limit` whose lock holds.
    fn select(&self, scanner: &Scanner<'_>, limit: usize) -> Option<usize> {
        self.recognizers[..limit]
            .iter()
            .position(|r| r.lock(scanner))
    }

    /// Resets every recognizer to start at `start`.
    fn reset(&mut self, start: usize) {
        for recognizer in &mut self.recognizers {
            recognizer.reset(start);
        }
    }

    /// Closes the pending run at end of input.
    fn flush(&mut self, active: usize, scanner: &Scanner<'_>) -> Token {
        if let Some(token) = self.recognizers[active].consume(scanner) {
            return token;
        }
        for index in (0..self.recognizers.len()).filter(|&i| i != active) {
            let recognizer = &mut self.recognizers[index];
            recognizer.init(scanner.start(), scanner.run(), scanner);
            if let Some(token) = recognizer.consume(scanner) {
                return token;
            }
        }
        debug!(
            run = scanner.run(),
            start = scanner.start(),
            "no recognizer closed the final run; emitting it as a word"
        );
        Token::new(TokenKind::Word, scanner.run(), scanner.start())
    }
}
