//! Recognizers: one grammar unit per token kind.
//!
//! A recognizer owns its buffers and answers two questions about the pending run:
//!
//! - [`Recognizer::lock`]: should I take over the run at this point?
//! - [`Recognizer::consume`]: is my buffer a complete token now?
//!
//! Both are pure over the recognizer's own state and the [`Scanner`], and the lexer may
//! call them several times per character.

mod field;
mod matcher;
mod operator;
mod separator;
mod whitespace;
mod word;

pub use field::FieldTermRecognizer;
pub use matcher::MatcherRecognizer;
pub use operator::BooleanOperatorRecognizer;
pub use separator::SeparatorRecognizer;
pub use whitespace::WhitespaceRecognizer;
pub use word::WordRecognizer;

use crate::{scanner::Scanner, token::Token};

/// A grammar unit recognizing one token kind.
pub trait Recognizer {
    /// Short name used in logs and precedence listings.
    fn name(&self) -> &'static str;

    /// Empties all state and anchors the next token at `start`.
    fn reset(&mut self, start: usize);

    /// Resets and seeds the recognizer with the pending run `seed` starting at `start`.
    fn init(&mut self, start: usize, seed: &str, scanner: &Scanner<'_>) {
        self.reset(start);
        for ch in seed.chars() {
            self.append(ch, scanner);
        }
    }

    /// Feeds the next character of the run.
    fn append(&mut self, next: char, scanner: &Scanner<'_>);

    /// Whether this recognizer should take over the pending run.
    fn lock(&self, scanner: &Scanner<'_>) -> bool;

    /// Returns the completed token, if the buffered run forms one at this position.
    fn consume(&self, scanner: &Scanner<'_>) -> Option<Token>;
}
