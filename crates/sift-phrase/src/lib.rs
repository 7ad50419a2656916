//! Incremental query-phrase analysis for sift.
//!
//! This crate tokenizes live-edited search text and reports what sits under the cursor.
//! Three grammars are built in:
//!
//! - **Word**: `rust async` - whitespace-separated words
//! - **Field query**: `status:open AND priority:"very high"` - `field:value` terms and
//!   boolean operators
//! - **Matcher phrase**: `name like foo or status = bar` - `column operator value` triples
//!   joined by `and` / `or`
//!
//! Tokenization is lossless and never fails: incomplete input (an unterminated phrase, a
//! half-typed triple) degrades into partial tokens instead of errors.
//!
//! # Example
//!
//! ```
//! use sift_phrase::{GrammarKind, PhraseAnalyzer, TokenKind};
//!
//! let mut analyzer = PhraseAnalyzer::for_grammar(GrammarKind::Field);
//! let analysis = analyzer.parse("status:op", 9);
//!
//! assert_eq!(analysis.tokens[0].kind, TokenKind::Term);
//! assert_eq!(analysis.parent.unwrap().kind, TokenKind::Term);
//! assert_eq!(analysis.suggest.value, "op");
//! ```

#![warn(missing_docs)]

mod analyzer;
mod buffer;
mod keywords;
mod lexer;
pub mod recognizer;
mod scanner;
mod suggest;
mod token;

pub use analyzer::{PhraseAnalysis, PhraseAnalyzer, Suggestion};
pub use buffer::TokenBuffer;
pub use keywords::{
    BOOLEAN_OPERATORS, MATCHER_OPERATORS, SEPARATORS, SORTERS, is_boolean_operator,
    is_matcher_operator, is_separator,
};
pub use lexer::{FieldQueryGrammar, Grammar, GrammarKind, Lexer, MatcherPhraseGrammar, WordGrammar};
pub use recognizer::Recognizer;
pub use scanner::Scanner;
pub use suggest::{CandidateSuggester, Suggester, VocabularySuggester, filter_candidates};
pub use token::{Token, TokenKind};
