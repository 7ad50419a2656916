//! Tokens produced by the lexer.
//!
//! Offsets are character offsets into the analyzed text and `end` is inclusive, so a token
//! spanning `"status"` at the start of the input has `start == 0` and `end == 5`.

use std::fmt;

use serde::Serialize;

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A run of blank characters.
    Whitespace,
    /// A bare word (catch-all).
    Word,
    /// A boolean keyword such as `AND`.
    Operator,
    /// A composite `field:value` term.
    Term,
    /// The field name of a term.
    Field,
    /// The `:` between a field and its value.
    Delimiter,
    /// The value of a term or matcher.
    Value,
    /// A composite `column operator value` triple.
    Matcher,
    /// The column of a matcher.
    Column,
    /// The comparison operator of a matcher.
    Comparator,
    /// A connective (`and`/`or`) between matchers.
    Separator,
}

impl TokenKind {
    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Word => "word",
            Self::Operator => "operator",
            Self::Term => "term",
            Self::Field => "field",
            Self::Delimiter => "delimiter",
            Self::Value => "value",
            Self::Matcher => "matcher",
            Self::Column => "column",
            Self::Comparator => "comparator",
            Self::Separator => "separator",
        }
    }

    /// Whether tokens of this kind are decomposed into children.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Term | Self::Matcher)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled, contiguous span of input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The exact text covered by the token.
    pub value: String,
    /// Character offset of the first character.
    pub start: usize,
    /// Character offset of the last character (inclusive).
    pub end: usize,
    /// What the token is.
    pub kind: TokenKind,
    /// Sub-tokens covering the whole span, in order. Empty for leaf tokens.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl Token {
    /// Creates a leaf token starting at `start`.
    ///
    /// `value` must be non-empty; the lexer never produces zero-width tokens.
    pub fn new(kind: TokenKind, value: impl Into<String>, start: usize) -> Self {
        let value = value.into();
        let end = start + value.chars().count().saturating_sub(1);
        Self {
            value,
            start,
            end,
            kind,
            children: Vec::new(),
        }
    }

    /// Creates a composite token whose value and span are the concatenation of `children`.
    ///
    /// Returns `None` when `children` is empty.
    pub fn composite(kind: TokenKind, children: Vec<Self>) -> Option<Self> {
        let first = children.first()?;
        let last = children.last()?;
        let (start, end) = (first.start, last.end);
        let value = children.iter().map(|c| c.value.as_str()).collect();
        Some(Self {
            value,
            start,
            end,
            kind,
            children,
        })
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Always false: tokens are never zero-width.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the cursor position `cursor` touches this token.
    ///
    /// A cursor sits between characters, so the position right after the last character
    /// still counts as inside.
    pub fn contains(&self, cursor: usize) -> bool {
        self.start <= cursor && cursor <= self.end + 1
    }

    /// Whether this token has children.
    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the first child of the given kind.
    pub fn child(&self, kind: TokenKind) -> Option<&Self> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Whether the value is a quoted phrase (starts with `"`).
    pub fn is_phrase(&self) -> bool {
        self.value.starts_with('"')
    }

    /// Whether the value is a quoted phrase with an unescaped closing quote.
    pub fn is_closed_phrase(&self) -> bool {
        closes_phrase(&self.value)
    }

    /// Returns the value with its surrounding quotes removed.
    ///
    /// An unterminated phrase loses only its opening quote; non-phrases are returned as-is.
    pub fn unquoted(&self) -> &str {
        let Some(inner) = self.value.strip_prefix('"') else {
            return &self.value;
        };
        if self.is_closed_phrase() {
            &inner[..inner.len() - 1]
        } else {
            inner
        }
    }

    /// The text of this token from its start up to `cursor`.
    pub fn prefix(&self, cursor: usize) -> String {
        self.value
            .chars()
            .take(cursor.saturating_sub(self.start))
            .collect()
    }
}

/// Whether `value` is a quoted phrase closed by an unescaped quote.
pub(crate) fn closes_phrase(value: &str) -> bool {
    let Some(inner) = value.strip_prefix('"') else {
        return false;
    };
    let Some(body) = inner.strip_suffix('"') else {
        return false;
    };
    let escapes = body.chars().rev().take_while(|&c| c == '\\').count();
    escapes % 2 == 0
}

/// Tracks unescaped double quotes one character at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuoteState {
    /// Inside a quote that has not been closed yet.
    open: bool,
    /// The previous character was an unescaped backslash.
    escaped: bool,
}

impl QuoteState {
    /// Feeds the next character.
    pub(crate) fn push(&mut self, ch: char) {
        match ch {
            '\\' if !self.escaped => {
                self.escaped = true;
                return;
            }
            '"' if !self.escaped => self.open = !self.open,
            _ => {}
        }
        self.escaped = false;
    }

    /// Whether every unescaped quote fed so far has a partner.
    pub(crate) fn is_balanced(self) -> bool {
        !self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_computes_inclusive_end() {
        let token = Token::new(TokenKind::Word, "status", 4);
        assert_eq!(token.start, 4);
        assert_eq!(token.end, 9);
        assert_eq!(token.len(), 6);
    }

    #[test]
    fn offsets_count_characters() {
        let token = Token::new(TokenKind::Word, "héllo", 0);
        assert_eq!(token.end, 4);
    }

    #[test]
    fn composite_spans_children() {
        let term = Token::composite(
            TokenKind::Term,
            vec![
                Token::new(TokenKind::Field, "a", 3),
                Token::new(TokenKind::Delimiter, ":", 4),
                Token::new(TokenKind::Value, "bc", 5),
            ],
        )
        .unwrap();
        assert_eq!(term.value, "a:bc");
        assert_eq!((term.start, term.end), (3, 6));
        assert_eq!(term.child(TokenKind::Value).unwrap().value, "bc");
    }

    #[test]
    fn composite_of_nothing_is_none() {
        assert!(Token::composite(TokenKind::Term, vec![]).is_none());
    }

    #[test]
    fn contains_includes_position_after_last_char() {
        let token = Token::new(TokenKind::Word, "ab", 2);
        assert!(!token.contains(1));
        assert!(token.contains(2));
        assert!(token.contains(4));
        assert!(!token.contains(5));
    }

    #[test]
    fn closed_phrase_detection() {
        assert!(closes_phrase("\"very high\""));
        assert!(closes_phrase("\"\""));
        assert!(!closes_phrase("\""));
        assert!(!closes_phrase("\"open"));
        assert!(!closes_phrase("\"a\\\""));
        assert!(closes_phrase("\"a\\\\\""));
        assert!(!closes_phrase("plain"));
    }

    #[test]
    fn unquoted_strips_quotes() {
        let closed = Token::new(TokenKind::Value, "\"very high\"", 0);
        assert_eq!(closed.unquoted(), "very high");
        let open = Token::new(TokenKind::Value, "\"open", 0);
        assert_eq!(open.unquoted(), "open");
        let bare = Token::new(TokenKind::Value, "open", 0);
        assert_eq!(bare.unquoted(), "open");
    }

    #[test]
    fn prefix_stops_at_cursor() {
        let token = Token::new(TokenKind::Word, "howler", 3);
        assert_eq!(token.prefix(3), "");
        assert_eq!(token.prefix(6), "how");
        assert_eq!(token.prefix(20), "howler");
    }

    fn balanced(text: &str) -> bool {
        let mut quotes = QuoteState::default();
        text.chars().for_each(|ch| quotes.push(ch));
        quotes.is_balanced()
    }

    #[test]
    fn balanced_quotes() {
        assert!(balanced("name = \"a or b\""));
        assert!(!balanced("name = \"a or"));
        assert!(balanced("name = \"a \\\" b\""));
        assert!(balanced("plain"));
        assert!(!balanced("a \\\\\" b"));
    }
}
