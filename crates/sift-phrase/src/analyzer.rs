//! Cursor-relative analysis of a phrase.

use serde::Serialize;

use crate::{
    lexer::{GrammarKind, Lexer},
    token::{Token, TokenKind},
};

/// What the user is typing at the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// The token a completion replaces, or `None` when a completion is inserted at the cursor.
    pub token: Option<Token>,
    /// The composite token holding the completion site, if any.
    pub parent: Option<Token>,
    /// Text already typed, from the start of the completion site up to the cursor.
    pub value: String,
}

/// Tokens of a phrase plus the context around one cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhraseAnalysis {
    /// Cursor, clamped to the text length in characters.
    pub cursor: usize,
    /// Top-level tokens.
    pub tokens: Vec<Token>,
    /// Innermost token touching the cursor. `Some` whenever `tokens` is non-empty.
    pub current: Option<Token>,
    /// Composite token directly holding `current`.
    pub parent: Option<Token>,
    /// Completion context.
    pub suggest: Suggestion,
}

impl PhraseAnalysis {
    /// Concatenated token values; equal to the analyzed text.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }
}

/// Re-analyzes text on every call. Holds no state between calls besides the lexer.
#[derive(Debug)]
pub struct PhraseAnalyzer {
    /// Tokenizer for the active grammar.
    lexer: Lexer,
}

impl PhraseAnalyzer {
    /// Creates an analyzer over `lexer`.
    pub fn new(lexer: Lexer) -> Self {
        Self { lexer }
    }

    /// Creates an analyzer for a built-in grammar.
    pub fn for_grammar(kind: GrammarKind) -> Self {
        Self::new(kind.lexer())
    }

    /// The grammar in use.
    pub fn grammar(&self) -> GrammarKind {
        self.lexer.kind()
    }

    /// Tokenizes `text` and locates `cursor`. Never fails; out-of-range cursors are clamped.
    pub fn parse(&mut self, text: &str, cursor: usize) -> PhraseAnalysis {
        let cursor = cursor.min(text.chars().count());
        let tokens = self.lexer.tokenize(text);
        let (current, parent) = match locate(&tokens, cursor) {
            Some((current, parent)) => (Some(current.clone()), parent.cloned()),
            None => (None, None),
        };
        let suggest = suggestion(current.as_ref(), parent.as_ref(), cursor);
        PhraseAnalysis {
            cursor,
            tokens,
            current,
            parent,
            suggest,
        }
    }
}

/// Finds the sibling touching `cursor`, preferring the one ending at it.
fn touching(tokens: &[Token], cursor: usize) -> Option<&Token> {
    tokens
        .iter()
        .find(|t| t.start < cursor && cursor <= t.end + 1)
        .or_else(|| tokens.iter().find(|t| t.start == cursor))
}

/// Descends to the innermost token touching `cursor`, returning it and its composite parent.
fn locate(tokens: &[Token], cursor: usize) -> Option<(&Token, Option<&Token>)> {
    let mut current = touching(tokens, cursor)?;
    let mut parent = None;
    while let Some(child) = touching(&current.children, cursor) {
        parent = Some(current);
        current = child;
    }
    Some((current, parent))
}

/// Derives the completion context from the located tokens.
fn suggestion(current: Option<&Token>, parent: Option<&Token>, cursor: usize) -> Suggestion {
    let parent = parent.cloned();
    let Some(current) = current else {
        return Suggestion::default();
    };
    match current.kind {
        TokenKind::Whitespace | TokenKind::Delimiter => Suggestion {
            token: None,
            parent,
            value: String::new(),
        },
        TokenKind::Value if current.is_phrase() => {
            if current.is_closed_phrase() && cursor > current.end {
                Suggestion {
                    token: None,
                    parent,
                    value: String::new(),
                }
            } else {
                let typed = current.prefix(cursor);
                let value = typed.strip_prefix('"').unwrap_or(&typed).to_string();
                Suggestion {
                    token: Some(current.clone()),
                    parent,
                    value,
                }
            }
        }
        _ => Suggestion {
            token: Some(current.clone()),
            parent,
            value: current.prefix(cursor),
        },
    }
}
