//! Syntax highlighting and terminal colors for sift.
//!
//! TOML and JSON are highlighted with syntect. Analyzed phrases are colored per token kind
//! directly from the lexer output, so what the terminal shows is exactly how the phrase was
//! split.

#![warn(missing_docs)]

use sift_phrase::{Token, TokenKind};
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter that can highlight code for terminal output.
pub struct Highlighter {
    /// The syntax set containing language definitions (including TOML).
    syntax_set: SyntaxSet,
    /// The theme set containing color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content for terminal output.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON content for terminal output.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content with the specified syntax for terminal output.
    ///
    /// Unknown syntaxes are rendered as plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, self.theme_set.get(self.theme));
        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers and columns).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success and values).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings and comparators).
    pub const YELLOW: &str = "\x1b[33m";
    /// Magenta text (for boolean operators and separators).
    pub const MAGENTA: &str = "\x1b[35m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `style` and a reset.
fn paint(style: &str, text: &str) -> String {
    format!("{style}{text}{}", colors::RESET)
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    paint(&format!("{}{}", colors::BOLD, colors::CYAN), text)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// The color a token kind is shown in. Whitespace and plain words are unstyled.
pub fn token_style(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Whitespace | TokenKind::Word | TokenKind::Term | TokenKind::Matcher => None,
        TokenKind::Field | TokenKind::Column => Some(colors::CYAN),
        TokenKind::Delimiter => Some(colors::DIM),
        TokenKind::Value => Some(colors::GREEN),
        TokenKind::Comparator => Some(colors::YELLOW),
        TokenKind::Operator | TokenKind::Separator => Some(colors::MAGENTA),
    }
}

/// Renders lexed tokens back to their text, colored per kind.
///
/// Composite tokens are rendered through their children.
pub fn highlight_tokens(tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        if token.is_composite() {
            output.push_str(&highlight_tokens(&token.children));
        } else {
            match token_style(token.kind) {
                Some(style) => output.push_str(&paint(style, &token.value)),
                None => output.push_str(&token.value),
            }
        }
    }
    output
}

/// A line with a caret under character offset `cursor`.
pub fn caret(cursor: usize) -> String {
    format!("{}{}", " ".repeat(cursor), paint(colors::BOLD, "^"))
}

/// Prefixes every line of `content` with `indent` spaces.
pub fn indent_content(content: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    content
        .lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
