//! Read-only view of the lexer position handed to recognizers.
//!
//! The scanner splits the input into three parts: text already covered by emitted tokens,
//! the pending *run* (characters consumed since the last emitted token), and the text still
//! ahead. All offsets are character offsets.

use regex::Regex;

/// Position of the lexer within its input.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    /// The full input text.
    text: &'a str,
    /// Byte offset of every character, plus the text length as a final entry.
    bounds: Vec<usize>,
    /// Number of characters consumed so far.
    position: usize,
    /// Character offset where the pending run starts.
    run_start: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned before the first character of `text`.
    pub fn new(text: &'a str) -> Self {
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self {
            text,
            bounds,
            position: 0,
            run_start: 0,
        }
    }

    /// Length of the input in characters.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of characters consumed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Start offset of the pending run.
    pub fn start(&self) -> usize {
        self.run_start
    }

    /// Offset of the last character of the pending run, or `None` when the run is empty.
    pub fn end(&self) -> Option<usize> {
        (self.position > self.run_start).then(|| self.position - 1)
    }

    /// The pending run: characters consumed since the last emitted token.
    pub fn run(&self) -> &'a str {
        self.slice(self.run_start, self.position)
    }

    /// Everything consumed so far, including the pending run.
    pub fn behind(&self) -> &'a str {
        self.slice(0, self.position)
    }

    /// Everything consumed before the pending run.
    pub fn before_run(&self) -> &'a str {
        self.slice(0, self.run_start)
    }

    /// Everything not yet consumed.
    pub fn rest(&self) -> &'a str {
        self.slice(self.position, self.len())
    }

    /// Up to `n` characters ahead of the position.
    pub fn ahead(&self, n: usize) -> &'a str {
        self.slice(self.position, (self.position + n).min(self.len()))
    }

    /// Whether the input is exhausted.
    pub fn ahead_is_empty(&self) -> bool {
        self.position >= self.len()
    }

    /// Whether the next character is whitespace.
    pub fn ahead_is_whitespace(&self) -> bool {
        self.rest().chars().next().is_some_and(char::is_whitespace)
    }

    /// Whether a token may end here: the input is exhausted or whitespace follows.
    pub fn at_boundary(&self) -> bool {
        self.ahead_is_empty() || self.ahead_is_whitespace()
    }

    /// Whether the remaining text starts with any of `prefixes`.
    pub fn ahead_starts_with_any(&self, prefixes: &[&str]) -> bool {
        let rest = self.rest();
        prefixes.iter().any(|p| rest.starts_with(p))
    }

    /// Whether `pattern` matches the remaining text.
    pub fn test_ahead(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.rest())
    }

    /// Whether `pattern` matches the consumed text.
    pub fn test_behind(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.behind())
    }

    /// Whether the consumed text ends with any of `suffixes`.
    pub fn behind_ends_with_any(&self, suffixes: &[&str]) -> bool {
        let behind = self.behind();
        suffixes.iter().any(|s| behind.ends_with(s))
    }

    /// Consumes the next character, extending the pending run.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.position += 1;
        Some(ch)
    }

    /// Closes the pending run at the current position.
    pub(crate) fn mark(&mut self) {
        self.run_start = self.position;
    }

    /// Text between two character offsets.
    fn slice(&self, from: usize, to: usize) -> &'a str {
        &self.text[self.bounds[from]..self.bounds[to]]
    }
}
