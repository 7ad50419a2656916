//! Conversion between matcher-phrase tokens and query terms.

use std::fmt;

use sift_phrase::{Token, TokenKind, is_separator};
use tracing::debug;

use crate::term::{Operator, QueryTerm, TermKind};

/// Extracts terms from a matcher-phrase token stream.
///
/// Matcher tokens become matchers (phrase values are unquoted), separator tokens become
/// separators, whitespace is skipped. A matcher without a recognized comparator is skipped.
pub fn terms_from_tokens(tokens: &[Token]) -> Vec<QueryTerm> {
    tokens
        .iter()
        .filter_map(|token| match token.kind {
            TokenKind::Matcher => matcher(token),
            TokenKind::Separator => separator(token),
            _ => None,
        })
        .collect()
}

/// Builds a matcher from a matcher token.
fn matcher(token: &Token) -> Option<QueryTerm> {
    let comparator = token.child(TokenKind::Comparator)?;
    let operator = match comparator.value.parse::<Operator>() {
        Ok(operator) if operator.kind() == TermKind::Matcher => operator,
        _ => {
            debug!(comparator = %comparator.value, "skipping matcher with unknown operator");
            return None;
        }
    };
    Some(QueryTerm {
        id: None,
        column: token.child(TokenKind::Column).map(|c| c.value.clone()),
        operator,
        value: token.child(TokenKind::Value).map(value_text),
    })
}

/// Builds a separator from a separator token.
fn separator(token: &Token) -> Option<QueryTerm> {
    token
        .value
        .parse::<Operator>()
        .ok()
        .filter(|op| op.kind() == TermKind::Separator)
        .map(QueryTerm::separator)
}

/// The value a value token denotes: phrases lose their quotes and escapes.
fn value_text(token: &Token) -> String {
    if !token.is_phrase() {
        return token.value.clone();
    }
    let mut out = String::new();
    let mut chars = token.unquoted().chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.extend(chars.next()),
            _ => out.push(ch),
        }
    }
    out
}

/// Whether a value must be quoted to survive re-lexing.
fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.contains(|c: char| c.is_whitespace() || c == '"')
        || is_separator(value)
}

/// Quotes `value`, escaping quotes and backslashes.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Renders one filter term as matcher-phrase text.
pub(crate) fn render<V: fmt::Display>(term: &QueryTerm<V>) -> String {
    if term.is_separator() {
        return term.operator.to_string();
    }
    let mut parts = Vec::with_capacity(3);
    if let Some(column) = &term.column {
        parts.push(column.clone());
    }
    parts.push(term.operator.to_string());
    if let Some(value) = &term.value {
        let value = value.to_string();
        parts.push(if needs_quotes(&value) { quote(&value) } else { value });
    }
    parts.join(" ")
}

/// Renders one sorter as `column direction`.
pub(crate) fn render_sorter<V: fmt::Display>(term: &QueryTerm<V>) -> String {
    term.to_string()
}

#[cfg(test)]
mod tests {
    use sift_phrase::Lexer;

    use super::*;
    use crate::list::QueryTermList;

    fn terms(text: &str) -> Vec<QueryTerm> {
        terms_from_tokens(&Lexer::matcher_phrase().tokenize(text))
    }

    #[test]
    fn matchers_and_separators() {
        assert_eq!(
            terms("name like foo or status = bar"),
            vec![
                QueryTerm::matcher("name", Operator::Like, "foo".to_string()),
                QueryTerm::separator(Operator::Or),
                QueryTerm::matcher("status", Operator::Eq, "bar".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_values_are_unquoted() {
        let terms = terms("title = \"war and peace\" and q like \"say \\\"hi\\\"\"");
        assert_eq!(terms[0].value.as_deref(), Some("war and peace"));
        assert_eq!(terms[2].value.as_deref(), Some("say \"hi\""));
    }

    #[test]
    fn partial_triples() {
        let partial = terms("status like");
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].value, None);
        assert!(terms("status").is_empty());
    }

    #[test]
    fn unknown_operator_is_skipped() {
        assert!(terms("a ~ 1").is_empty());
    }

    #[test]
    fn render_quotes_when_needed() {
        let plain = QueryTerm::matcher("a", Operator::Eq, "1".to_string());
        assert_eq!(render(&plain), "a = 1");
        let spaced = QueryTerm::matcher("a", Operator::Like, "x y".to_string());
        assert_eq!(render(&spaced), "a like \"x y\"");
        let keyword = QueryTerm::matcher("a", Operator::Is, "or".to_string());
        assert_eq!(render(&keyword), "a is \"or\"");
        let quoted = QueryTerm::matcher("a", Operator::Eq, "q\"\\".to_string());
        assert_eq!(render(&quoted), "a = \"q\\\"\\\\\"");
    }

    #[test]
    fn phrase_round_trip() {
        let text = "title like \"war and peace\" or year >= 1869 and q = \"a \\\"b\\\"\"";
        let list: QueryTermList = QueryTermList::from_phrase(text);
        assert!(list.valid());
        assert_eq!(list.count(), 5);
        let again: QueryTermList = QueryTermList::from_phrase(&list.to_phrase());
        let strip = |l: &QueryTermList| {
            l.terms()
                .iter()
                .map(QueryTerm::without_id)
                .collect::<Vec<_>>()
        };
        assert_eq!(strip(&again), strip(&list));
    }
}
