//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
pub use sift_highlight::{
    caret, dim, header, highlight_tokens, indent_content, subheader, success, warning,
};
use sift_phrase::Token;
use sift_terms::QueryTerm;

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds a table of terms, one row per term in list order.
pub fn term_table(terms: &[QueryTerm]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["#", "kind", "column", "operator", "value"]);
    for (index, term) in terms.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(term.kind()),
            Cell::new(term.column.as_deref().unwrap_or("")),
            Cell::new(term.operator.as_str()),
            Cell::new(term.value.as_deref().unwrap_or("")),
        ]);
    }
    table
}

/// Builds a table of flat request parameters.
pub fn param_table(params: &[(String, String)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["name", "value"]);
    for (name, value) in params {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table
}

/// Formats tokens as an indented tree, one token per line.
///
/// Each line shows the kind, the inclusive character span and the quoted text.
pub fn format_token_tree(tokens: &[Token]) -> String {
    let mut output = String::new();
    push_token_tree(&mut output, tokens, 0);
    output
}

/// Appends `tokens` and their descendants at `depth`.
fn push_token_tree(output: &mut String, tokens: &[Token], depth: usize) {
    for token in tokens {
        let span = format!("{}..={}", token.start, token.end);
        output.push_str(&format!(
            "{}{:<11} {} {:?}\n",
            "  ".repeat(depth),
            token.kind.as_str(),
            dim(&span),
            token.value
        ));
        push_token_tree(output, &token.children, depth + 1);
    }
}

/// Describes a token as `kind "text"` for single-line summaries.
pub fn describe_token(token: Option<&Token>) -> String {
    match token {
        Some(token) => format!("{} {:?}", token.kind, token.value),
        None => dim("none"),
    }
}

#[cfg(test)]
mod tests {
    use sift_phrase::{GrammarKind, PhraseAnalyzer};
    use sift_terms::Operator;

    use super::*;

    #[test]
    fn token_tree_nests_children() {
        let analysis = PhraseAnalyzer::for_grammar(GrammarKind::Field).parse("a:b", 0);
        let tree = format_token_tree(&analysis.tokens);
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("term"));
        assert!(lines[1].starts_with("  field"));
        assert!(lines[1].ends_with("\"a\""));
        assert!(lines[3].starts_with("  value"));
    }

    #[test]
    fn term_table_lists_every_term() {
        let terms = vec![
            QueryTerm::matcher("status", Operator::Eq, "open".to_string()),
            QueryTerm::separator(Operator::And),
            QueryTerm::matcher("priority", Operator::Gte, "2".to_string()),
        ];
        let rendered = term_table(&terms).to_string();
        assert!(rendered.contains("status"));
        assert!(rendered.contains(">="));
        assert!(rendered.contains("and"));
        assert_eq!(rendered.matches("matcher").count(), 2);
    }

    #[test]
    fn describe_missing_token() {
        assert!(describe_token(None).contains("none"));
    }
}
