//! Fixed keyword sets recognized by the grammars.

/// Boolean operators of the field-query grammar. Matched case-sensitively.
pub const BOOLEAN_OPERATORS: &[&str] = &["AND", "OR", "NOT", "&&", "||", "!"];

/// Comparison operators allowed in a matcher triple. Word operators match case-insensitively.
pub const MATCHER_OPERATORS: &[&str] = &["like", "in", "is", ">=", "<=", "="];

/// Connectives allowed between matcher triples. Matched case-insensitively.
pub const SEPARATORS: &[&str] = &["or", "and"];

/// Operators allowed in a sort term.
pub const SORTERS: &[&str] = &["orderBy"];

/// Builds a regex alternation of `words`, escaped.
pub(crate) fn alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Whether `word` is a matcher operator.
pub fn is_matcher_operator(word: &str) -> bool {
    MATCHER_OPERATORS.iter().any(|op| op.eq_ignore_ascii_case(word))
}

/// Whether `word` is a separator keyword.
pub fn is_separator(word: &str) -> bool {
    SEPARATORS.iter().any(|sep| sep.eq_ignore_ascii_case(word))
}

/// Whether `word` is a boolean operator.
pub fn is_boolean_operator(word: &str) -> bool {
    BOOLEAN_OPERATORS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternation_escapes() {
        assert_eq!(alternation(&["a", ">=", "||"]), r"a|>=|\|\|");
    }

    #[test]
    fn keyword_predicates() {
        assert!(is_matcher_operator("LIKE"));
        assert!(is_matcher_operator(">="));
        assert!(!is_matcher_operator("~"));
        assert!(is_separator("Or"));
        assert!(!is_separator("xor"));
        assert!(is_boolean_operator("AND"));
        assert!(!is_boolean_operator("and"));
    }
}
