//! Resolution of configured names to typed values.

use sift_phrase::GrammarKind;
use sift_terms::{Operator, TermKind};

/// Resolves a grammar name (`word`, `field`, `matcher`), ignoring case and surrounding space.
pub fn resolve_grammar(name: &str) -> Option<GrammarKind> {
    name.trim().parse().ok()
}

/// Resolves an operator keyword, accepting it only if it is of `kind`.
pub fn resolve_operator(name: &str, kind: TermKind) -> Option<Operator> {
    name.trim()
        .parse::<Operator>()
        .ok()
        .filter(|operator| operator.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_grammar() {
        assert_eq!(resolve_grammar("matcher"), Some(GrammarKind::Matcher));
        assert_eq!(resolve_grammar(" Field "), Some(GrammarKind::Field));
        assert_eq!(resolve_grammar("word"), Some(GrammarKind::Word));
        assert_eq!(resolve_grammar("lucene"), None);
        assert_eq!(resolve_grammar(""), None);
    }

    #[test]
    fn test_resolve_operator() {
        assert_eq!(
            resolve_operator("OR", TermKind::Separator),
            Some(Operator::Or)
        );
        assert_eq!(
            resolve_operator(">=", TermKind::Matcher),
            Some(Operator::Gte)
        );
        assert_eq!(resolve_operator("like", TermKind::Separator), None);
        assert_eq!(resolve_operator("and", TermKind::Matcher), None);
        assert_eq!(resolve_operator("nope", TermKind::Matcher), None);
    }
}
