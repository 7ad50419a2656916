//! Error types for query terms.

use thiserror::Error;

use crate::{list::ListKind, term::TermKind};

/// Reasons a keyword or a term list is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// A keyword that is not an operator.
    #[error("unknown operator '{operator}'")]
    UnknownOperator {
        /// The rejected keyword.
        operator: String,
    },

    /// A term of a kind the list cannot hold.
    #[error("term {index} is a {kind}, which a {list} list cannot hold")]
    WrongKind {
        /// Position of the term.
        index: usize,
        /// What the term is.
        kind: TermKind,
        /// What the list holds.
        list: ListKind,
    },

    /// Matchers and separators do not alternate.
    #[error("term {index} should be a {expected} but is a {found}")]
    Alternation {
        /// Position of the offending term.
        index: usize,
        /// What belongs at that position.
        expected: TermKind,
        /// What is there.
        found: TermKind,
    },

    /// The list ends with a separator.
    #[error("separator at {index} has no matcher after it")]
    DanglingSeparator {
        /// Position of the separator.
        index: usize,
    },
}
