//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that would be
//! silently replaced by defaults or that make the flat encoding ambiguous.

use std::fmt;

use sift_phrase::GrammarKind;
use sift_terms::TermKind;

use crate::{
    Config,
    resolve::{resolve_grammar, resolve_operator},
};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `analyzer.grammar` names no known grammar.
    UnknownGrammar {
        /// The configured name.
        name: String,
    },
    /// An operator setting names no operator of the expected kind.
    UnknownOperator {
        /// The setting, e.g. `terms.default_matcher`.
        setting: &'static str,
        /// The configured name.
        name: String,
    },
    /// The field separator and term delimiter are the same character.
    AmbiguousParams {
        /// The shared character.
        separator: char,
    },
    /// Two flat parameters share a name.
    DuplicateParamName {
        /// The shared name.
        name: String,
    },
    /// `terms.page_size` is zero.
    ZeroPageSize,
    /// A grammar that completes columns has no columns to offer.
    EmptyVocabulary {
        /// The configured grammar.
        grammar: GrammarKind,
    },
    /// Values are listed for a column the vocabulary does not name.
    UnknownValueColumn {
        /// The column.
        column: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGrammar { name } => write!(
                f,
                "unknown grammar '{name}' (expected word, field or matcher), using word"
            ),
            Self::UnknownOperator { setting, name } => {
                write!(f, "{setting}: '{name}' is not a valid operator here")
            }
            Self::AmbiguousParams { separator } => write!(
                f,
                "params.field_separator and params.term_delimiter are both '{separator}'"
            ),
            Self::DuplicateParamName { name } => {
                write!(f, "parameter name '{name}' is used more than once")
            }
            Self::ZeroPageSize => write!(f, "terms.page_size is 0, queries return nothing"),
            Self::EmptyVocabulary { grammar } => {
                write!(f, "grammar '{grammar}' is set but vocabulary.columns is empty")
            }
            Self::UnknownValueColumn { column } => write!(
                f,
                "vocabulary.values lists column '{column}', which is not in vocabulary.columns"
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let grammar = resolve_grammar(&config.analyzer.grammar);
    if grammar.is_none() {
        warnings.push(ConfigWarning::UnknownGrammar {
            name: config.analyzer.grammar.clone(),
        });
    }

    let operators = [
        (
            "terms.default_separator",
            &config.terms.default_separator,
            TermKind::Separator,
        ),
        (
            "terms.default_matcher",
            &config.terms.default_matcher,
            TermKind::Matcher,
        ),
    ];
    for (setting, name, kind) in operators {
        if resolve_operator(name, kind).is_none() {
            warnings.push(ConfigWarning::UnknownOperator {
                setting,
                name: name.clone(),
            });
        }
    }

    if config.terms.page_size == 0 {
        warnings.push(ConfigWarning::ZeroPageSize);
    }

    warnings.extend(validate_params(config));
    warnings.extend(validate_vocabulary(config, grammar.unwrap_or_default()));
    warnings
}

/// Checks that the flat encoding can be decoded unambiguously.
fn validate_params(config: &Config) -> Vec<ConfigWarning> {
    let params = &config.params;
    let mut warnings = Vec::new();

    if params.field_separator == params.term_delimiter {
        warnings.push(ConfigWarning::AmbiguousParams {
            separator: params.field_separator,
        });
    }

    let names = [
        &params.filters,
        &params.sorters,
        &params.offset,
        &params.limit,
    ];
    for (index, name) in names.iter().enumerate() {
        let first = names.iter().position(|other| other == name) == Some(index);
        let repeated = names[index + 1..].contains(name);
        if first && repeated {
            warnings.push(ConfigWarning::DuplicateParamName {
                name: (*name).clone(),
            });
        }
    }

    warnings
}

/// Checks the vocabulary against the grammar that would use it.
fn validate_vocabulary(config: &Config, grammar: GrammarKind) -> Vec<ConfigWarning> {
    let vocabulary = &config.vocabulary;
    let mut warnings = Vec::new();

    if grammar == GrammarKind::Matcher && vocabulary.columns.is_empty() {
        warnings.push(ConfigWarning::EmptyVocabulary { grammar });
    }

    for column in vocabulary.values.keys() {
        if !vocabulary.columns.contains(column) {
            warnings.push(ConfigWarning::UnknownValueColumn {
                column: column.clone(),
            });
        }
    }

    warnings
}
