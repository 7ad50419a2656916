//! Configuration system for sift.
//!
//! sift uses TOML configuration files named `.sift.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.sift.toml` files
//! found, then loading `~/.sift.toml` as the global config with lowest precedence.
//!
//! Settings are kept as written (operator and grammar names stay strings) so that
//! [`Config::validate`] can report bad names. The typed accessors fall back to defaults for
//! anything that does not resolve.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{
    CONFIG_FILENAME, discover_config_files, format_path_for_display, global_config_path,
    init_config_path, is_global_config,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawAnalyzerSettings, RawConfig, RawParamSettings, RawTermSettings, RawVocabulary,
    parse_config_file, parse_config_str,
};
pub use resolve::{resolve_grammar, resolve_operator};
use serde::{Deserialize, Serialize};
use sift_phrase::{CandidateSuggester, GrammarKind, Suggester, VocabularySuggester};
use sift_terms::{Operator, ParamCodec, QueryModel, TermKind};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sift.
///
/// This represents the fully resolved configuration after merging all discovered `.sift.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Phrase analyzer settings.
    pub analyzer: AnalyzerSettings,
    /// Known columns and values.
    pub vocabulary: VocabularySettings,
    /// Term list defaults.
    pub terms: TermSettings,
    /// Flat parameter encoding.
    pub params: ParamSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// The configured grammar, or the word grammar if the name is unknown.
    pub fn grammar(&self) -> GrammarKind {
        resolve_grammar(&self.analyzer.grammar).unwrap_or_default()
    }

    /// The separator synthesized between matchers.
    pub fn default_separator(&self) -> Operator {
        resolve_operator(&self.terms.default_separator, TermKind::Separator)
            .unwrap_or(Operator::And)
    }

    /// The matcher operator given to new placeholders.
    pub fn default_matcher(&self) -> Operator {
        resolve_operator(&self.terms.default_matcher, TermKind::Matcher)
            .unwrap_or(Operator::Like)
    }

    /// The flat parameter codec described by `[params]`.
    pub fn codec(&self) -> ParamCodec {
        ParamCodec {
            filters: self.params.filters.clone(),
            sorters: self.params.sorters.clone(),
            offset: self.params.offset.clone(),
            limit: self.params.limit.clone(),
            field_separator: self.params.field_separator,
            term_delimiter: self.params.term_delimiter,
        }
    }

    /// An empty query model carrying the configured page size and list defaults.
    pub fn model(&self) -> QueryModel {
        let mut model = QueryModel::new().with_limit(Some(self.terms.page_size));
        model
            .filters
            .with_separator(self.default_separator())
            .with_matcher(self.default_matcher());
        model
    }

    /// The suggester for the configured grammar.
    ///
    /// The matcher and field grammars use the vocabulary, with the fixed candidates as the
    /// fallback. The word grammar completes from the fixed candidates alone.
    pub fn suggester(&self) -> Box<dyn Suggester> {
        let candidates = &self.analyzer.candidates;
        if self.grammar() == GrammarKind::Word || self.vocabulary.columns.is_empty() {
            return Box::new(CandidateSuggester::new(candidates.iter().cloned()));
        }
        let vocabulary = self.vocabulary.values.iter().fold(
            VocabularySuggester::new(self.vocabulary.columns.iter().cloned()),
            |suggester, (column, values)| {
                suggester.with_values(column.clone(), values.iter().cloned())
            },
        );
        Box::new(vocabulary.with_fallback(candidates.iter().cloned()))
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// This outputs the merged settings in the same format as a `.sift.toml` file.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            analyzer: &self.analyzer,
            vocabulary: &self.vocabulary,
            terms: &self.terms,
            params: &self.params,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Phrase analyzer settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Grammar name.
    pub grammar: String,
    /// Fixed suggestion candidates.
    pub candidates: Vec<String>,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            grammar: GrammarKind::default().to_string(),
            candidates: Vec::new(),
        }
    }
}

/// Known columns and their values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VocabularySettings {
    /// Column names, in suggestion order.
    pub columns: Vec<String>,
    /// Known values per column.
    pub values: BTreeMap<String, Vec<String>>,
}

/// Term list defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TermSettings {
    /// Separator keyword synthesized between matchers.
    pub default_separator: String,
    /// Matcher keyword given to new placeholders.
    pub default_matcher: String,
    /// Query limit.
    pub page_size: usize,
}

impl Default for TermSettings {
    fn default() -> Self {
        Self {
            default_separator: Operator::And.to_string(),
            default_matcher: Operator::Like.to_string(),
            page_size: 25,
        }
    }
}

/// Flat parameter names and separators.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParamSettings {
    /// Parameter name of the filter list.
    pub filters: String,
    /// Parameter name of the sorter list.
    pub sorters: String,
    /// Parameter name of the offset.
    pub offset: String,
    /// Parameter name of the limit.
    pub limit: String,
    /// Character separating the fields of one term.
    pub field_separator: char,
    /// Character separating terms.
    pub term_delimiter: char,
}

impl Default for ParamSettings {
    fn default() -> Self {
        let codec = ParamCodec::default();
        Self {
            filters: codec.filters,
            sorters: codec.sorters,
            offset: codec.offset,
            limit: codec.limit,
            field_separator: codec.field_separator,
            term_delimiter: codec.term_delimiter,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Phrase analyzer settings.
    analyzer: &'a AnalyzerSettings,
    /// Known columns and values.
    vocabulary: &'a VocabularySettings,
    /// Term list defaults.
    terms: &'a TermSettings,
    /// Flat parameter encoding.
    params: &'a ParamSettings,
}
