//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying
//! precedence rules.

use std::path::PathBuf;

use tracing::debug;

use crate::{
    AnalyzerSettings, Config, ParamSettings, TermSettings, VocabularySettings,
    parse::{RawAnalyzerSettings, RawConfig, RawParamSettings, RawTermSettings, RawVocabulary},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings and lists: first defined value wins
/// - Vocabulary values: merged by column, first definition for each column wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Lowest precedence first so that closer files overwrite
    for parsed in configs.iter().rev() {
        debug!(path = %parsed.path.display(), "merging config file");
        let raw = &parsed.config;
        if let Some(analyzer) = &raw.analyzer {
            apply_analyzer(&mut config.analyzer, analyzer);
        }
        if let Some(vocabulary) = &raw.vocabulary {
            apply_vocabulary(&mut config.vocabulary, vocabulary);
        }
        if let Some(terms) = &raw.terms {
            apply_terms(&mut config.terms, terms);
        }
        if let Some(params) = &raw.params {
            apply_params(&mut config.params, params);
        }
    }

    config.sources = configs.iter().map(|c| c.path.clone()).collect();
    config.config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(PathBuf::from);
    config
}

/// Applies raw analyzer settings, overwriting any present values.
fn apply_analyzer(result: &mut AnalyzerSettings, raw: &RawAnalyzerSettings) {
    if let Some(v) = &raw.grammar {
        result.grammar.clone_from(v);
    }
    if let Some(v) = &raw.candidates {
        result.candidates.clone_from(v);
    }
}

/// Applies a raw vocabulary. Values are merged per column.
fn apply_vocabulary(result: &mut VocabularySettings, raw: &RawVocabulary) {
    if let Some(v) = &raw.columns {
        result.columns.clone_from(v);
    }
    if let Some(values) = &raw.values {
        for (column, list) in values {
            result.values.insert(column.clone(), list.clone());
        }
    }
}

/// Applies raw term settings.
fn apply_terms(result: &mut TermSettings, raw: &RawTermSettings) {
    if let Some(v) = &raw.default_separator {
        result.default_separator.clone_from(v);
    }
    if let Some(v) = &raw.default_matcher {
        result.default_matcher.clone_from(v);
    }
    if let Some(v) = raw.page_size {
        result.page_size = v;
    }
}

/// Applies raw parameter settings.
fn apply_params(result: &mut ParamSettings, raw: &RawParamSettings) {
    if let Some(v) = &raw.filters {
        result.filters.clone_from(v);
    }
    if let Some(v) = &raw.sorters {
        result.sorters.clone_from(v);
    }
    if let Some(v) = &raw.offset {
        result.offset.clone_from(v);
    }
    if let Some(v) = &raw.limit {
        result.limit.clone_from(v);
    }
    if let Some(v) = raw.field_separator {
        result.field_separator = v;
    }
    if let Some(v) = raw.term_delimiter {
        result.term_delimiter = v;
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parse::parse_config_str;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let config = merge_configs(&[]);
        assert!(config.config_root.is_none());
        assert!(config.sources.is_empty());
        assert_eq!(config.terms.page_size, 25);
    }

    #[test]
    fn test_merge_single_config() {
        let config = merge_configs(&[parsed(
            "/project/.sift.toml",
            r#"
[analyzer]
grammar = "field"

[terms]
page_size = 50
"#,
        )]);
        assert_eq!(config.analyzer.grammar, "field");
        assert_eq!(config.terms.page_size, 50);
        assert_eq!(config.terms.default_separator, "and");
        assert_eq!(config.config_root, Some(PathBuf::from("/project")));
        assert_eq!(config.sources, vec![PathBuf::from("/project/.sift.toml")]);
    }

    #[test]
    fn test_merge_scalar_override() {
        let config = merge_configs(&[
            parsed("/project/sub/.sift.toml", "[terms]\npage_size = 10\n"),
            parsed(
                "/project/.sift.toml",
                "[terms]\npage_size = 99\ndefault_separator = \"or\"\n",
            ),
        ]);
        assert_eq!(config.terms.page_size, 10);
        assert_eq!(config.terms.default_separator, "or");
        assert_eq!(config.config_root, Some(PathBuf::from("/project/sub")));
    }

    #[test]
    fn test_merge_lists_replace() {
        let config = merge_configs(&[
            parsed("/a/b/.sift.toml", "[vocabulary]\ncolumns = [\"status\"]\n"),
            parsed(
                "/a/.sift.toml",
                "[vocabulary]\ncolumns = [\"owner\", \"title\"]\n",
            ),
        ]);
        assert_eq!(config.vocabulary.columns, vec!["status"]);
    }

    #[test]
    fn test_merge_values_by_column() {
        let config = merge_configs(&[
            parsed(
                "/a/b/.sift.toml",
                "[vocabulary.values]\nstatus = [\"open\"]\n",
            ),
            parsed(
                "/a/.sift.toml",
                "[vocabulary.values]\nstatus = [\"closed\"]\npriority = [\"high\"]\n",
            ),
        ]);
        assert_eq!(config.vocabulary.values["status"], vec!["open"]);
        assert_eq!(config.vocabulary.values["priority"], vec!["high"]);
    }

    #[test]
    fn test_merge_params() {
        let config = merge_configs(&[
            parsed("/a/b/.sift.toml", "[params]\nterm_delimiter = \";\"\n"),
            parsed(
                "/a/.sift.toml",
                "[params]\nfilters = \"q\"\nterm_delimiter = \"|\"\n",
            ),
        ]);
        assert_eq!(config.params.filters, "q");
        assert_eq!(config.params.sorters, "sort");
        assert_eq!(config.params.term_delimiter, ';');
        assert_eq!(config.params.field_separator, ':');
    }
}
