//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Phrase analyzer section.
    pub analyzer: Option<RawAnalyzerSettings>,
    /// Column vocabulary section.
    pub vocabulary: Option<RawVocabulary>,
    /// Term list defaults section.
    pub terms: Option<RawTermSettings>,
    /// Flat parameter encoding section.
    pub params: Option<RawParamSettings>,
}

/// Raw analyzer settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAnalyzerSettings {
    /// Grammar name: `word`, `field` or `matcher`.
    pub grammar: Option<String>,
    /// Fixed suggestion candidates. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub candidates: Option<Vec<String>>,
}

/// Raw vocabulary of known columns and their values.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawVocabulary {
    /// Column names. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub columns: Option<Vec<String>>,
    /// Known values per column.
    pub values: Option<BTreeMap<String, Vec<String>>>,
}

/// Raw term list defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTermSettings {
    /// Separator keyword synthesized between matchers.
    pub default_separator: Option<String>,
    /// Matcher keyword given to new placeholders.
    pub default_matcher: Option<String>,
    /// Page size used as the query limit.
    pub page_size: Option<usize>,
}

/// Raw parameter encoding settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawParamSettings {
    /// Parameter name of the filter list.
    pub filters: Option<String>,
    /// Parameter name of the sorter list.
    pub sorters: Option<String>,
    /// Parameter name of the offset.
    pub offset: Option<String>,
    /// Parameter name of the limit.
    pub limit: Option<String>,
    /// Character separating the fields of one term.
    pub field_separator: Option<char>,
    /// Character separating terms.
    pub term_delimiter: Option<char>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.analyzer.is_none());
        assert!(config.vocabulary.is_none());
        assert!(config.terms.is_none());
        assert!(config.params.is_none());
    }

    #[test]
    fn test_parse_analyzer() {
        let config = parse(
            r#"
[analyzer]
grammar = "matcher"
candidates = ["howler.analytic", "howler.assignment"]
"#,
        );
        let analyzer = config.analyzer.unwrap();
        assert_eq!(analyzer.grammar.as_deref(), Some("matcher"));
        assert_eq!(
            analyzer.candidates,
            Some(vec![
                "howler.analytic".to_string(),
                "howler.assignment".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_single_candidate() {
        let config = parse("[analyzer]\ncandidates = \"only\"\n");
        assert_eq!(
            config.analyzer.unwrap().candidates,
            Some(vec!["only".to_string()])
        );
    }

    #[test]
    fn test_parse_vocabulary() {
        let config = parse(
            r#"
[vocabulary]
columns = ["status", "priority"]

[vocabulary.values]
status = ["open", "closed"]
priority = ["low", "high"]
"#,
        );
        let vocabulary = config.vocabulary.unwrap();
        assert_eq!(
            vocabulary.columns,
            Some(vec!["status".to_string(), "priority".to_string()])
        );
        let values = vocabulary.values.unwrap();
        assert_eq!(values["status"], vec!["open", "closed"]);
        assert_eq!(values["priority"], vec!["low", "high"]);
    }

    #[test]
    fn test_parse_single_column() {
        let config = parse("[vocabulary]\ncolumns = \"status\"\n");
        let vocabulary = config.vocabulary.unwrap();
        assert_eq!(vocabulary.columns, Some(vec!["status".to_string()]));
        assert!(vocabulary.values.is_none());
    }

    #[test]
    fn test_parse_partial_terms() {
        let config = parse("[terms]\npage_size = 50\n");
        let terms = config.terms.unwrap();
        assert_eq!(terms.page_size, Some(50));
        assert!(terms.default_separator.is_none());
        assert!(terms.default_matcher.is_none());
    }

    #[test]
    fn test_parse_params() {
        let config = parse(
            r#"
[params]
filters = "q"
field_separator = "|"
term_delimiter = ";"
"#,
        );
        let params = config.params.unwrap();
        assert_eq!(params.filters.as_deref(), Some("q"));
        assert_eq!(params.field_separator, Some('|'));
        assert_eq!(params.term_delimiter, Some(';'));
        assert!(params.sorters.is_none());
    }

    #[test]
    fn test_parse_multi_char_separator_error() {
        let result = parse_config_str(
            "[params]\nfield_separator = \"::\"\n",
            Path::new("test.toml"),
        );
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_str("this is not valid toml [[[", Path::new("test.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_unknown_fields_ignored() {
        let config = parse(
            r#"
[terms]
page_size = 5
unknown_field = "ignored"

[unknown_section]
foo = "bar"
"#,
        );
        assert_eq!(config.terms.unwrap().page_size, Some(5));
    }

    #[test]
    fn test_parse_wrong_type_error() {
        let result = parse_config_str(
            "[terms]\npage_size = \"not a number\"\n",
            Path::new("test.toml"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_file_not_found() {
        let result = parse_config_file(Path::new("/nonexistent/path/.sift.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_parse_root() {
        assert_eq!(parse("root = true\n").root, Some(true));
        assert_eq!(parse("root = false\n").root, Some(false));
        assert_eq!(parse("[terms]\npage_size = 5\n").root, None);
    }

    #[test]
    fn test_is_root_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".sift.toml");

        fs::write(&config_path, "root = true\n").unwrap();
        assert!(is_root_config(&config_path));

        fs::write(&config_path, "root = false\n").unwrap();
        assert!(!is_root_config(&config_path));

        fs::write(&config_path, "[terms]\npage_size = 5\n").unwrap();
        assert!(!is_root_config(&config_path));

        assert!(!is_root_config(Path::new("/nonexistent/.sift.toml")));
    }
}
