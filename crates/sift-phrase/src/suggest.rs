//! Completion candidates for an analysis.

use std::collections::BTreeMap;

use crate::{
    analyzer::PhraseAnalysis,
    keywords::{BOOLEAN_OPERATORS, MATCHER_OPERATORS, SEPARATORS},
    token::{Token, TokenKind},
};

/// Produces completion candidates for the text being typed.
///
/// Order is significant; duplicates are not removed.
pub trait Suggester {
    /// Candidates for the completion site described by `analysis`.
    fn suggest(&self, analysis: &PhraseAnalysis) -> Vec<String>;
}

/// Filters `candidates` by a case-insensitive substring match on `typed`.
///
/// Returns every candidate when `typed` is empty or nothing matches, so a caller can tell
/// "no match" from "nothing typed" by comparing lengths.
pub fn filter_candidates<S: AsRef<str>>(candidates: &[S], typed: &str) -> Vec<String> {
    let all = || candidates.iter().map(|c| c.as_ref().to_string()).collect();
    if typed.is_empty() {
        return all();
    }
    let needle = typed.to_lowercase();
    let matched: Vec<String> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| c.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect();
    if matched.is_empty() { all() } else { matched }
}

/// Suggests from one fixed list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSuggester {
    /// The candidate list, in display order.
    candidates: Vec<String>,
}

impl CandidateSuggester {
    /// Creates a suggester over `candidates`.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// The unfiltered candidate list.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

impl Suggester for CandidateSuggester {
    fn suggest(&self, analysis: &PhraseAnalysis) -> Vec<String> {
        filter_candidates(&self.candidates, &analysis.suggest.value)
    }
}

/// Suggests column names, keywords or column values depending on what is being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularySuggester {
    /// Known columns / fields.
    columns: Vec<String>,
    /// Known values per column.
    values: BTreeMap<String, Vec<String>>,
    /// Candidates for plain words; columns are used when empty.
    fallback: Vec<String>,
}

/// The slot a completion fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot<'a> {
    /// A field or column name.
    Column,
    /// A matcher comparator.
    Comparator,
    /// A boolean operator.
    Operator,
    /// A matcher separator.
    Separator,
    /// A value of the named column, if known.
    Value(Option<&'a str>),
    /// Anything else.
    Other,
}

impl VocabularySuggester {
    /// Creates a suggester over known column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Adds the known values of `column`.
    #[must_use]
    pub fn with_values<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .insert(column.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the candidates used for plain words.
    #[must_use]
    pub fn with_fallback<I, S>(mut self, fallback: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback = fallback.into_iter().map(Into::into).collect();
        self
    }

    /// Known columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Works out which slot the cursor sits in.
    fn slot<'a>(analysis: &'a PhraseAnalysis) -> Slot<'a> {
        let parent = analysis.suggest.parent.as_ref();
        let column = || parent.and_then(column_of);
        match analysis.current.as_ref().map(|t| t.kind) {
            Some(TokenKind::Field | TokenKind::Column) => Slot::Column,
            Some(TokenKind::Comparator) => Slot::Comparator,
            Some(TokenKind::Operator) => Slot::Operator,
            Some(TokenKind::Separator) => Slot::Separator,
            Some(TokenKind::Value | TokenKind::Delimiter) => Slot::Value(column()),
            Some(TokenKind::Whitespace) => match parent {
                Some(matcher) if matcher.kind == TokenKind::Matcher => {
                    if matcher.child(TokenKind::Comparator).is_some() {
                        Slot::Value(column())
                    } else {
                        Slot::Comparator
                    }
                }
                _ => Slot::Other,
            },
            _ => Slot::Other,
        }
    }

    /// Unfiltered candidates for `slot`.
    fn pool(&self, slot: Slot<'_>) -> Vec<String> {
        let keywords = |set: &[&str]| set.iter().map(|k| (*k).to_string()).collect();
        match slot {
            Slot::Column => self.columns.clone(),
            Slot::Comparator => keywords(MATCHER_OPERATORS),
            Slot::Operator => keywords(BOOLEAN_OPERATORS),
            Slot::Separator => keywords(SEPARATORS),
            Slot::Value(column) => column
                .and_then(|c| self.values.get(c))
                .cloned()
                .unwrap_or_default(),
            Slot::Other if self.fallback.is_empty() => self.columns.clone(),
            Slot::Other => self.fallback.clone(),
        }
    }
}

/// The field or column named by a composite token.
fn column_of(token: &Token) -> Option<&str> {
    token
        .child(TokenKind::Field)
        .or_else(|| token.child(TokenKind::Column))
        .map(|t| t.value.as_str())
}

impl Suggester for VocabularySuggester {
    fn suggest(&self, analysis: &PhraseAnalysis) -> Vec<String> {
        let pool = self.pool(Self::slot(analysis));
        filter_candidates(&pool, &analysis.suggest.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyzer::PhraseAnalyzer, lexer::GrammarKind};

    fn analyze(kind: GrammarKind, text: &str) -> PhraseAnalysis {
        PhraseAnalyzer::for_grammar(kind).parse(text, text.chars().count())
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let candidates = ["Status", "priority", "assignee"];
        assert_eq!(filter_candidates(&candidates, "sta"), vec!["Status"]);
        assert_eq!(filter_candidates(&candidates, "I"), vec!["priority", "assignee"]);
    }

    #[test]
    fn filter_falls_back_to_everything() {
        let candidates = ["a", "b"];
        assert_eq!(filter_candidates(&candidates, ""), vec!["a", "b"]);
        assert_eq!(filter_candidates(&candidates, "zzz"), vec!["a", "b"]);
    }

    #[test]
    fn candidate_suggester_filters_by_typed_prefix() {
        let suggester = CandidateSuggester::new(["howler.analytic", "howler.assignment"]);
        let analysis = analyze(GrammarKind::Word, "howler.anal");
        assert_eq!(suggester.suggest(&analysis), vec!["howler.analytic"]);
    }

    fn vocabulary() -> VocabularySuggester {
        VocabularySuggester::new(["status", "priority"])
            .with_values("status", ["open", "closed"])
            .with_fallback(["howler"])
    }

    #[test]
    fn columns_for_field_names() {
        let analysis = analyze(GrammarKind::Field, "pri");
        assert_eq!(vocabulary().suggest(&analysis), vec!["howler"]);
        let analysis = analyze(GrammarKind::Matcher, "pri");
        assert_eq!(vocabulary().suggest(&analysis), vec!["priority"]);
    }

    #[test]
    fn values_for_the_typed_column() {
        let analysis = analyze(GrammarKind::Field, "status:cl");
        assert_eq!(vocabulary().suggest(&analysis), vec!["closed"]);
        let analysis = analyze(GrammarKind::Matcher, "status = op");
        assert_eq!(vocabulary().suggest(&analysis), vec!["open"]);
    }

    #[test]
    fn values_after_delimiter() {
        let analysis = analyze(GrammarKind::Field, "status:");
        assert_eq!(vocabulary().suggest(&analysis), vec!["open", "closed"]);
    }

    #[test]
    fn comparators_after_column() {
        let analysis = analyze(GrammarKind::Matcher, "status ");
        assert_eq!(
            vocabulary().suggest(&analysis),
            MATCHER_OPERATORS.to_vec()
        );
        let analysis = analyze(GrammarKind::Matcher, "status i");
        assert_eq!(vocabulary().suggest(&analysis), vec!["like", "in", "is"]);
    }

    #[test]
    fn separators_and_operators() {
        let analysis = analyze(GrammarKind::Matcher, "a = 1 or");
        assert_eq!(vocabulary().suggest(&analysis), vec!["or"]);
        let analysis = analyze(GrammarKind::Field, "a:b AND");
        assert_eq!(vocabulary().suggest(&analysis), vec!["AND"]);
    }
}
