//! The query model: filters, sorters, pagination and free-form parameters.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::TermError,
    list::QueryTermList,
    params::ParamCodec,
    term::{QueryTerm, TermKind},
};

/// Ordered string multimap of extra request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` has any value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Adds a value for `key` after any existing ones.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Replaces every value for `key` with `value`, keeping the position of the first one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.0[index].1 = value;
                let mut seen = 0;
                self.0.retain(|(k, _)| {
                    if *k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.0.push((key, value)),
        }
        self
    }

    /// Removes every value for `key`, returning whether there were any.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|(k, _)| k != key);
        self.0.len() != before
    }

    /// Key / value pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The serializable projection of a [`QueryModel`]: committed terms only, no ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Number of results to skip.
    #[serde(default)]
    pub offset: usize,
    /// Maximum number of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Matchers joined by separators.
    #[serde(default)]
    pub filters: Vec<QueryTerm>,
    /// Sort terms.
    #[serde(default)]
    pub sorters: Vec<QueryTerm>,
    /// Extra parameters.
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
}

impl QueryRequest {
    /// Flat parameters under the default names.
    pub fn to_params(&self) -> Vec<(String, String)> {
        ParamCodec::default().encode(self)
    }

    /// URL query string under the default names.
    pub fn to_query_string(&self) -> String {
        ParamCodec::default().encode_query_string(self)
    }
}

/// Filters, sorters, pagination and extra parameters for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryModel {
    /// Number of results to skip.
    pub offset: usize,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Filter terms.
    pub filters: QueryTermList,
    /// Sort terms.
    pub sorters: QueryTermList,
    /// Extra parameters passed through untouched.
    pub parameters: Parameters,
}

impl Default for QueryModel {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryModel {
    /// An empty model with no limit.
    pub fn new() -> Self {
        Self {
            offset: 0,
            limit: None,
            filters: QueryTermList::filter_list(),
            sorters: QueryTermList::sorter_list(),
            parameters: Parameters::new(),
        }
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Decodes flat parameters under the default names. Never fails.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        ParamCodec::default().decode(params)
    }

    /// Decodes a URL query string under the default names. Never fails.
    pub fn from_query_string(query: &str) -> Self {
        ParamCodec::default().decode_query_string(query)
    }

    /// Projects the committed state.
    ///
    /// Matchers and sorters without a value are dropped, and so is a separator such a drop
    /// leaves without a matcher on one side.
    pub fn request(&self) -> QueryRequest {
        QueryRequest {
            offset: self.offset,
            limit: self.limit,
            filters: committed_filters(self.filters.terms()),
            sorters: self
                .sorters
                .sorters()
                .filter(|t| t.value.is_some())
                .map(QueryTerm::without_id)
                .collect(),
            parameters: self.parameters.clone(),
        }
    }

    /// Whether both lists are well formed.
    pub fn valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks filter alternation and that every sorter is a sort term.
    pub fn validate(&self) -> Result<(), TermError> {
        self.filters.validate()?;
        self.sorters.validate()
    }

    /// An empty model keeping the limit, list defaults and parameters.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            offset: 0,
            limit: self.limit,
            filters: self.filters.cleared(),
            sorters: self.sorters.cleared(),
            parameters: self.parameters.clone(),
        }
    }

    /// An independent deep copy.
    #[must_use]
    pub fn rebuild(&self) -> Self {
        self.clone()
    }
}

/// Committed filter terms with orphaned separators removed.
fn committed_filters(terms: &[QueryTerm]) -> Vec<QueryTerm> {
    let mut out: Vec<QueryTerm> = Vec::with_capacity(terms.len());
    let mut pending = None;
    for term in terms {
        match term.kind() {
            TermKind::Separator => {
                if out.last().is_some_and(QueryTerm::is_matcher) {
                    pending = Some(term.without_id());
                }
            }
            TermKind::Matcher if term.value.is_some() => {
                if let Some(separator) = pending.take() {
                    out.push(separator);
                }
                out.push(term.without_id());
            }
            TermKind::Matcher | TermKind::Sorter => {
                debug!(column = ?term.column, "leaving uncommitted term out of the request");
            }
        }
    }
    out
}
