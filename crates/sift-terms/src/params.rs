//! Flat key/value encoding of query requests.
//!
//! Each list becomes one parameter whose value joins the terms with a delimiter:
//!
//! - matcher: `column<SEP>operator<SEP>value`
//! - sorter: `column<SEP>direction`
//! - separator: the bare keyword
//!
//! Occurrences of the field separator, the delimiter and `\` inside a field are escaped with
//! `\`. Decoding is the inverse and never fails: unrecognized entries are dropped and bad
//! numbers fall back to their defaults.

use tracing::debug;
use url::form_urlencoded;

use crate::{
    list::ListKind,
    model::{QueryModel, QueryRequest},
    term::{Operator, QueryTerm, TermKind},
};

/// Parameter names and separators of the flat encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamCodec {
    /// Parameter holding the filter list.
    pub filters: String,
    /// Parameter holding the sorter list.
    pub sorters: String,
    /// Parameter holding the offset.
    pub offset: String,
    /// Parameter holding the limit.
    pub limit: String,
    /// Separates the fields of one term.
    pub field_separator: char,
    /// Separates terms.
    pub term_delimiter: char,
}

impl Default for ParamCodec {
    fn default() -> Self {
        Self {
            filters: "query".to_string(),
            sorters: "sort".to_string(),
            offset: "offset".to_string(),
            limit: "limit".to_string(),
            field_separator: ':',
            term_delimiter: ',',
        }
    }
}

impl ParamCodec {
    /// Encodes `request` as ordered pairs: filters, sorters, offset, limit, then extras.
    ///
    /// Empty lists and an absent limit are left out. Extras named like one of the codec's
    /// own parameters are dropped, since decoding would read them back as terms or paging.
    pub fn encode(&self, request: &QueryRequest) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !request.filters.is_empty() {
            params.push((self.filters.clone(), self.encode_terms(&request.filters)));
        }
        if !request.sorters.is_empty() {
            params.push((self.sorters.clone(), self.encode_terms(&request.sorters)));
        }
        params.push((self.offset.clone(), request.offset.to_string()));
        if let Some(limit) = request.limit {
            params.push((self.limit.clone(), limit.to_string()));
        }
        for (key, value) in request.parameters.iter() {
            if self.reserves(key) {
                debug!(key, "dropping extra parameter that shadows a codec parameter");
                continue;
            }
            params.push((key.to_string(), value.to_string()));
        }
        params
    }

    /// Whether `key` is one of the names this codec encodes into.
    pub fn reserves(&self, key: &str) -> bool {
        [&self.filters, &self.sorters, &self.offset, &self.limit]
            .into_iter()
            .any(|name| name == key)
    }

    /// Encodes `request` as a percent-encoded URL query string.
    pub fn encode_query_string(&self, request: &QueryRequest) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.encode(request))
            .finish()
    }

    /// Decodes flat parameters into a model. Repeated list parameters are concatenated.
    pub fn decode<I, K, V>(&self, params: I) -> QueryModel
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut model = QueryModel::new();
        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key == self.filters {
                for term in self.decode_terms(value, ListKind::Filter) {
                    model.filters.insert(term, false);
                }
            } else if key == self.sorters {
                for term in self.decode_terms(value, ListKind::Sorter) {
                    model.sorters.insert(term, false);
                }
            } else if key == self.offset {
                model.offset = value.parse().unwrap_or_else(|_| {
                    debug!(value, "ignoring unparsable offset");
                    0
                });
            } else if key == self.limit {
                model.limit = value.parse().ok();
                if model.limit.is_none() {
                    debug!(value, "ignoring unparsable limit");
                }
            } else {
                model.parameters.append(key, value);
            }
        }
        model
    }

    /// Decodes a URL query string into a model.
    pub fn decode_query_string(&self, query: &str) -> QueryModel {
        let query = query.strip_prefix('?').unwrap_or(query);
        self.decode(form_urlencoded::parse(query.as_bytes()))
    }

    /// Joins encoded terms with the delimiter.
    fn encode_terms(&self, terms: &[QueryTerm]) -> String {
        terms
            .iter()
            .map(|term| self.encode_term(term))
            .collect::<Vec<_>>()
            .join(&self.term_delimiter.to_string())
    }

    /// Encodes one term.
    fn encode_term(&self, term: &QueryTerm) -> String {
        let column = || self.escape(term.column.as_deref().unwrap_or_default());
        let value = || self.escape(term.value.as_deref().unwrap_or_default());
        let sep = self.field_separator;
        match term.kind() {
            TermKind::Separator => self.escape(term.operator.as_str()),
            TermKind::Sorter => format!("{}{sep}{}", column(), value()),
            TermKind::Matcher => format!(
                "{}{sep}{}{sep}{}",
                column(),
                self.escape(term.operator.as_str()),
                value()
            ),
        }
    }

    /// Escapes the separator, the delimiter and backslashes in `text`.
    fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            if ch == '\\' || ch == self.field_separator || ch == self.term_delimiter {
                out.push('\\');
            }
            out.push(ch);
        }
        out
    }

    /// Splits a list parameter and decodes its entries, dropping the unrecognized ones.
    fn decode_terms(&self, value: &str, list: ListKind) -> Vec<QueryTerm> {
        split_escaped(value, self.term_delimiter)
            .into_iter()
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| {
                let term = self.decode_term(entry, list);
                if term.is_none() {
                    debug!(entry, %list, "dropping unrecognized entry");
                }
                term
            })
            .collect()
    }

    /// Decodes one entry of a list parameter.
    fn decode_term(&self, entry: &str, list: ListKind) -> Option<QueryTerm> {
        let fields: Vec<String> = split_escaped(entry, self.field_separator)
            .into_iter()
            .map(unescape)
            .collect();
        let column = |field: &str| (!field.is_empty()).then(|| field.to_string());
        match (list, fields.as_slice()) {
            (ListKind::Filter, [keyword]) => keyword
                .parse::<Operator>()
                .ok()
                .filter(|op| op.kind() == TermKind::Separator)
                .map(QueryTerm::separator),
            (ListKind::Filter, [col, op, value]) => {
                let operator = op
                    .parse::<Operator>()
                    .ok()
                    .filter(|parsed| parsed.kind() == TermKind::Matcher)?;
                Some(QueryTerm {
                    id: None,
                    column: column(col.as_str()),
                    operator,
                    value: Some(value.clone()),
                })
            }
            (ListKind::Sorter, [col, direction]) => Some(QueryTerm {
                id: None,
                column: column(col.as_str()),
                operator: Operator::OrderBy,
                value: Some(direction.clone()),
            }),
            _ => None,
        }
    }
}

/// Splits `text` on unescaped `delimiter`, leaving escapes in place.
fn split_escaped(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == delimiter {
            parts.push(&text[start..index]);
            start = index + ch.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Drops escaping backslashes.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.extend(chars.next()),
            _ => out.push(ch),
        }
    }
    out
}
