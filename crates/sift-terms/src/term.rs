//! Query terms and their operators.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TermError;

/// What role a term plays in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// A `column operator value` criterion.
    Matcher,
    /// A connective between matchers.
    Separator,
    /// A `column direction` ordering criterion.
    Sorter,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Matcher => "matcher",
            Self::Separator => "separator",
            Self::Sorter => "sorter",
        })
    }
}

/// Every operator a term can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Substring / pattern match.
    #[serde(rename = "like")]
    Like,
    /// Membership.
    #[serde(rename = "in")]
    In,
    /// Identity (`is null`, `is true`).
    #[serde(rename = "is")]
    Is,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Gte,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Lte,
    /// Equality.
    #[serde(rename = "=")]
    Eq,
    /// Either neighbour matches.
    #[serde(rename = "or")]
    Or,
    /// Both neighbours match.
    #[serde(rename = "and")]
    And,
    /// Sort by the column.
    #[serde(rename = "orderBy")]
    OrderBy,
}

impl Operator {
    /// All operators, matchers first.
    pub const ALL: [Self; 9] = [
        Self::Like,
        Self::In,
        Self::Is,
        Self::Gte,
        Self::Lte,
        Self::Eq,
        Self::Or,
        Self::And,
        Self::OrderBy,
    ];

    /// The keyword as written in phrases and parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::In => "in",
            Self::Is => "is",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Eq => "=",
            Self::Or => "or",
            Self::And => "and",
            Self::OrderBy => "orderBy",
        }
    }

    /// Which family the operator belongs to.
    pub fn kind(self) -> TermKind {
        match self {
            Self::Like | Self::In | Self::Is | Self::Gte | Self::Lte | Self::Eq => {
                TermKind::Matcher
            }
            Self::Or | Self::And => TermKind::Separator,
            Self::OrderBy => TermKind::Sorter,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = TermError;

    /// Parses a keyword, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TermError::UnknownOperator {
                operator: s.to_string(),
            })
    }
}

/// Identifier assigned to a term when it enters a list. Unique within that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(pub u64);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One filter or sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTerm<V = String> {
    /// Assigned by the owning list; `None` until inserted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TermId>,
    /// Column the term applies to. Separators have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// The operator.
    pub operator: Operator,
    /// Matched value, or sort direction for sorters. `None` while uncommitted.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub value: Option<V>,
}

impl<V> QueryTerm<V> {
    /// A `column operator value` criterion.
    pub fn matcher(column: impl Into<String>, operator: Operator, value: V) -> Self {
        Self {
            id: None,
            column: Some(column.into()),
            operator,
            value: Some(value),
        }
    }

    /// A connective.
    pub fn separator(operator: Operator) -> Self {
        Self {
            id: None,
            column: None,
            operator,
            value: None,
        }
    }

    /// Orders by `column` in `direction`.
    pub fn sorter(column: impl Into<String>, direction: V) -> Self {
        Self {
            id: None,
            column: Some(column.into()),
            operator: Operator::OrderBy,
            value: Some(direction),
        }
    }

    /// The term's role, from its operator.
    pub fn kind(&self) -> TermKind {
        self.operator.kind()
    }

    /// Whether this is a matcher.
    pub fn is_matcher(&self) -> bool {
        self.kind() == TermKind::Matcher
    }

    /// Whether this is a separator.
    pub fn is_separator(&self) -> bool {
        self.kind() == TermKind::Separator
    }

    /// Whether this is a sorter.
    pub fn is_sorter(&self) -> bool {
        self.kind() == TermKind::Sorter
    }

    /// Whether `other` is the same criterion, ignoring ids.
    pub fn same_as(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        self.column == other.column && self.operator == other.operator && self.value == other.value
    }

    /// A copy with the id cleared.
    #[must_use]
    pub fn without_id(&self) -> Self
    where
        V: Clone,
    {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

impl<V: fmt::Display> fmt::Display for QueryTerm<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut written = false;
        if let Some(column) = &self.column {
            f.write_str(column)?;
            written = true;
        }
        if self.operator != Operator::OrderBy {
            if written {
                f.write_str(" ")?;
            }
            f.write_str(self.operator.as_str())?;
            written = true;
        }
        if let Some(value) = &self.value {
            if written {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
