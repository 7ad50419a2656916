//! Editable term lists with a cursor and a placeholder.
//!
//! A filter list always alternates `matcher (separator matcher)*`. Every mutating method
//! keeps it that way:
//!
//! - a separator is synthesized wherever two matchers would touch
//! - a separator inserted next to another separator replaces it
//! - a separator inserted after the last matcher is held and used to join the next matcher
//! - removing a term also removes the separator it leaves dangling
//!
//! A sorter list holds sorters only. Terms of the wrong kind are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};
use sift_phrase::Lexer;
use tracing::debug;

use crate::{
    error::TermError,
    phrase::{render, render_sorter, terms_from_tokens},
    term::{Operator, QueryTerm, TermId, TermKind},
};

/// Which terms a list holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Matchers joined by separators.
    Filter,
    /// Sorters.
    Sorter,
}

impl ListKind {
    /// Whether a list of this kind can hold a term of `kind`.
    pub fn accepts(self, kind: TermKind) -> bool {
        match self {
            Self::Filter => kind != TermKind::Sorter,
            Self::Sorter => kind == TermKind::Sorter,
        }
    }

    /// The kind of term a placeholder in this list becomes.
    pub fn criterion(self) -> TermKind {
        match self {
            Self::Filter => TermKind::Matcher,
            Self::Sorter => TermKind::Sorter,
        }
    }

    /// Operator given to new terms unless configured otherwise.
    fn default_operator(self) -> Operator {
        match self {
            Self::Filter => Operator::Like,
            Self::Sorter => Operator::OrderBy,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Filter => "filter",
            Self::Sorter => "sorter",
        })
    }
}

/// An ordered list of terms with a cursor and an optional uncommitted placeholder.
///
/// Mutating methods return `&mut Self` so edits chain. Cloning (or [`rebuild`]) gives an
/// independent copy.
///
/// [`rebuild`]: Self::rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTermList<V = String> {
    /// What the list holds.
    kind: ListKind,
    /// Committed terms.
    terms: Vec<QueryTerm<V>>,
    /// Index of the current term; `None` places the cursor before the first term.
    cursor: Option<usize>,
    /// What the user is about to type.
    placeholder: Option<QueryTerm<V>>,
    /// Separator synthesized between matchers.
    separator: Operator,
    /// Operator given to placeholders.
    matcher: Operator,
    /// Separator to use for the next join after the last matcher.
    pending: Option<Operator>,
    /// Placeholder set aside by the first insert, restored once the list is empty again.
    parked: Option<QueryTerm<V>>,
    /// Next id to hand out.
    next_id: u64,
}

impl<V: Clone + PartialEq> Default for QueryTermList<V> {
    fn default() -> Self {
        Self::filter_list()
    }
}

impl<V: Clone + PartialEq> QueryTermList<V> {
    /// Creates an empty list holding a blank placeholder.
    pub fn new(kind: ListKind) -> Self {
        let matcher = kind.default_operator();
        Self {
            kind,
            terms: Vec::new(),
            cursor: None,
            placeholder: Some(blank(matcher)),
            separator: Operator::And,
            matcher,
            pending: None,
            parked: None,
            next_id: 1,
        }
    }

    /// An empty filter list.
    pub fn filter_list() -> Self {
        Self::new(ListKind::Filter)
    }

    /// An empty sorter list.
    pub fn sorter_list() -> Self {
        Self::new(ListKind::Sorter)
    }

    /// Parses a matcher phrase such as `name like foo or status = bar` into a filter list.
    ///
    /// Triples with an unknown operator are skipped; the rest is inserted in order.
    pub fn from_phrase(text: &str) -> Self
    where
        V: From<String>,
    {
        let tokens = Lexer::matcher_phrase().tokenize(text);
        let mut list = Self::filter_list();
        for term in terms_from_tokens(&tokens) {
            list.insert(
                QueryTerm {
                    id: None,
                    column: term.column,
                    operator: term.operator,
                    value: term.value.map(V::from),
                },
                false,
            );
        }
        list
    }

    /// Renders the list as phrase text.
    ///
    /// Filter lists produce a matcher phrase that [`from_phrase`] parses back to the same
    /// terms, provided every matcher has a whitespace-free column. Sorter lists produce
    /// comma-separated `column direction` pairs.
    ///
    /// [`from_phrase`]: Self::from_phrase
    pub fn to_phrase(&self) -> String
    where
        V: fmt::Display,
    {
        match self.kind {
            ListKind::Filter => self.terms.iter().map(render).collect::<Vec<_>>().join(" "),
            ListKind::Sorter => self
                .terms
                .iter()
                .map(render_sorter)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// What the list holds.
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Committed terms, in order.
    pub fn terms(&self) -> &[QueryTerm<V>] {
        &self.terms
    }

    /// Index of the current term.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The term under the cursor.
    pub fn current(&self) -> Option<&QueryTerm<V>> {
        self.cursor.and_then(|index| self.terms.get(index))
    }

    /// The uncommitted placeholder.
    pub fn placeholder(&self) -> Option<&QueryTerm<V>> {
        self.placeholder.as_ref()
    }

    /// Separator synthesized between matchers.
    pub fn separator(&self) -> Operator {
        self.separator
    }

    /// Operator given to placeholders.
    pub fn matcher(&self) -> Operator {
        self.matcher
    }

    /// Number of committed terms, separators included.
    pub fn count(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term has been committed.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Matcher terms, in order.
    pub fn matchers(&self) -> impl Iterator<Item = &QueryTerm<V>> {
        self.terms.iter().filter(|t| t.is_matcher())
    }

    /// Sorter terms, in order.
    pub fn sorters(&self) -> impl Iterator<Item = &QueryTerm<V>> {
        self.terms.iter().filter(|t| t.is_sorter())
    }

    /// The term with `id`.
    pub fn find_by_id(&self, id: TermId) -> Option<&QueryTerm<V>> {
        self.terms.iter().find(|t| t.id == Some(id))
    }

    /// The first term on `column`.
    pub fn find_by_column(&self, column: &str) -> Option<&QueryTerm<V>> {
        self.terms
            .iter()
            .find(|t| t.column.as_deref() == Some(column))
    }

    /// Whether any term is on `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.find_by_column(column).is_some()
    }

    /// Inserts `term` after the cursor and moves the cursor onto it.
    ///
    /// Separators are synthesized wherever alternation needs one, whatever
    /// `with_separator_before` says; the flag only records whether the caller expected it.
    /// Inserting the first real term parks the placeholder until the list is empty again.
    /// An empty column is stored as no column.
    pub fn insert(&mut self, term: QueryTerm<V>, with_separator_before: bool) -> &mut Self {
        let kind = term.kind();
        if !self.kind.accepts(kind) {
            debug!(%kind, list = %self.kind, "ignoring term the list cannot hold");
            return self;
        }
        let was_empty = self.terms.is_empty();
        let at = self.cursor.map_or(0, |index| index + 1);
        if kind == TermKind::Separator {
            self.insert_separator(term, at);
        } else {
            self.insert_criterion(term, at, with_separator_before);
        }
        if was_empty && !self.terms.is_empty() {
            self.parked = self.placeholder.take();
        }
        self
    }

    /// Removes `term` (matched by id, or by content when it has none).
    ///
    /// A separator between two matchers cannot be removed on its own. Removing the last
    /// term restores the placeholder the first insert parked, or a blank one.
    pub fn remove(&mut self, term: &QueryTerm<V>) -> &mut Self {
        self.pending = None;
        let Some(index) = self.position(term) else {
            debug!("term to remove is not in the list");
            return self;
        };
        if self.joins_matchers(index) {
            debug!(index, "separator between two matchers is not removable");
            return self;
        }

        let before_start = self.cursor.is_none();
        let cursor_id = self.current().and_then(|t| t.id);
        self.terms.remove(index);

        if index == 0 {
            if self.terms.first().is_some_and(QueryTerm::is_separator) {
                self.terms.remove(0);
            }
        } else if self.terms[index - 1].is_separator()
            && self.terms.get(index).is_none_or(QueryTerm::is_separator)
        {
            self.terms.remove(index - 1);
        }

        if self.terms.is_empty() {
            self.cursor = None;
            if self.placeholder.is_none() {
                let mut placeholder = self.parked.take().unwrap_or_else(|| blank(self.matcher));
                placeholder.operator = self.matcher;
                self.placeholder = Some(placeholder);
            }
        } else if !before_start {
            let last = self.terms.len() - 1;
            self.cursor = cursor_id
                .and_then(|id| self.terms.iter().position(|t| t.id == Some(id)))
                .or(Some(index.saturating_sub(1).min(last)));
        }
        self
    }

    /// Moves the cursor onto `term`, inserting it when it is not in the list.
    pub fn move_to(&mut self, term: QueryTerm<V>) -> &mut Self {
        match self.position(&term) {
            Some(index) => {
                self.pending = None;
                self.cursor = Some(index);
                self
            }
            None => self.insert(term, true),
        }
    }

    /// Moves the cursor before the first term, so the next insert goes to the front.
    pub fn move_to_start(&mut self) -> &mut Self {
        self.pending = None;
        self.cursor = None;
        self
    }

    /// Commits `value`: promotes the placeholder into a real term, or edits the current term.
    pub fn write(&mut self, value: V) -> &mut Self {
        if let Some(mut term) = self.placeholder.take() {
            term.value = Some(value);
            return self.insert(term, true);
        }
        match self.cursor {
            Some(index) if self.terms[index].is_separator() => {
                debug!(index, "separators carry no value");
            }
            Some(index) => self.terms[index].value = Some(value),
            None => {
                debug!("nothing to write into; inserting a new term");
                let mut term = blank(self.matcher);
                term.value = Some(value);
                self.insert(term, true);
            }
        }
        self
    }

    /// Sets an uncommitted placeholder on `column`.
    pub fn with_placeholder(&mut self, column: Option<String>) -> &mut Self {
        let mut term = blank(self.matcher);
        term.column = column;
        self.placeholder = Some(term);
        self
    }

    /// Drops the placeholder.
    pub fn without_placeholder(&mut self) -> &mut Self {
        self.placeholder = None;
        self.parked = None;
        self
    }

    /// Sets the separator synthesized between matchers.
    pub fn with_separator(&mut self, operator: Operator) -> &mut Self {
        if operator.kind() == TermKind::Separator {
            self.separator = operator;
        } else {
            debug!(%operator, "not a separator");
        }
        self
    }

    /// Sets the operator for new terms, updating the placeholder or else the current term.
    pub fn with_matcher(&mut self, operator: Operator) -> &mut Self {
        let criterion = self.kind.criterion();
        if operator.kind() != criterion {
            debug!(%operator, list = %self.kind, "operator does not fit the list");
            return self;
        }
        self.matcher = operator;
        if let Some(placeholder) = &mut self.placeholder {
            placeholder.operator = operator;
        } else if let Some(index) = self.cursor
            && self.terms[index].kind() == criterion
        {
            self.terms[index].operator = operator;
        }
        self
    }

    /// Whether the list is well formed. See [`validate`](Self::validate).
    pub fn valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks term kinds and, for filter lists, matcher / separator alternation.
    pub fn validate(&self) -> Result<(), TermError> {
        for (index, term) in self.terms.iter().enumerate() {
            let found = term.kind();
            if !self.kind.accepts(found) {
                return Err(TermError::WrongKind {
                    index,
                    kind: found,
                    list: self.kind,
                });
            }
            if self.kind == ListKind::Filter {
                let expected = if index % 2 == 0 {
                    TermKind::Matcher
                } else {
                    TermKind::Separator
                };
                if found != expected {
                    return Err(TermError::Alternation {
                        index,
                        expected,
                        found,
                    });
                }
            }
        }
        if let Some(last) = self.terms.last()
            && last.is_separator()
        {
            return Err(TermError::DanglingSeparator {
                index: self.terms.len() - 1,
            });
        }
        Ok(())
    }

    /// An independent copy preserving terms, cursor, placeholder and defaults.
    #[must_use]
    pub fn rebuild(&self) -> Self {
        self.clone()
    }

    /// An empty list with the same kind and defaults.
    #[must_use]
    pub fn cleared(&self) -> Self {
        let mut list = Self::new(self.kind);
        list.separator = self.separator;
        list.matcher = self.matcher;
        list.placeholder = Some(blank(self.matcher));
        list
    }

    /// Index of `term`, by id when it has one.
    fn position(&self, term: &QueryTerm<V>) -> Option<usize> {
        match term.id {
            Some(id) => self.terms.iter().position(|t| t.id == Some(id)),
            None => self.terms.iter().position(|t| t.same_as(term)),
        }
    }

    /// Whether the term at `index` is a separator with matchers on both sides.
    fn joins_matchers(&self, index: usize) -> bool {
        self.terms[index].is_separator()
            && index > 0
            && self.terms[index - 1].is_matcher()
            && self.terms.get(index + 1).is_some_and(QueryTerm::is_matcher)
    }

    /// Gives `term` an id if it has none, keeping future ids past any it brings.
    fn assign_id(&mut self, term: &mut QueryTerm<V>) {
        match term.id {
            Some(TermId(id)) => self.next_id = self.next_id.max(id.saturating_add(1)),
            None => {
                term.id = Some(TermId(self.next_id));
                self.next_id += 1;
            }
        }
    }

    /// A new separator with an id.
    fn synthesize(&mut self, operator: Operator) -> QueryTerm<V> {
        let mut term = QueryTerm::separator(operator);
        self.assign_id(&mut term);
        term
    }

    /// Places a separator at `at`, keeping alternation.
    fn insert_separator(&mut self, mut term: QueryTerm<V>, at: usize) {
        let left = at
            .checked_sub(1)
            .and_then(|i| self.terms.get(i))
            .map(QueryTerm::kind);
        let right = self.terms.get(at).map(QueryTerm::kind);
        match (left, right) {
            (Some(TermKind::Separator), _) => self.replace(at - 1, term),
            (_, Some(TermKind::Separator)) => self.replace(at, term),
            (None, _) => debug!("dropping separator at the start of the list"),
            (Some(_), None) => {
                debug!(operator = %term.operator, "holding separator for the next matcher");
                self.pending = Some(term.operator);
            }
            (Some(_), Some(_)) => {
                self.assign_id(&mut term);
                self.terms.insert(at, term);
                self.cursor = Some(at);
            }
        }
    }

    /// Swaps the separator at `index` for `term`, keeping its id unless `term` brings one.
    fn replace(&mut self, index: usize, mut term: QueryTerm<V>) {
        term.id = term.id.or(self.terms[index].id);
        self.assign_id(&mut term);
        self.terms[index] = term;
        self.cursor = Some(index);
    }

    /// Places a matcher or sorter at `at`, joining it to neighbouring matchers.
    fn insert_criterion(&mut self, mut term: QueryTerm<V>, at: usize, with_separator_before: bool) {
        self.assign_id(&mut term);
        if term.column.as_deref() == Some("") {
            term.column = None;
        }
        if self.kind == ListKind::Sorter {
            self.terms.insert(at, term);
            self.cursor = Some(at);
            return;
        }

        let pending = self.pending.take();
        let after_matcher = at > 0 && self.terms[at - 1].is_matcher();
        let before_matcher = self.terms.get(at).is_some_and(QueryTerm::is_matcher);
        let mut index = at;
        if after_matcher {
            if !with_separator_before {
                debug!(index, "synthesizing separator between adjacent matchers");
            }
            let separator = self.synthesize(pending.unwrap_or(self.separator));
            self.terms.insert(index, separator);
            index += 1;
        }
        self.terms.insert(index, term);
        if before_matcher {
            let separator = self.synthesize(self.separator);
            self.terms.insert(index + 1, separator);
        }
        self.cursor = Some(index);
    }
}

/// A placeholder term carrying `operator`.
fn blank<V>(operator: Operator) -> QueryTerm<V> {
    QueryTerm {
        id: None,
        column: None,
        operator,
        value: None,
    }
}
