//! Term lists built from phrases and edited the way a query builder edits them.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use sift_phrase::{GrammarKind, PhraseAnalyzer};
use sift_terms::{Operator, QueryModel, QueryTerm, QueryTermList, TermKind, terms_from_tokens};

fn matcher(column: &str, operator: Operator, value: &str) -> QueryTerm {
    QueryTerm::matcher(column, operator, value.to_string())
}

fn stripped(list: &QueryTermList) -> Vec<QueryTerm> {
    list.terms().iter().map(QueryTerm::without_id).collect()
}

#[test]
fn test_matcher_phrase_to_terms() {
    let mut analyzer = PhraseAnalyzer::for_grammar(GrammarKind::Matcher);
    let analysis = analyzer.parse("name like foo or status = bar", 0);
    let terms = terms_from_tokens(&analysis.tokens);

    assert_eq!(
        terms,
        vec![
            matcher("name", Operator::Like, "foo"),
            QueryTerm::separator(Operator::Or),
            matcher("status", Operator::Eq, "bar"),
        ]
    );

    let list: QueryTermList = QueryTermList::from_phrase("name like foo or status = bar");
    assert_eq!(stripped(&list), terms);
    assert!(list.valid());
}

#[test]
fn test_insert_then_remove_first() {
    let mut list = QueryTermList::filter_list();
    list.insert(matcher("a", Operator::Like, "1"), false)
        .insert(matcher("b", Operator::Like, "2"), true);

    assert_eq!(
        stripped(&list),
        vec![
            matcher("a", Operator::Like, "1"),
            QueryTerm::separator(Operator::And),
            matcher("b", Operator::Like, "2"),
        ]
    );

    list.remove(&matcher("a", Operator::Like, "1"));
    assert_eq!(stripped(&list), vec![matcher("b", Operator::Like, "2")]);
    assert!(list.valid());
}

#[test]
fn test_remove_by_id() {
    let mut list = QueryTermList::filter_list();
    list.insert(matcher("a", Operator::Like, "1"), false)
        .insert(matcher("a", Operator::Like, "1"), false);
    let second = list.terms()[2].clone();

    list.remove(&second);
    assert_eq!(list.count(), 1);
    assert_ne!(list.terms()[0].id, second.id);
}

#[test]
fn test_typing_session() {
    let mut list = QueryTermList::filter_list();
    list.with_placeholder(Some("status".to_string()))
        .with_matcher(Operator::Eq)
        .write("open".to_string())
        .with_placeholder(Some("priority".to_string()))
        .write("high".to_string())
        .with_separator(Operator::Or)
        .with_placeholder(Some("assignee".to_string()))
        .write("me".to_string());

    assert_eq!(
        list.to_phrase(),
        "status = open and priority = high or assignee = me"
    );
    assert!(list.valid());

    let kinds: Vec<TermKind> = list.terms().iter().map(QueryTerm::kind).collect();
    assert_eq!(
        kinds,
        vec![
            TermKind::Matcher,
            TermKind::Separator,
            TermKind::Matcher,
            TermKind::Separator,
            TermKind::Matcher,
        ]
    );
}

#[test]
fn test_model_from_phrase_to_query_string() {
    let mut model = QueryModel::new().with_limit(Some(25));
    model.filters = QueryTermList::from_phrase("title like \"war and peace\" and year >= 1869");
    model
        .sorters
        .insert(QueryTerm::sorter("year", "desc".to_string()), false);

    let query = model.request().to_query_string();
    assert_eq!(
        query,
        "query=title%3Alike%3Awar+and+peace%2Cand%2Cyear%3A%3E%3D%3A1869&sort=year%3Adesc&offset=0&limit=25"
    );

    let decoded = QueryModel::from_query_string(&query);
    assert_eq!(decoded.request(), model.request());
    assert_eq!(decoded.filters.to_phrase(), model.filters.to_phrase());
}
