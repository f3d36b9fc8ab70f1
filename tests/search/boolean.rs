//! The Boolean Evaluator's end-to-end scenarios, as specified: a ten
//! document universe with `foo={1,2,3,4,5}`, `bar={2,3,7,8,9}`,
//! `baz={1,2,7}`, `alone={6,10}`, titles `Apple`/`Banana`/`Cherry`/`Date`
//! for documents 1-4.

use crate::common::build_default;

const CORPUS: &str = "\
##TITLE## Apple
foo baz
##TITLE## Banana
foo bar baz
##TITLE## Cherry
foo bar
##TITLE## Date
foo
##TITLE## Doc5
foo
##TITLE## Doc6
alone
##TITLE## Doc7
bar baz
##TITLE## Doc8
bar
##TITLE## Doc9
bar
##TITLE## Doc10
alone
";

#[test]
fn universe_has_ten_documents_with_the_specified_postings() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.store.document_count, 10);
    assert_eq!(f.eval("foo"), vec![1, 2, 3, 4, 5]);
    assert_eq!(f.eval("bar"), vec![2, 3, 7, 8, 9]);
    assert_eq!(f.eval("baz"), vec![1, 2, 7]);
    assert_eq!(f.eval("alone"), vec![6, 10]);
}

#[test]
fn conjunction_of_three_terms() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.eval("foo bar baz"), vec![2]);
}

#[test]
fn conjunction_with_one_negated_term() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.eval("foo ~bar baz"), vec![1]);
}

#[test]
fn conjunction_of_two_negated_terms() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.eval("~foo ~bar"), vec![6, 10]);
}

#[test]
fn disjunction_of_two_terms() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.eval("foo|alone"), vec![1, 2, 3, 4, 5, 6, 10]);
}

#[test]
fn disjunction_of_two_negated_terms_covers_the_universe() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.eval("~foo|~alone"), (1u32..=10).collect::<Vec<u32>>());
}

#[test]
fn three_clause_conjunction_with_mixed_negation_is_empty() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.eval("bar|~baz foo|baz alone"), Vec::<u32>::new());
}

#[test]
fn titles_resolve_for_the_matching_documents() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.titles("foo bar baz"), vec!["Banana".to_string()]);
    assert_eq!(f.titles("foo ~bar baz"), vec!["Apple".to_string()]);
}

#[test]
fn empty_cnf_query_yields_empty_result() {
    let mut f = build_default(CORPUS, "");
    assert!(f.eval("").is_empty());
}

#[test]
fn unknown_word_contributes_nothing_rather_than_erroring() {
    let mut f = build_default(CORPUS, "");
    assert!(f.eval("nonexistentword").is_empty());
    // AND with a real term still yields nothing, not an error.
    assert!(f.eval("foo nonexistentword").is_empty());
}
