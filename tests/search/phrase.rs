//! The Phrase Evaluator's end-to-end scenario (spec §8): `"quick fox"`
//! matches only the document where those two lemmas are adjacent;
//! `"quick brown fox"` matches only the document with all three adjacent.

use crate::common::build_default;

const CORPUS: &str = "\
##TITLE## X
the quick brown fox
##TITLE## Y
quick fox
";

#[test]
fn two_term_phrase_matches_only_its_document() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.titles("\"quick fox\""), vec!["Y".to_string()]);
}

#[test]
fn three_term_phrase_matches_only_its_document() {
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.titles("\"quick brown fox\""), vec!["X".to_string()]);
}

#[test]
fn non_adjacent_terms_do_not_match_as_a_phrase() {
    // "the" and "fox" both appear in document X but are not adjacent.
    let mut f = build_default(CORPUS, "");
    assert!(f.eval("\"the fox\"").is_empty());
}

#[test]
fn phrase_with_a_term_missing_entirely_matches_nothing() {
    let mut f = build_default(CORPUS, "");
    assert!(f.eval("\"quick zebra\"").is_empty());
}

#[test]
fn negation_inside_a_phrase_is_stripped_not_rejected() {
    // Spec §9: negation inside a phrase is ignored rather than given a
    // negated-phrase semantics; "~quick fox" behaves exactly like "quick fox".
    let mut f = build_default(CORPUS, "");
    assert_eq!(f.titles("\"~quick fox\""), vec!["Y".to_string()]);
}

#[test]
fn empty_phrase_query_is_a_parse_error() {
    assert!(boolsearch::query::Query::parse("\"\"").is_err());
}

#[test]
fn phrase_words_repeated_across_documents_rank_by_document_order() {
    let corpus = "\
##TITLE## First
alpha beta
##TITLE## Second
alpha beta
##TITLE## Third
beta alpha
";
    let mut f = build_default(corpus, "");
    assert_eq!(
        f.titles("\"alpha beta\""),
        vec!["First".to_string(), "Second".to_string()]
    );
}
