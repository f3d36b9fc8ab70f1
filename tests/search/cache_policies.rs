//! Spec §4.5/§9: batch-scoped and LRU cache policies are both admissible —
//! `get_*` observable results must agree regardless of which is active.

use boolsearch::build::BuildOptions;
use boolsearch::cache::CachePolicy;

use crate::common::build_fixture;

const CORPUS: &str = "\
##TITLE## Apple
apple ant anchor
##TITLE## Banana
banana berry
##TITLE## Cherry
cherry citrus
##TITLE## Date
date dragonfruit
";

#[test]
fn lru_and_batch_policies_agree_on_query_results() {
    let mut batch = build_fixture(CORPUS, "", BuildOptions::default(), CachePolicy::Batch);
    let mut lru = build_fixture(
        CORPUS,
        "",
        BuildOptions::default(),
        CachePolicy::Lru { capacity: 1 },
    );

    for query in ["apple", "banana|cherry", "~date", "\"citrus\""] {
        assert_eq!(
            batch.eval(query),
            lru.eval(query),
            "policies diverged on query {query:?}"
        );
    }
}

#[test]
fn small_lru_capacity_still_answers_correctly_across_many_prefixes() {
    // Capacity 1 forces eviction between every one of the four distinct
    // prefixes this corpus touches; the evaluator's contract ("cached value
    // or empty") means a word faulted back in on its own query must still
    // resolve correctly even though earlier prefixes were evicted.
    let mut lru = build_fixture(
        CORPUS,
        "",
        BuildOptions::default(),
        CachePolicy::Lru { capacity: 1 },
    );
    assert_eq!(lru.titles("apple"), vec!["Apple".to_string()]);
    assert_eq!(lru.titles("banana"), vec!["Banana".to_string()]);
    assert_eq!(lru.titles("cherry"), vec!["Cherry".to_string()]);
    assert_eq!(lru.titles("date"), vec!["Date".to_string()]);
}

#[test]
fn clear_batch_drops_cached_results_under_the_batch_policy() {
    let mut f = build_fixture(CORPUS, "", BuildOptions::default(), CachePolicy::Batch);
    assert_eq!(f.eval("apple"), vec![1]);
    f.store.clear_batch();
    // Without re-loading shards the word is no longer cached; the
    // evaluator's contract treats that as empty, not an error.
    assert!(boolsearch::query::evaluate(&f.store, &boolsearch::query::Query::parse("apple").unwrap()).is_empty());
}
