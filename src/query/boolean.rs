// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Boolean Evaluator: CNF-with-negation over sorted-merge primitives and
//! the deferred-complement `SearchResult` algebra (spec §4.7).

use crate::index_store::IndexStore;
use crate::query::parser::{Query, Term};
use crate::types::{DocId, SearchResult};

/// Set union of two sorted, duplicate-free sequences. O(m+n).
pub fn or_merge(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Set intersection of two sorted, duplicate-free sequences. O(m+n).
pub fn and_merge(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// `a \ b`: elements of `a` not present in `b`. O(m+n).
pub fn subtract(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() {
        if j < b.len() && b[j] < a[i] {
            j += 1;
            continue;
        }
        if j < b.len() && b[j] == a[i] {
            i += 1;
            j += 1;
            continue;
        }
        out.push(a[i]);
        i += 1;
    }
    out
}

/// `{1..=document_count} \ docs`, a single linear scan over the (sorted)
/// excluded set.
pub fn subtract_from_universe(document_count: u32, docs: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity((document_count as usize).saturating_sub(docs.len()));
    let mut it = docs.iter().peekable();
    for doc_id in 1..=document_count {
        match it.peek() {
            Some(&&d) if d == doc_id => {
                it.next();
            }
            _ => out.push(doc_id),
        }
    }
    out
}

/// `merge_or`: combine two [`SearchResult`]s under OR, pushing negation
/// outward via the identities in spec §4.7.
pub fn merge_or(a: SearchResult, b: SearchResult) -> SearchResult {
    match (a.negated, b.negated) {
        (true, true) => SearchResult::negative(and_merge(&a.docs, &b.docs)), // ¬a∨¬b ≡ ¬(a∧b)
        (true, false) => SearchResult::negative(subtract(&a.docs, &b.docs)), // ¬a∨b ≡ ¬(a\b)
        (false, true) => SearchResult::negative(subtract(&b.docs, &a.docs)), // a∨¬b ≡ ¬(b\a)
        (false, false) => SearchResult::positive(or_merge(&a.docs, &b.docs)),
    }
}

/// `merge_and`: combine two [`SearchResult`]s under AND, via the identities
/// in spec §4.7.
pub fn merge_and(a: SearchResult, b: SearchResult) -> SearchResult {
    match (a.negated, b.negated) {
        (true, true) => SearchResult::negative(or_merge(&a.docs, &b.docs)), // ¬a∧¬b ≡ ¬(a∨b)
        (true, false) => SearchResult::positive(subtract(&b.docs, &a.docs)), // ¬a∧b ≡ b\a
        (false, true) => SearchResult::positive(subtract(&a.docs, &b.docs)), // a∧¬b ≡ a\b
        (false, false) => SearchResult::positive(and_merge(&a.docs, &b.docs)),
    }
}

/// `normalize(w) = morph(lower(w)) ∨ [lower(w)]`: base forms via the
/// Morphology Store, falling back to the lowered surface form itself when
/// absent.
fn normalize(store: &IndexStore, word: &str) -> Vec<String> {
    let lower = word.to_lowercase();
    crate::morphology::lookup(&store.morphology_cache, &lower)
}

/// `search_term`: OR-union of `nonpositional(b)` across every base form `b`
/// of `term`'s word, tagged with the term's own negation.
fn search_term(store: &IndexStore, term: &Term) -> SearchResult {
    let bases = normalize(store, &term.word);
    let docs = bases
        .iter()
        .map(|b| store.get_nonpositional(b))
        .fold(Vec::new(), |acc, docs| or_merge(&acc, &docs));
    SearchResult {
        docs,
        negated: term.negated,
    }
}

/// `search_clause`: fold each term's result with `merge_or`.
fn search_clause(store: &IndexStore, clause: &[Term]) -> SearchResult {
    clause
        .iter()
        .map(|t| search_term(store, t))
        .fold(SearchResult::positive(Vec::new()), merge_or)
}

/// `search_cnf`: evaluate each clause, sort by ascending `|docs|` to shrink
/// intermediates early, then fold with `merge_and`.
pub fn search_cnf(store: &IndexStore, clauses: &[Vec<Term>]) -> SearchResult {
    if clauses.is_empty() {
        return SearchResult::positive(Vec::new());
    }

    let mut results: Vec<SearchResult> = clauses.iter().map(|c| search_clause(store, c)).collect();
    results.sort_by_key(|r| r.docs.len());

    let mut iter = results.into_iter();
    let first = iter.next().expect("clauses is non-empty");
    iter.fold(first, merge_and)
}

/// Evaluate a (non-phrase) query end to end, materialising the universe
/// subtraction at most once.
pub fn evaluate(store: &IndexStore, query: &Query) -> Vec<DocId> {
    match query {
        Query::Cnf(clauses) => search_cnf(store, clauses).resolve(store.document_count),
        Query::Phrase(_) => Vec::new(),
    }
}
