// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Phrase Evaluator: adjacency matching over positional postings (spec
//! §4.8). Negation inside a phrase is ignored — `~` is stripped before
//! lookup, matching the only behaviour the original ever exercised (spec
//! §9's "ambiguous behaviour... do not guess").

use crate::index_store::IndexStore;
use crate::query::boolean::and_merge;
use crate::query::parser::{Query, Term};
use crate::types::{DocId, PositionalPosting, Position};

/// OR-union of two positional postings: sorted-merge on `doc_id`, unioning
/// the position sets when a `doc_id` appears in both.
fn positional_or_merge(a: &PositionalPosting, b: &PositionalPosting) -> PositionalPosting {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j].clone());
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                let positions = merge_position_sets(&a[i].1, &b[j].1);
                out.push((a[i].0, positions));
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

fn merge_position_sets(a: &[Position], b: &[Position]) -> Vec<Position> {
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

/// `merge_phrase`: advance over `doc_id` with `and_merge`; within a common
/// document keep only the positions `p` in `right` such that `p-1` is a
/// position in `left` — i.e. `right` immediately follows `left`. A k-way
/// phrase is matched by left-folding this across consecutive terms, each
/// step narrowing the retained positions to "where the chain matched so
/// far ends".
fn merge_phrase(left: &PositionalPosting, right: &PositionalPosting) -> PositionalPosting {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].0.cmp(&right[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                let left_positions = &left[i].1;
                let matched: Vec<Position> = right[j]
                    .1
                    .iter()
                    .copied()
                    .filter(|p| *p > 0 && left_positions.binary_search(&(p - 1)).is_ok())
                    .collect();
                if !matched.is_empty() {
                    out.push((left[i].0, matched));
                }
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Compute `term`'s positional posting as the OR-union across all of its
/// base forms.
fn term_positional(store: &IndexStore, term: &Term) -> PositionalPosting {
    let lower = term.word.to_lowercase();
    let bases = crate::morphology::lookup(&store.morphology_cache, &lower);
    bases
        .iter()
        .map(|b| store.get_positional(b))
        .fold(Vec::new(), |acc, posting| positional_or_merge(&acc, &posting))
}

/// `eval("t1 t2 ... tk")`: the docs in which some position `p` exists with
/// `p+i-1 ∈ positions(t_i)` for every `i`.
pub fn search_phrase(store: &IndexStore, terms: &[Term]) -> Vec<DocId> {
    if terms.is_empty() {
        return Vec::new();
    }

    let mut chain = term_positional(store, &terms[0]);
    for term in &terms[1..] {
        let next = term_positional(store, term);
        chain = merge_phrase(&chain, &next);
        if chain.is_empty() {
            break;
        }
    }

    let doc_ids: Vec<DocId> = chain.into_iter().map(|(d, _)| d).collect();
    // `chain` is already strictly increasing in doc_id by construction;
    // and_merge with itself is a cheap way to assert/normalise that without
    // a second bespoke dedup pass.
    and_merge(&doc_ids, &doc_ids)
}

pub fn evaluate(store: &IndexStore, query: &Query) -> Vec<DocId> {
    match query {
        Query::Phrase(terms) => search_phrase(store, terms),
        Query::Cnf(_) => Vec::new(),
    }
}
