// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared data types: document ids, postings, and the deferred-complement
//! search result.

/// A document identifier. 1-based; the valid range for an index with
/// `document_count = N` is `1..=N`.
pub type DocId = u32;

/// A 1-based token position within a document.
pub type Position = u32;

/// A positional posting: `(doc_id, positions)` pairs, `doc_id` strictly
/// increasing, `positions` strictly increasing within each entry.
pub type PositionalPosting = Vec<(DocId, Vec<Position>)>;

/// A non-positional posting: strictly increasing `doc_id`s. The doc
/// projection of a [`PositionalPosting`].
pub type NonPositionalPosting = Vec<DocId>;

/// Project a positional posting down to its non-positional companion.
pub fn project(posting: &PositionalPosting) -> NonPositionalPosting {
    posting.iter().map(|(doc_id, _)| *doc_id).collect()
}

/// `true` iff `v` is strictly increasing.
pub fn is_strictly_increasing(v: &[DocId]) -> bool {
    v.windows(2).all(|w| w[0] < w[1])
}

/// The result of evaluating a Boolean subexpression: a sorted, duplicate-free
/// set of doc ids, plus a flag recording whether the set denotes itself or
/// its complement within the universe `{1..=N}`.
///
/// Keeping the complement bit deferred lets the evaluator run `or_merge` /
/// `and_merge` on the small materialised side of a negation instead of
/// expanding `{1..N} \ docs` at every intermediate step; the universe
/// subtraction happens exactly once, at the end of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub docs: Vec<DocId>,
    pub negated: bool,
}

impl SearchResult {
    pub fn positive(docs: Vec<DocId>) -> Self {
        SearchResult {
            docs,
            negated: false,
        }
    }

    pub fn negative(docs: Vec<DocId>) -> Self {
        SearchResult {
            docs,
            negated: true,
        }
    }

    /// Materialise this result against the universe `{1..=document_count}`,
    /// performing the (at most once) universe subtraction if `negated`.
    pub fn resolve(self, document_count: u32) -> Vec<DocId> {
        if self.negated {
            crate::query::boolean::subtract_from_universe(document_count, &self.docs)
        } else {
            self.docs
        }
    }
}
