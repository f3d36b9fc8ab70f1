// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Cache Layer: in-memory maps from word to decoded posting, shared by
//! the Morphology Store and the Index Store.
//!
//! Two admissible policies (spec §4.5, §9): a batch-scoped cache that is
//! simply cleared at the end of every query batch, or an LRU keyed by
//! *prefix* (not by individual word) with a small capacity, evicting the
//! least-recently-used prefix — and every word loaded under it — once
//! capacity is exceeded. Either policy satisfies the evaluator's only
//! contract: `get` returns the decoded value if cached, otherwise it is
//! treated as empty.

use std::collections::{HashMap, VecDeque};

/// Which cache policy a store should use.
#[derive(Debug, Clone, Copy)]
pub enum CachePolicy {
    /// Cleared wholesale at every batch boundary.
    Batch,
    /// LRU over prefixes, evicting the least-recently-touched prefix (and
    /// all words loaded under it) once more than `capacity` prefixes are
    /// resident.
    Lru { capacity: usize },
}

/// A word → decoded-value cache, keyed internally by prefix for eviction.
#[derive(Debug, Default)]
pub struct PrefixCache<V> {
    entries: HashMap<String, V>,
    prefix_keys: HashMap<String, Vec<String>>,
    lru_order: VecDeque<String>,
}

impl<V> PrefixCache<V> {
    pub fn new() -> Self {
        PrefixCache {
            entries: HashMap::new(),
            prefix_keys: HashMap::new(),
            lru_order: VecDeque::new(),
        }
    }

    /// Record that `prefix` now holds `words` (with their decoded values),
    /// applying `policy`'s eviction rule. Already-loaded prefixes are
    /// refreshed to most-recently-used without growing their key list.
    pub fn load_prefix(
        &mut self,
        policy: CachePolicy,
        prefix: &str,
        words: impl IntoIterator<Item = (String, V)>,
    ) {
        let mut keys = Vec::new();
        for (word, value) in words {
            keys.push(word.clone());
            self.entries.insert(word, value);
        }
        self.prefix_keys.entry(prefix.to_string()).or_default().extend(keys);

        if let CachePolicy::Lru { capacity } = policy {
            self.touch(prefix);
            self.evict_over_capacity(capacity);
        }
    }

    fn touch(&mut self, prefix: &str) {
        self.lru_order.retain(|p| p != prefix);
        self.lru_order.push_back(prefix.to_string());
    }

    fn evict_over_capacity(&mut self, capacity: usize) {
        while self.lru_order.len() > capacity {
            if let Some(victim) = self.lru_order.pop_front() {
                if let Some(keys) = self.prefix_keys.remove(&victim) {
                    for key in keys {
                        self.entries.remove(&key);
                    }
                }
            } else {
                break;
            }
        }
    }

    /// `get_*`'s only contract: cached value if present, `None` (treated as
    /// empty by callers) otherwise.
    pub fn get(&self, word: &str) -> Option<&V> {
        self.entries.get(word)
    }

    /// Batch-boundary reset.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.prefix_keys.clear();
        self.lru_order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
