// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `boolsearch`: a batch-oriented Boolean/phrase search engine over a
//! morphologically normalised corpus.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌───────────────┐   ┌─────────────┐
//! │  build::*  │──▶│ index_store   │◀──│ morphology  │
//! │ (pipeline) │   │ (prefix shards│   │ (lemma map) │
//! └────────────┘   │  + caches)    │   └─────────────┘
//!                   └───────┬───────┘
//!                           │
//!                   ┌───────▼───────┐
//!                   │   query::*    │
//!                   │ (CNF, phrase) │
//!                   └───────────────┘
//! ```
//!
//! The on-disk format is a set of prefix shards (spec §4.1, §4.3): every
//! word's first `prefix_len` characters select a positional shard, a
//! non-positional companion, and — in the morphology store — a lemma shard.
//! A query batch faults in only the shards its words touch, caching them
//! under either a batch-scoped or LRU policy (spec §4.5).

pub mod build;
pub mod cache;
pub mod codec;
pub mod error;
pub mod index_store;
pub mod morphology;
pub mod query;
pub mod types;

pub use cache::CachePolicy;
pub use error::{EngineError, Result};
pub use index_store::IndexStore;
pub use query::{evaluate, Query};
pub use types::{DocId, SearchResult};

pub mod cli;
