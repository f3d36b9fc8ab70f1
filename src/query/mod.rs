// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing and evaluation: CNF with negation, and phrase matching.

pub mod boolean;
pub mod parser;
pub mod phrase;

use crate::index_store::IndexStore;
use crate::types::DocId;

pub use parser::{Query, Term};

/// Evaluate an already-parsed query against an open index, dispatching to
/// the Boolean or Phrase evaluator as appropriate.
pub fn evaluate(store: &IndexStore, query: &Query) -> Vec<DocId> {
    match query {
        Query::Cnf(_) => boolean::evaluate(store, query),
        Query::Phrase(_) => phrase::evaluate(store, query),
    }
}
