// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The error taxonomy for the engine.
//!
//! One variant per failure mode the core can produce. Library code never
//! panics on bad input or missing data; it returns one of these instead and
//! lets the CLI driver decide what to do with it (skip a query, abort a
//! batch, exit non-zero).

use std::io;

use thiserror::Error;

/// Everything that can go wrong building or querying an index.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A phrase query of `""` was given.
    #[error("empty query")]
    EmptyQuery,

    /// The query text could not be parsed as either CNF or a phrase.
    #[error("could not parse query: {0}")]
    ParseError(String),

    /// A shard failed to decode: truncated payload, bad varint, or a CRC32
    /// mismatch. Not an I/O failure — the bytes were read fine, they just
    /// don't check out.
    #[error("codec error: {0}")]
    CodecError(String),

    /// `title(doc_id)` was asked for an id outside `1..=document_count`.
    #[error("doc_id {doc_id} out of range (document_count = {max})")]
    OutOfRange { doc_id: u32, max: u32 },

    /// A shard file for a requested prefix does not exist on disk.
    ///
    /// Never constructed: per the evaluator's contract a missing shard is
    /// silently treated as an empty posting, not an error. The variant is
    /// kept so the taxonomy documents every failure mode the design
    /// considered, matching a shard miss to its own name instead of folding
    /// it into `IOError`.
    #[allow(dead_code)]
    #[error("missing shard")]
    MissingShard,

    /// Any other filesystem failure.
    #[error("I/O error: {0}")]
    IOError(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
