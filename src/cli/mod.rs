// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command-line surface: `boolsearch build` and `boolsearch query` (spec
//! §10.3).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "boolsearch", version, about = "Batch Boolean/phrase search over a morphologically normalised corpus")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a prefix-sharded index from a corpus and a morphology source.
    Build {
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long)]
        morphology: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Gzip every shard payload (spec §4.1's gzip-flag bit).
        #[arg(long)]
        compressed: bool,
        /// Number of leading characters used to select a word's shard.
        #[arg(long = "prefix-len", default_value_t = 3)]
        prefix_len: usize,
        /// Apply suffix stemming after lemmatisation (spec §11, optional).
        #[arg(long)]
        stem: bool,
    },
    /// Run a batch query loop against a built index (spec §6's CLI driver).
    Query {
        #[arg(long)]
        index: PathBuf,
        /// Number of query lines read per batch before caches are cleared.
        #[arg(long = "batch-size", default_value_t = 50)]
        batch_size: usize,
        /// Equivalent to `--batch-size 1` (spec §11's `-i` flag).
        #[arg(short = 'i', long = "interactive")]
        interactive: bool,
        #[arg(long, value_enum, default_value_t = CacheKind::Batch)]
        cache: CacheKind,
        #[arg(long = "lru-index-capacity", default_value_t = 20)]
        lru_index_capacity: usize,
        #[arg(long = "lru-morph-capacity", default_value_t = 90)]
        lru_morph_capacity: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CacheKind {
    Batch,
    Lru,
}
