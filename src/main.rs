// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `boolsearch`: build a prefix-sharded Boolean/phrase index, or run a
//! batch query loop against one (spec §6).

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use clap::Parser;
use log::info;

use boolsearch::build::{run_build, BuildOptions};
use boolsearch::cache::CachePolicy;
use boolsearch::cli::{CacheKind, Cli, Commands};
use boolsearch::index_store::IndexStore;
use boolsearch::query::Query;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            corpus,
            morphology,
            output,
            compressed,
            prefix_len,
            stem,
        } => run_build(
            &corpus,
            &morphology,
            &output,
            BuildOptions {
                compressed,
                prefix_len,
                stem,
            },
        ),
        Commands::Query {
            index,
            batch_size,
            interactive,
            cache,
            lru_index_capacity,
            lru_morph_capacity,
        } => {
            let n = if interactive { 1 } else { batch_size };
            run_query_loop(&index, n, cache, lru_index_capacity, lru_morph_capacity)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Gather the words a batch of parsed queries will need, lowercased, so the
/// shards they live in can be faulted in once per batch rather than once per
/// query (spec §9 "lazy per-batch loading").
fn words_for_batch(queries: &[Query]) -> HashSet<String> {
    queries
        .iter()
        .flat_map(|q| q.get_words())
        .map(|w| w.to_lowercase())
        .collect()
}

fn load_batch_shards(store: &mut IndexStore, queries: &[Query]) -> boolsearch::error::Result<()> {
    let words = words_for_batch(queries);
    let mut by_prefix: std::collections::HashMap<String, HashSet<String>> =
        std::collections::HashMap::new();
    for word in &words {
        by_prefix
            .entry(store.prefix_of(word))
            .or_default()
            .insert(word.clone());
    }

    let has_phrase = queries.iter().any(|q| matches!(q, Query::Phrase(_)));
    let has_cnf = queries.iter().any(|q| matches!(q, Query::Cnf(_)));

    for (prefix, prefix_words) in &by_prefix {
        store.load_morphology(prefix, prefix_words)?;
        if has_cnf {
            store.load_nonpositional(prefix, prefix_words)?;
        }
        if has_phrase {
            store.load_positional(prefix, prefix_words)?;
        }
    }

    Ok(())
}

/// The batch query loop: read up to `n` lines, parse, fault in the shards
/// they reference, evaluate, print `QUERY: <q> TOTAL: <count>` plus every
/// matching title, then (under the `Batch` cache policy) clear every cache
/// before the next batch starts (spec §6, §11).
fn run_query_loop(
    index_dir: &std::path::Path,
    batch_size: usize,
    cache_kind: CacheKind,
    lru_index_capacity: usize,
    lru_morph_capacity: usize,
) -> boolsearch::error::Result<()> {
    let policy = match cache_kind {
        CacheKind::Batch => CachePolicy::Batch,
        // one LRU capacity governs both postings caches and the morphology
        // cache inside IndexStore; the CLI exposes two knobs because the
        // original tunes the index and morphology caches independently, but
        // a single store-wide policy is simpler and spec-equivalent at the
        // query-evaluation boundary (spec §11's call-out on this ambiguity).
        CacheKind::Lru => CachePolicy::Lru {
            capacity: lru_index_capacity.max(lru_morph_capacity),
        },
    };

    let mut store = IndexStore::open(index_dir, policy)?;
    info!("index opened: {} documents", store.document_count);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let stdout = io::stdout();

    loop {
        let mut raw_batch = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            match lines.next() {
                Some(Ok(line)) => raw_batch.push(line),
                Some(Err(_)) | None => break,
            }
        }
        if raw_batch.is_empty() {
            break;
        }

        let queries: Vec<(String, Option<Query>)> = raw_batch
            .into_iter()
            .map(|line| {
                let parsed = Query::parse(&line).ok();
                (line, parsed)
            })
            .collect();

        let parsed_only: Vec<Query> = queries.iter().filter_map(|(_, q)| q.clone()).collect();
        load_batch_shards(&mut store, &parsed_only)?;

        let mut out = stdout.lock();
        for (raw, query) in &queries {
            match query {
                Some(q) => {
                    let results = boolsearch::query::evaluate(&store, q);
                    writeln!(out, "QUERY: {raw} TOTAL: {}", results.len()).ok();
                    for doc_id in results {
                        if let Ok(title) = store.title(doc_id) {
                            writeln!(out, "{title}").ok();
                        }
                    }
                }
                None => {
                    writeln!(out, "QUERY: {raw} TOTAL: 0").ok();
                }
            }
        }
        out.flush().ok();

        if matches!(cache_kind, CacheKind::Batch) {
            store.clear_batch();
        }

        let had_less_than_full_batch = queries.len() < batch_size;
        if had_less_than_full_batch {
            break;
        }
    }

    Ok(())
}
