//! Shared test fixtures: build tiny on-disk indexes from inline corpus and
//! morphology text, and evaluate queries against them the way the CLI
//! driver's batch loop does (parse -> gather words -> fault in shards ->
//! evaluate).

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use boolsearch::build::{run_build, BuildOptions};
use boolsearch::cache::CachePolicy;
use boolsearch::index_store::IndexStore;
use boolsearch::query::{evaluate, Query};
use boolsearch::types::DocId;
use tempfile::TempDir;

/// A built index plus the temp directory backing it, kept alive for the
/// duration of a test.
pub struct Fixture {
    _dir: TempDir,
    pub store: IndexStore,
}

impl Fixture {
    /// Parse and evaluate `query_text`, faulting in whatever shards its
    /// words touch first (mirrors `main::load_batch_shards`).
    pub fn eval(&mut self, query_text: &str) -> Vec<DocId> {
        let query = Query::parse(query_text).expect("query should parse");
        self.load_shards_for(&query);
        evaluate(&self.store, &query)
    }

    pub fn titles(&mut self, query_text: &str) -> Vec<String> {
        self.eval(query_text)
            .into_iter()
            .map(|id| self.store.title(id).unwrap().to_string())
            .collect()
    }

    fn load_shards_for(&mut self, query: &Query) {
        let words: HashSet<String> = query
            .get_words()
            .iter()
            .map(|w| w.to_lowercase())
            .collect();

        let mut by_prefix: HashMap<String, HashSet<String>> = HashMap::new();
        for word in &words {
            by_prefix
                .entry(self.store.prefix_of(word))
                .or_default()
                .insert(word.clone());
        }

        for (prefix, prefix_words) in &by_prefix {
            self.store.load_morphology(prefix, prefix_words).unwrap();
            self.store.load_nonpositional(prefix, prefix_words).unwrap();
            self.store.load_positional(prefix, prefix_words).unwrap();
        }
    }
}

/// Build an index from inline corpus/morphology text under arbitrary
/// `opts`/`policy`.
pub fn build_fixture(
    corpus: &str,
    morphology: &str,
    opts: BuildOptions,
    policy: CachePolicy,
) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let corpus_path = dir.path().join("corpus.txt");
    let morph_path = dir.path().join("morph.txt");
    let out_dir = dir.path().join("index");

    std::fs::write(&corpus_path, corpus).unwrap();
    std::fs::write(&morph_path, morphology).unwrap();

    run_build(&corpus_path, &morph_path, &out_dir, opts).expect("build should succeed");
    let store = IndexStore::open(&out_dir, policy).expect("open should succeed");
    Fixture { _dir: dir, store }
}

/// Default-opts fixture: uncompressed, `prefix_len = 3`, batch-scoped cache.
pub fn build_default(corpus: &str, morphology: &str) -> Fixture {
    build_fixture(
        corpus,
        morphology,
        BuildOptions::default(),
        CachePolicy::Batch,
    )
}

/// Recursively list every regular file under `dir`, relative to `dir`,
/// sorted for deterministic comparison.
pub fn list_files_relative(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    fn walk(base: &std::path::Path, dir: &std::path::Path, out: &mut Vec<std::path::PathBuf>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                out.push(path.strip_prefix(base).unwrap().to_path_buf());
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}
