//! The on-disk index layout (spec §4.3, §6): side files, shard naming, and
//! reopening a previously built index from a fresh `IndexStore`.

use boolsearch::build::{run_build, BuildOptions};
use boolsearch::cache::CachePolicy;
use boolsearch::index_store::IndexStore;

const CORPUS: &str = "\
##TITLE## Apple
apple tree
##TITLE## Banana
banana split
";

#[test]
fn build_then_reopen_from_a_fresh_store_preserves_everything() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = dir.path().join("corpus.txt");
    let morph_path = dir.path().join("morph.txt");
    let out_dir = dir.path().join("index");
    std::fs::write(&corpus_path, CORPUS).unwrap();
    std::fs::write(&morph_path, "").unwrap();

    run_build(&corpus_path, &morph_path, &out_dir, BuildOptions::default()).unwrap();

    assert!(out_dir.join("PREFIX_LENGTH").exists());
    assert!(!out_dir.join("COMPRESSED").exists());
    assert!(out_dir.join("TITLES").exists());
    assert!(out_dir.join("morfologik").is_dir());

    // Drop the builder's view entirely and open a brand-new store, as a
    // separate query process would.
    let store = IndexStore::open(&out_dir, CachePolicy::Batch).unwrap();
    assert_eq!(store.document_count, 2);
    assert_eq!(store.prefix_len, 3);
    assert!(!store.compressed);
    assert_eq!(store.title(1).unwrap(), "Apple");
    assert_eq!(store.title(2).unwrap(), "Banana");
}

#[test]
fn compressed_build_writes_the_compressed_marker() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = dir.path().join("corpus.txt");
    let morph_path = dir.path().join("morph.txt");
    let out_dir = dir.path().join("index");
    std::fs::write(&corpus_path, CORPUS).unwrap();
    std::fs::write(&morph_path, "").unwrap();

    run_build(
        &corpus_path,
        &morph_path,
        &out_dir,
        BuildOptions {
            compressed: true,
            ..BuildOptions::default()
        },
    )
    .unwrap();

    assert!(out_dir.join("COMPRESSED").exists());
    let store = IndexStore::open(&out_dir, CachePolicy::Batch).unwrap();
    assert!(store.compressed);
}

#[test]
fn custom_prefix_length_is_persisted_and_reread() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = dir.path().join("corpus.txt");
    let morph_path = dir.path().join("morph.txt");
    let out_dir = dir.path().join("index");
    std::fs::write(&corpus_path, CORPUS).unwrap();
    std::fs::write(&morph_path, "").unwrap();

    run_build(
        &corpus_path,
        &morph_path,
        &out_dir,
        BuildOptions {
            prefix_len: 1,
            ..BuildOptions::default()
        },
    )
    .unwrap();

    let store = IndexStore::open(&out_dir, CachePolicy::Batch).unwrap();
    assert_eq!(store.prefix_len, 1);
    assert_eq!(store.prefix_of("apple"), "a");
}
