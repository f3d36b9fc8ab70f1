//! The error taxonomy (spec §7): `EmptyQuery`, `OutOfRange`, and
//! `CodecError` are surfaced as typed errors; missing words/shards never
//! raise at all.

use boolsearch::error::EngineError;
use boolsearch::query::Query;

use crate::common::build_default;

#[test]
fn empty_phrase_query_is_empty_query_error() {
    assert!(matches!(Query::parse("\"\""), Err(EngineError::EmptyQuery)));
}

#[test]
fn title_out_of_range_is_out_of_range_error() {
    let f = build_default("##TITLE## Only\nword\n", "");
    assert_eq!(f.store.document_count, 1);
    assert!(matches!(
        f.store.title(0),
        Err(EngineError::OutOfRange { doc_id: 0, max: 1 })
    ));
    assert!(matches!(
        f.store.title(2),
        Err(EngineError::OutOfRange { doc_id: 2, max: 1 })
    ));
}

#[test]
fn corrupted_shard_bytes_surface_as_codec_error() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = dir.path().join("corpus.txt");
    let morph_path = dir.path().join("morph.txt");
    let out_dir = dir.path().join("index");
    std::fs::write(&corpus_path, "##TITLE## Doc\napple banana\n").unwrap();
    std::fs::write(&morph_path, "").unwrap();

    boolsearch::build::run_build(
        &corpus_path,
        &morph_path,
        &out_dir,
        boolsearch::build::BuildOptions::default(),
    )
    .unwrap();

    // Corrupt the "app" shard's bytes in place.
    let shard_path = out_dir.join("app");
    let mut bytes = std::fs::read(&shard_path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    std::fs::write(&shard_path, &bytes).unwrap();

    let mut store =
        boolsearch::index_store::IndexStore::open(&out_dir, boolsearch::cache::CachePolicy::Batch)
            .unwrap();
    let words: std::collections::HashSet<String> = ["apple".to_string()].into_iter().collect();
    let result = store.load_nonpositional("app", &words);
    assert!(matches!(result, Err(EngineError::CodecError(_))));
}

#[test]
fn missing_word_never_errors_it_is_simply_empty() {
    let mut f = build_default("##TITLE## Doc\napple\n", "");
    assert!(f.eval("banana").is_empty());
    assert!(f.eval("\"banana\"").is_empty());
}
