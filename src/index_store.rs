// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Index Store: a persistent, prefix-sharded inverted index with a
//! positional shard and a non-positional companion per prefix, plus the
//! title sequence and the `COMPRESSED` / `PREFIX_LENGTH` side files that
//! describe the whole index (spec §4.3).

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::cache::{CachePolicy, PrefixCache};
use crate::codec::postings::{decode_nonpositional, decode_positional};
use crate::codec::varint::{decode_varint, encode_varint};
use crate::codec::{read_shard, write_shard};
use crate::error::{EngineError, Result};
use crate::morphology::MorphologyCache;
use crate::types::{DocId, NonPositionalPosting, PositionalPosting};

pub const TITLES_FILE: &str = "TITLES";
pub const COMPRESSED_FILE: &str = "COMPRESSED";
pub const PREFIX_LENGTH_FILE: &str = "PREFIX_LENGTH";

pub fn positional_shard_path(index_dir: &Path, prefix: &str) -> PathBuf {
    index_dir.join(prefix)
}

pub fn nonpositional_shard_path(index_dir: &Path, prefix: &str) -> PathBuf {
    index_dir.join(format!("{prefix}.nopos"))
}

/// Encode one positional shard's body: a sorted mapping `base_form ->
/// positional posting`.
pub fn encode_positional_shard_body(
    entries: &[(String, PositionalPosting)],
    gap_code: bool,
) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_varint(entries.len() as u64, &mut buf);
    for (key, posting) in entries {
        let kb = key.as_bytes();
        encode_varint(kb.len() as u64, &mut buf);
        buf.extend_from_slice(kb);
        crate::codec::postings::encode_positional(posting, gap_code, &mut buf);
    }
    buf
}

fn decode_keyed_body<T>(
    bytes: &[u8],
    decode_value: impl Fn(&[u8]) -> std::io::Result<(T, usize)>,
) -> Result<Vec<(String, T)>> {
    let (count, mut pos) = decode_varint(bytes).map_err(EngineError::IOError)?;
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let (klen, consumed) = decode_varint(&bytes[pos..]).map_err(EngineError::IOError)?;
        pos += consumed;
        let klen = klen as usize;
        let key = String::from_utf8(bytes[pos..pos + klen].to_vec())
            .map_err(|e| EngineError::CodecError(e.to_string()))?;
        pos += klen;

        let (value, consumed) = decode_value(&bytes[pos..]).map_err(EngineError::IOError)?;
        pos += consumed;
        entries.push((key, value));
    }
    Ok(entries)
}

pub fn encode_nonpositional_shard_body(
    entries: &[(String, NonPositionalPosting)],
    gap_code: bool,
) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_varint(entries.len() as u64, &mut buf);
    for (key, posting) in entries {
        let kb = key.as_bytes();
        encode_varint(kb.len() as u64, &mut buf);
        buf.extend_from_slice(kb);
        crate::codec::postings::encode_nonpositional(posting, gap_code, &mut buf);
    }
    buf
}

/// An open index: side-file metadata plus the bounded caches queries read
/// from. Mirrors the original's `Indexer` object, which owns the titles,
/// the document count, and every cache in one place.
pub struct IndexStore {
    dir: PathBuf,
    pub compressed: bool,
    pub prefix_len: usize,
    titles: Vec<String>,
    pub document_count: u32,
    policy: CachePolicy,
    positional_cache: PrefixCache<PositionalPosting>,
    nonpositional_cache: PrefixCache<NonPositionalPosting>,
    pub morphology_cache: MorphologyCache,
}

impl IndexStore {
    /// `open(dir)`: reads `COMPRESSED`, `PREFIX_LENGTH`, `TITLES`, populating
    /// `document_count` (spec §4.3). This is also how the CLI's `--stem`-free
    /// query path re-derives `compressed`/`prefix_len` rather than requiring
    /// the caller to repeat build-time flags (spec §11).
    pub fn open(dir: &Path, policy: CachePolicy) -> Result<Self> {
        let compressed = dir.join(COMPRESSED_FILE).exists();

        let prefix_len_text = fs::read_to_string(dir.join(PREFIX_LENGTH_FILE))?;
        let prefix_len: usize = prefix_len_text
            .trim()
            .parse()
            .map_err(|_| EngineError::CodecError("PREFIX_LENGTH is not an integer".to_string()))?;

        let titles = load_titles(dir, compressed)?;
        let document_count = titles.len() as u32;

        Ok(IndexStore {
            dir: dir.to_path_buf(),
            compressed,
            prefix_len,
            titles,
            document_count,
            policy,
            positional_cache: PrefixCache::new(),
            nonpositional_cache: PrefixCache::new(),
            morphology_cache: MorphologyCache::new(),
        })
    }

    /// `load_positional(prefix, words)`: populate the positional cache with
    /// the intersection of `words` and the shard's keys. Missing shards are
    /// silently empty.
    pub fn load_positional(&mut self, prefix: &str, words: &HashSet<String>) -> Result<()> {
        let path = positional_shard_path(&self.dir, prefix);
        if !path.exists() {
            warn!("positional shard '{prefix}' missing, treated as empty");
            return Ok(());
        }
        let body = read_shard(&path)?;
        let entries = decode_keyed_body(&body, |b| decode_positional(b, self.compressed))?;
        let hits: Vec<(String, PositionalPosting)> = entries
            .into_iter()
            .filter(|(k, _)| words.contains(k))
            .collect();
        debug!(
            "positional shard '{prefix}' loaded: {}/{} requested words hit",
            hits.len(),
            words.len()
        );
        self.positional_cache.load_prefix(self.policy, prefix, hits);
        Ok(())
    }

    /// `load_nonpositional(prefix, words)`, the non-positional companion.
    pub fn load_nonpositional(&mut self, prefix: &str, words: &HashSet<String>) -> Result<()> {
        let path = nonpositional_shard_path(&self.dir, prefix);
        if !path.exists() {
            warn!("non-positional shard '{prefix}' missing, treated as empty");
            return Ok(());
        }
        let body = read_shard(&path)?;
        let entries = decode_keyed_body(&body, |b| decode_nonpositional(b, self.compressed))?;
        let hits: Vec<(String, NonPositionalPosting)> = entries
            .into_iter()
            .filter(|(k, _)| words.contains(k))
            .collect();
        debug!(
            "non-positional shard '{prefix}' loaded: {}/{} requested words hit",
            hits.len(),
            words.len()
        );
        self.nonpositional_cache.load_prefix(self.policy, prefix, hits);
        Ok(())
    }

    pub fn load_morphology(&mut self, prefix: &str, words: &HashSet<String>) -> Result<()> {
        crate::morphology::load_into_cache(
            &self.dir,
            prefix,
            words,
            self.policy,
            &mut self.morphology_cache,
        )
    }

    /// `get_positional(word) -> posting or empty`.
    pub fn get_positional(&self, word: &str) -> PositionalPosting {
        self.positional_cache.get(word).cloned().unwrap_or_default()
    }

    /// `get_nonpositional(word) -> posting or empty`.
    pub fn get_nonpositional(&self, word: &str) -> NonPositionalPosting {
        self.nonpositional_cache
            .get(word)
            .cloned()
            .unwrap_or_default()
    }

    /// `title(doc_id) -> title or OutOfRange`.
    pub fn title(&self, doc_id: DocId) -> Result<&str> {
        if doc_id == 0 || doc_id as usize > self.titles.len() {
            return Err(EngineError::OutOfRange {
                doc_id,
                max: self.document_count,
            });
        }
        Ok(&self.titles[doc_id as usize - 1])
    }

    /// Clear every cache at a batch boundary (the `Batch` policy's reset
    /// point; a no-op of sorts under `Lru`, which evicts continuously).
    pub fn clear_batch(&mut self) {
        self.positional_cache.clear();
        self.nonpositional_cache.clear();
        self.morphology_cache.clear();
    }

    pub fn prefix_of(&self, word: &str) -> String {
        word.chars().take(self.prefix_len).collect()
    }
}

fn load_titles(dir: &Path, compressed: bool) -> Result<Vec<String>> {
    let path = dir.join(TITLES_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let body = read_shard(&path)?;
    let _ = compressed; // TITLES carries its own gzip flag in its shard header.
    let mut titles = Vec::new();
    let mut pos = 0usize;
    while pos < body.len() {
        let (len, consumed) = decode_varint(&body[pos..]).map_err(EngineError::IOError)?;
        pos += consumed;
        let len = len as usize;
        let title = String::from_utf8(body[pos..pos + len].to_vec())
            .map_err(|e| EngineError::CodecError(e.to_string()))?;
        pos += len;
        titles.push(title);
    }
    Ok(titles)
}

/// Write the ordered title sequence to `TITLES` (spec §4.4 step 5).
pub fn write_titles(dir: &Path, titles: &[String], gzip: bool) -> Result<()> {
    let mut body = Vec::new();
    for title in titles {
        let b = title.as_bytes();
        encode_varint(b.len() as u64, &mut body);
        body.extend_from_slice(b);
    }
    write_shard(&dir.join(TITLES_FILE), &body, gzip)
}

pub fn write_compressed_marker(dir: &Path, compressed: bool) -> Result<()> {
    let marker = dir.join(COMPRESSED_FILE);
    if compressed {
        fs::write(marker, b"")?;
    } else if marker.exists() {
        fs::remove_file(marker)?;
    }
    Ok(())
}

pub fn write_prefix_length(dir: &Path, prefix_len: usize) -> Result<()> {
    fs::write(dir.join(PREFIX_LENGTH_FILE), prefix_len.to_string())?;
    Ok(())
}

/// Accumulate-then-flush-on-prefix-change in-memory buffer used by the
/// builder's shard construction pass (spec §4.4 step 4). Kept here next to
/// the shard layout it writes.
#[derive(Default)]
pub struct ShardBuffer {
    pub entries: BTreeMap<String, PositionalPosting>,
}

impl ShardBuffer {
    /// Append `(doc_id, position)` to `base_form`'s entry, collapsing runs
    /// so consecutive records for the same `doc_id` append to the same
    /// entry, and de-duplicating identical `(doc_id, position)` pairs
    /// (spec §4.4 "Tie-breaks").
    pub fn push(&mut self, base_form: &str, doc_id: DocId, position: u32) {
        let entry = self.entries.entry(base_form.to_string()).or_default();
        match entry.last_mut() {
            Some((last_doc, positions)) if *last_doc == doc_id => {
                if positions.last() != Some(&position) {
                    positions.push(position);
                }
            }
            _ => {
                entry.push((doc_id, vec![position]));
            }
        }
    }

    pub fn flush(
        &mut self,
        index_dir: &Path,
        prefix: &str,
        compressed: bool,
    ) -> Result<()> {
        let entries: Vec<(String, PositionalPosting)> = std::mem::take(&mut self.entries)
            .into_iter()
            .filter(|(_, posting)| !posting.is_empty())
            .collect();

        if entries.is_empty() {
            return Ok(());
        }

        let positional_body = encode_positional_shard_body(&entries, compressed);
        write_shard(&positional_shard_path(index_dir, prefix), &positional_body, compressed)?;

        let nonpositional_entries: Vec<(String, NonPositionalPosting)> = entries
            .iter()
            .map(|(k, posting)| (k.clone(), crate::types::project(posting)))
            .collect();
        let nonpositional_body =
            encode_nonpositional_shard_body(&nonpositional_entries, compressed);
        write_shard(
            &nonpositional_shard_path(index_dir, prefix),
            &nonpositional_body,
            compressed,
        )?;

        debug!("index shard '{prefix}' flushed: {} keys", entries.len());
        Ok(())
    }
}
