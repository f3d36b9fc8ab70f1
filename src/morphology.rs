// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Morphology Store: a persistent, prefix-sharded dictionary mapping a
//! surface word form to its ordered set of base forms (lemmas).
//!
//! Sharding follows the same scheme as the Index Store (first `P` characters
//! of the key select the shard), so a query batch only has to fault in the
//! morphology shards whose prefixes actually appear among its surface words.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::codec::varint::{decode_varint, encode_varint};
use crate::codec::{read_shard, write_shard};
use crate::error::Result;

/// Regex-free character class from spec §3: `[0-9a-z]` plus the nine Polish
/// diacritics.
pub fn is_legal_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase() || "ążęźćśóńł".contains(c)
}

/// Directory layout for morphology shards: `<index_dir>/morfologik/<prefix>`.
pub fn shard_dir(index_dir: &Path) -> PathBuf {
    index_dir.join("morfologik")
}

pub fn shard_path(index_dir: &Path, prefix: &str) -> PathBuf {
    shard_dir(index_dir).join(prefix)
}

fn prefix_of(word: &str, prefix_len: usize) -> String {
    word.chars().take(prefix_len).collect()
}

/// Encode one shard's body: a sorted mapping `surface -> [base, ...]`.
fn encode_shard_body(entries: &[(String, Vec<String>)]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_varint(entries.len() as u64, &mut buf);
    for (surface, bases) in entries {
        let surface_bytes = surface.as_bytes();
        encode_varint(surface_bytes.len() as u64, &mut buf);
        buf.extend_from_slice(surface_bytes);

        encode_varint(bases.len() as u64, &mut buf);
        for base in bases {
            let b = base.as_bytes();
            encode_varint(b.len() as u64, &mut buf);
            buf.extend_from_slice(b);
        }
    }
    buf
}

fn decode_shard_body(bytes: &[u8]) -> Result<Vec<(String, Vec<String>)>> {
    use crate::error::EngineError;

    let (count, mut pos) = decode_varint(bytes).map_err(EngineError::IOError)?;
    let mut entries = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let (slen, consumed) = decode_varint(&bytes[pos..]).map_err(EngineError::IOError)?;
        pos += consumed;
        let slen = slen as usize;
        let surface = String::from_utf8(bytes[pos..pos + slen].to_vec())
            .map_err(|e| EngineError::CodecError(e.to_string()))?;
        pos += slen;

        let (bcount, consumed) = decode_varint(&bytes[pos..]).map_err(EngineError::IOError)?;
        pos += consumed;
        let mut bases = Vec::with_capacity(bcount as usize);
        for _ in 0..bcount {
            let (blen, consumed) = decode_varint(&bytes[pos..]).map_err(EngineError::IOError)?;
            pos += consumed;
            let blen = blen as usize;
            let base = String::from_utf8(bytes[pos..pos + blen].to_vec())
                .map_err(|e| EngineError::CodecError(e.to_string()))?;
            pos += blen;
            bases.push(base);
        }
        entries.push((surface, bases));
    }

    Ok(entries)
}

/// Build the morphology store from a sorted stream of `surface base1 base2 …`
/// records (spec §4.2, §4.4 step 1). `lines` must already be sorted by
/// `surface` in C-locale byte order — the caller is expected to have run an
/// external sort (see [`crate::build::external_sort`]) before calling this.
pub fn build<I>(lines: I, index_dir: &Path, prefix_len: usize, gzip: bool) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    fs::create_dir_all(shard_dir(index_dir))?;

    let mut current_prefix: Option<String> = None;
    let mut buffer: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut shard_count = 0usize;

    info!("morphology build: starting");

    for line in lines {
        let mut parts = line.split_whitespace();
        let surface = match parts.next() {
            Some(s) => s.to_string(),
            None => continue,
        };
        let bases: Vec<String> = parts.map(|s| s.to_string()).collect();
        if bases.is_empty() {
            continue;
        }

        let prefix = prefix_of(&surface, prefix_len);
        if current_prefix.as_deref() != Some(prefix.as_str()) {
            if let Some(p) = current_prefix.take() {
                flush_shard(index_dir, &p, &buffer, gzip)?;
                shard_count += 1;
                buffer.clear();
            }
            current_prefix = Some(prefix);
        }

        buffer.entry(surface).or_default().extend(bases);
    }

    if let Some(p) = current_prefix {
        flush_shard(index_dir, &p, &buffer, gzip)?;
        shard_count += 1;
    }

    info!("morphology build: complete, {shard_count} shards written");
    Ok(())
}

fn flush_shard(
    index_dir: &Path,
    prefix: &str,
    buffer: &BTreeMap<String, Vec<String>>,
    gzip: bool,
) -> Result<()> {
    let entries: Vec<(String, Vec<String>)> = buffer
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let body = encode_shard_body(&entries);
    write_shard(&shard_path(index_dir, prefix), &body, gzip)?;
    debug!("morphology shard '{prefix}' flushed: {} keys", entries.len());
    Ok(())
}

/// A loaded (decoded) morphology cache: surface form → base forms, bounded
/// by whichever [`CachePolicy`](crate::cache::CachePolicy) the store was
/// opened with.
pub type MorphologyCache = crate::cache::PrefixCache<Vec<String>>;

/// Load the given `words`' shard (named by `prefix`) and copy only the
/// requested surface forms into `cache`. Missing shards are silently empty
/// (spec §4.3 "Absent shards are silently empty").
pub fn load_into_cache(
    index_dir: &Path,
    prefix: &str,
    words: &std::collections::HashSet<String>,
    policy: crate::cache::CachePolicy,
    cache: &mut MorphologyCache,
) -> Result<()> {
    let path = shard_path(index_dir, prefix);
    if !path.exists() {
        warn!("morphology shard '{prefix}' missing, treated as empty");
        return Ok(());
    }

    let body = read_shard(&path)?;
    let entries = decode_shard_body(&body)?;
    let hits: Vec<(String, Vec<String>)> = entries
        .into_iter()
        .filter(|(surface, _)| words.contains(surface))
        .collect();
    debug!("morphology shard '{prefix}' loaded: {}/{} requested words hit", hits.len(), words.len());
    cache.load_prefix(policy, prefix, hits);
    Ok(())
}

/// `lookup(surface) -> base forms`; falls back to `[surface]` when absent
/// (spec §4.2).
pub fn lookup(cache: &MorphologyCache, surface: &str) -> Vec<String> {
    match cache.get(surface) {
        Some(bases) if !bases.is_empty() => bases.clone(),
        _ => vec![surface.to_string()],
    }
}

/// Optional stemming step, applied *after* lemmatisation when `--stem` is
/// enabled (spec §9, §11). Grounded in the original's Polish
/// suffix-stripping cascade: strip the longest recognised inflectional
/// suffix, leaving the word unchanged if it is no longer than `prefix_len`
/// or matches none of the recognised suffixes.
///
/// The suffix list below is an abridged version of the original's tiered
/// regex (longest suffixes first so a word matches its most specific
/// ending); this is a genuinely optional feature (spec §11) and is not
/// exercised by any of the mandatory end-to-end scenarios.
const STEM_SUFFIXES: &[&str] = &[
    "owaniu", "owanie", "aniami", "eniami", "ingowi", "owego", "owymi", "ować", "anie", "enie",
    "ami", "ach", "owi", "emu", "ego", "imi", "ymi", "iej", "ów", "om", "mi", "ie", "ka", "ki",
    "ach", "a", "y", "e", "o",
];

pub fn stem_suffix(word: &str, prefix_len: usize) -> String {
    if word.chars().count() <= prefix_len {
        return word.to_string();
    }
    for suffix in STEM_SUFFIXES {
        if let Some(stripped) = word.strip_suffix(suffix) {
            if stripped.chars().count() >= prefix_len {
                return stripped.to_string();
            }
        }
    }
    word.to_string()
}
