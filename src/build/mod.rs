// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Index Builder: the one-shot pipeline that turns a corpus and a
//! morphology source into an on-disk prefix-sharded index (spec §4.4).
//!
//! Five stages, run once per corpus:
//! 1. morphology build (external sort + shard emission)
//! 2. token stream (parse `##TITLE##`-delimited corpus, normalise via the
//!    in-memory morphology map, emit flat `base doc_id position` records)
//! 3. external sort of those records
//! 4. shard build (stream sorted records, flush on prefix change)
//! 5. titles dump

pub mod external_sort;
pub mod tokenize;

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::index_store::{write_compressed_marker, write_prefix_length, write_titles, ShardBuffer};
use crate::morphology;

/// Tunables for a single build run (spec §10.3's `boolsearch build` flags).
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub compressed: bool,
    pub prefix_len: usize,
    /// Apply [`morphology::stem_suffix`] after lemmatisation (spec §11,
    /// optional, off by default).
    pub stem: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            compressed: false,
            prefix_len: 3,
            stem: false,
        }
    }
}

/// Load the morphology source file fully into memory: `surface -> bases`.
/// Used only during corpus tokenisation (spec §9 notes both "fully in
/// memory" and "faulted in by shard" are admissible; the builder needs
/// every entry available while it streams the corpus once, so it holds the
/// whole map).
fn load_morphology_map(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let f = fs::File::open(path)?;
    let reader = BufReader::new(f);
    let mut map = HashMap::new();
    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let surface = match parts.next() {
            Some(s) => s.to_string(),
            None => continue,
        };
        let bases: Vec<String> = parts.map(|s| s.to_string()).collect();
        if !bases.is_empty() {
            map.insert(surface, bases);
        }
    }
    Ok(map)
}

fn normalize_build_time(
    morphology_map: &HashMap<String, Vec<String>>,
    word: &str,
    prefix_len: usize,
    stem: bool,
) -> Vec<String> {
    let lower = word.to_lowercase();
    let bases = match morphology_map.get(&lower) {
        Some(bases) if !bases.is_empty() => bases.clone(),
        _ => vec![lower],
    };

    let bases = if stem {
        bases
            .into_iter()
            .map(|b| morphology::stem_suffix(&b, prefix_len))
            .collect()
    } else {
        bases
    };

    bases
        .into_iter()
        .filter(|b| b.chars().all(morphology::is_legal_char))
        .collect()
}

fn prefix_of(word: &str, prefix_len: usize) -> String {
    word.chars().take(prefix_len).collect()
}

/// Stage 2: parse the corpus, emitting `base_form doc_id position` records
/// and the ordered title list.
fn emit_token_records(
    corpus_path: &Path,
    morphology_map: &HashMap<String, Vec<String>>,
    opts: &BuildOptions,
    records_out: &mut impl std::io::Write,
) -> Result<Vec<String>> {
    let f = fs::File::open(corpus_path)?;
    let reader = BufReader::new(f);

    let mut titles = Vec::new();
    let mut doc_id: u32 = 0;
    let mut position: u32 = 0;

    for line in reader.lines() {
        let line = line?;
        if let Some(title) = line.strip_prefix("##TITLE## ") {
            titles.push(title.trim().to_string());
            doc_id += 1;
            position = 0;
            continue;
        }
        if line.trim_start() == "##TITLE##" {
            titles.push(String::new());
            doc_id += 1;
            position = 0;
            continue;
        }
        if doc_id == 0 {
            continue; // body text before the first title is not attributable
        }

        for word in tokenize::tokenize(&line) {
            position += 1;
            let bases = normalize_build_time(morphology_map, word, opts.prefix_len, opts.stem);
            for base in bases {
                writeln!(records_out, "{base} {doc_id} {position}")?;
            }
        }
    }

    Ok(titles)
}

/// Stage 4: stream sorted `base doc_id position` records, accumulating a
/// buffer per base form and flushing to shards whenever the prefix changes.
fn build_shards_from_sorted_records(
    sorted_lines: impl Iterator<Item = String>,
    index_dir: &Path,
    prefix_len: usize,
    compressed: bool,
) -> Result<usize> {
    let mut buffer = ShardBuffer::default();
    let mut current_prefix: Option<String> = None;
    let mut shard_count = 0usize;

    for line in sorted_lines {
        let mut parts = line.split_whitespace();
        let (base, doc_id, position) = match (parts.next(), parts.next(), parts.next()) {
            (Some(b), Some(d), Some(p)) => (b, d, p),
            _ => continue,
        };
        let doc_id: u32 = match doc_id.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let position: u32 = match position.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };

        let prefix = prefix_of(base, prefix_len);
        if current_prefix.as_deref() != Some(prefix.as_str()) {
            if let Some(p) = current_prefix.take() {
                buffer.flush(index_dir, &p, compressed)?;
                shard_count += 1;
            }
            current_prefix = Some(prefix);
        }

        buffer.push(base, doc_id, position);
    }

    if let Some(p) = current_prefix {
        buffer.flush(index_dir, &p, compressed)?;
        shard_count += 1;
    }

    Ok(shard_count)
}

#[cfg(feature = "parallel")]
fn progress_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    pb
}

/// Run the full Index Builder pipeline: `corpus_path` + `morphology_path`
/// -> a populated `output_dir`.
pub fn run_build(
    corpus_path: &Path,
    morphology_path: &Path,
    output_dir: &Path,
    opts: BuildOptions,
) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    let tmp_dir = output_dir.join(".build-tmp");
    fs::create_dir_all(&tmp_dir)?;

    // Stage 1: morphology build.
    info!("morphology build: sorting {}", morphology_path.display());
    #[cfg(feature = "parallel")]
    let pb = progress_bar("sorting morphology source");
    let morph_sorted_path = tmp_dir.join("morphology.sorted");
    let raw_morph_lines: Vec<String> = {
        let f = fs::File::open(morphology_path)?;
        BufReader::new(f).lines().map_while(std::result::Result::ok).collect()
    };
    external_sort::sort_file(
        raw_morph_lines,
        &tmp_dir.join("morphology.unsorted"),
        &morph_sorted_path,
        &tmp_dir,
    )?;
    #[cfg(feature = "parallel")]
    pb.finish_and_clear();

    let morphology_map = load_morphology_map(morphology_path)?;
    morphology::build(
        external_sort::read_sorted_lines(&morph_sorted_path)?,
        output_dir,
        opts.prefix_len,
        opts.compressed,
    )?;

    // Stage 2: token stream.
    info!("corpus scan: {}", corpus_path.display());
    let records_path = tmp_dir.join("records.unsorted");
    let titles = {
        let mut out = std::io::BufWriter::new(fs::File::create(&records_path)?);
        emit_token_records(corpus_path, &morphology_map, &opts, &mut out)?
    };
    info!("corpus scan complete: {} documents", titles.len());

    // Stage 3: external sort of the token records already on disk from
    // stage 2 — sorted in place, not round-tripped through a writer.
    #[cfg(feature = "parallel")]
    let pb = progress_bar("sorting token records");
    let records_sorted_path = tmp_dir.join("records.sorted");
    external_sort::sort_existing_file(&records_path, &records_sorted_path, &tmp_dir)?;
    #[cfg(feature = "parallel")]
    pb.finish_and_clear();

    // Stage 4: shard build.
    let shard_count = build_shards_from_sorted_records(
        external_sort::read_sorted_lines(&records_sorted_path)?,
        output_dir,
        opts.prefix_len,
        opts.compressed,
    )?;
    info!("shard build complete: {shard_count} index shards written");

    // Stage 5: titles, plus the side files that describe the whole index.
    write_titles(output_dir, &titles, opts.compressed)?;
    write_compressed_marker(output_dir, opts.compressed)?;
    write_prefix_length(output_dir, opts.prefix_len)?;

    fs::remove_dir_all(&tmp_dir).ok();

    Ok(())
}
