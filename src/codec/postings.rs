// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Gap coding and binary encoding of posting lists.
//!
//! A posting is the heart of the inverted index: for each base form, which
//! documents contain it, and at which positions? Doc ids and, within a
//! document, positions both tend to increase in small steps, so when the
//! index is built `--compressed` we store first-differences ("gaps")
//! instead of absolute values. A run like `[100, 102, 105]` becomes
//! `[100, 2, 3]`; small deltas mean small varints.
//!
//! Gap coding is only ever applied at build time under `--compressed` (spec
//! §4.1); reading a shard always yields absolute, strictly increasing
//! sequences regardless of how they were stored.

use std::io;

use super::varint::{decode_varint, encode_varint};
use crate::types::{DocId, NonPositionalPosting, PositionalPosting, Position};

/// Delta-encode a strictly increasing sequence: `[d0, d1, d2, ...]` becomes
/// `[d0, d1-d0, d2-d1, ...]`.
fn delta_encode(values: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev = 0u32;
    for &v in values {
        out.push(v - prev);
        prev = v;
    }
    out
}

/// Inverse of [`delta_encode`].
fn delta_decode(deltas: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(deltas.len());
    let mut running = 0u32;
    for &d in deltas {
        running += d;
        out.push(running);
    }
    out
}

/// Encode a non-positional posting: entry count, then doc ids (gap-coded
/// when `gap_code`).
pub fn encode_nonpositional(posting: &NonPositionalPosting, gap_code: bool, buf: &mut Vec<u8>) {
    encode_varint(posting.len() as u64, buf);
    let values = if gap_code {
        delta_encode(posting)
    } else {
        posting.clone()
    };
    for v in values {
        encode_varint(v as u64, buf);
    }
}

pub fn decode_nonpositional(
    bytes: &[u8],
    gap_coded: bool,
) -> io::Result<(NonPositionalPosting, usize)> {
    let (count, mut pos) = decode_varint(bytes)?;
    let count = count as usize;
    let mut raw = Vec::with_capacity(count);
    for _ in 0..count {
        let (v, consumed) = decode_varint(&bytes[pos..])?;
        pos += consumed;
        raw.push(v as u32);
    }
    let doc_ids = if gap_coded { delta_decode(&raw) } else { raw };
    Ok((doc_ids, pos))
}

/// Encode a positional posting: entry count, then for each entry the doc id
/// and its position list — both gap-coded when `gap_code`.
pub fn encode_positional(posting: &PositionalPosting, gap_code: bool, buf: &mut Vec<u8>) {
    encode_varint(posting.len() as u64, buf);
    let doc_ids: Vec<u32> = posting.iter().map(|(d, _)| *d).collect();
    let doc_values = if gap_code {
        delta_encode(&doc_ids)
    } else {
        doc_ids.clone()
    };
    for (doc_value, (_, positions)) in doc_values.into_iter().zip(posting.iter()) {
        encode_varint(doc_value as u64, buf);
        encode_varint(positions.len() as u64, buf);
        let pos_values = if gap_code {
            delta_encode(positions)
        } else {
            positions.clone()
        };
        for p in pos_values {
            encode_varint(p as u64, buf);
        }
    }
}

pub fn decode_positional(
    bytes: &[u8],
    gap_coded: bool,
) -> io::Result<(PositionalPosting, usize)> {
    let (count, mut pos) = decode_varint(bytes)?;
    let count = count as usize;

    let mut raw_doc_values = Vec::with_capacity(count);
    let mut position_lists: Vec<Vec<Position>> = Vec::with_capacity(count);

    for _ in 0..count {
        let (doc_value, consumed) = decode_varint(&bytes[pos..])?;
        pos += consumed;
        raw_doc_values.push(doc_value as u32);

        let (pos_count, consumed) = decode_varint(&bytes[pos..])?;
        pos += consumed;
        let pos_count = pos_count as usize;

        let mut raw_positions = Vec::with_capacity(pos_count);
        for _ in 0..pos_count {
            let (p, consumed) = decode_varint(&bytes[pos..])?;
            pos += consumed;
            raw_positions.push(p as u32);
        }
        let positions = if gap_coded {
            delta_decode(&raw_positions)
        } else {
            raw_positions
        };
        position_lists.push(positions);
    }

    let doc_ids: Vec<DocId> = if gap_coded {
        delta_decode(&raw_doc_values)
    } else {
        raw_doc_values
    };

    let posting = doc_ids.into_iter().zip(position_lists).collect();
    Ok((posting, pos))
}
