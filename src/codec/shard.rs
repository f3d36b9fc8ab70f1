// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Atomic shard file I/O: header, optional gzip, CRC32 footer.
//!
//! This is the one place that touches the filesystem for shards. Every
//! caller hands it an already-encoded body (a key→posting mapping, already
//! varint-packed) and gets back bytes with the same shape on read. Gzipping
//! and checksumming happen here so `index_store` and `morphology` don't
//! repeat the plumbing.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::header::{ShardFooter, ShardHeader, VERSION};
use crate::error::{EngineError, Result};

/// Write `body` to `path`, wrapped in a header + (optional gzip) + CRC32
/// footer. Writes to a temp file in the same directory and renames into
/// place so a reader never observes a partial shard.
pub fn write_shard(path: &Path, body: &[u8], gzip: bool) -> Result<()> {
    let payload = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(body)?;
        encoder.finish()?
    } else {
        body.to_vec()
    };

    let header = ShardHeader {
        version: VERSION,
        gzipped: gzip,
    };

    let mut out = Vec::with_capacity(ShardHeader::SIZE + payload.len() + ShardFooter::SIZE);
    header.write(&mut out)?;
    out.extend_from_slice(&payload);

    let crc32 = ShardFooter::compute_crc32(&out);
    let footer = ShardFooter { crc32 };
    footer.write(&mut out)?;

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("shard")
    ));
    {
        let mut f = File::create(&tmp_path)?;
        f.write_all(&out)?;
        f.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Read a shard written by [`write_shard`], validating the header magic and
/// footer CRC32, and returning the decoded (un-gzipped) body.
pub fn read_shard(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)?;
    decode_shard(&bytes)
}

fn decode_shard(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() < ShardHeader::SIZE + ShardFooter::SIZE {
        return Err(EngineError::CodecError(
            "shard shorter than header+footer".to_string(),
        ));
    }

    let footer = ShardFooter::read(bytes)
        .map_err(|e| EngineError::CodecError(format!("footer: {e}")))?;
    let content = &bytes[..bytes.len() - ShardFooter::SIZE];
    let actual_crc32 = ShardFooter::compute_crc32(content);
    if actual_crc32 != footer.crc32 {
        return Err(EngineError::CodecError(format!(
            "checksum mismatch: expected {:08x}, got {:08x}",
            footer.crc32, actual_crc32
        )));
    }

    let mut cursor: &[u8] = content;
    let header = ShardHeader::read(&mut cursor)
        .map_err(|e| EngineError::CodecError(format!("header: {e}")))?;
    let payload = &content[ShardHeader::SIZE..];

    if header.gzipped {
        let mut decoder = GzDecoder::new(payload);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|e| EngineError::CodecError(format!("gzip: {e}")))?;
        Ok(out)
    } else {
        Ok(payload.to_vec())
    }
}
