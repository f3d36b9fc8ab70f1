// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shard file header and footer.
//!
//! Every shard on disk (positional, non-positional, or morphology) is
//! wrapped the same way: a fixed 6-byte header, then the payload (gzipped
//! when the index is `compressed`), then an 8-byte footer carrying a CRC32
//! of everything that came before it. A bad checksum means the file was
//! truncated or corrupted; we'd rather fail loudly with `CodecError` than
//! hand back a partial posting.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

/// Magic bytes identifying a shard file: "BSRX" in ASCII.
pub const MAGIC: [u8; 4] = [0x42, 0x53, 0x52, 0x58];

/// Footer magic, the header magic reversed: "XRSB".
pub const FOOTER_MAGIC: [u8; 4] = [0x58, 0x52, 0x53, 0x42];

/// Current shard format version.
pub const VERSION: u8 = 1;

/// Fixed-size header: magic + version + a flags byte (bit 0 = gzipped).
#[derive(Debug, Clone, Copy)]
pub struct ShardHeader {
    pub version: u8,
    pub gzipped: bool,
}

impl ShardHeader {
    pub const SIZE: usize = 6;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[if self.gzipped { 1 } else { 0 }])?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("bad shard magic: {:?}", magic),
            ));
        }
        let mut rest = [0u8; 2];
        r.read_exact(&mut rest)?;
        Ok(ShardHeader {
            version: rest[0],
            gzipped: rest[1] != 0,
        })
    }
}

/// Trailing CRC32 + magic, over everything written before it.
#[derive(Debug, Clone, Copy)]
pub struct ShardFooter {
    pub crc32: u32,
}

impl ShardFooter {
    pub const SIZE: usize = 8;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "file too short for footer",
            ));
        }
        let start = bytes.len() - Self::SIZE;
        let magic = &bytes[start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("bad footer magic: {:?}", magic),
            ));
        }
        let crc32 = u32::from_le_bytes([
            bytes[start],
            bytes[start + 1],
            bytes[start + 2],
            bytes[start + 3],
        ]);
        Ok(ShardFooter { crc32 })
    }

    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
