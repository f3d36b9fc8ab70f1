// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! External-memory sorting via the system `sort` utility, C-locale, stable,
//! keyed on the first whitespace-delimited field (spec §4.4 step 3, §9
//! "External sort").
//!
//! The core never sorts records in memory — that would defeat the point of
//! a streaming, one-shard-at-a-time builder over a corpus too large to hold
//! in a process. `sort` is invoked as a blocking subprocess (spec §5's
//! "External sort is invoked as a blocking subprocess").

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::{EngineError, Result};

/// Write `lines` to `input_path`, then run `sort -k1,1 -s` in the `C`
/// locale against it, writing the sorted result to `output_path`.
///
/// `tmp_dir` is passed to `sort -T` so its scratch files land somewhere the
/// caller controls rather than a system-wide default.
pub fn sort_file<I>(lines: I, input_path: &Path, output_path: &Path, tmp_dir: &Path) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    {
        let f = File::create(input_path)?;
        let mut w = BufWriter::new(f);
        for line in lines {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
        }
        w.flush()?;
    }

    sort_existing_file(input_path, output_path, tmp_dir)
}

/// Sort a file already on disk in place, without rewriting it first. Used
/// when the caller already streamed its records to `input_path` and a lazy
/// reader over that same path would otherwise alias `sort_file`'s writer
/// side.
pub fn sort_existing_file(input_path: &Path, output_path: &Path, tmp_dir: &Path) -> Result<()> {
    info!("external sort: {} -> {}", input_path.display(), output_path.display());

    let status = Command::new("sort")
        .env("LC_ALL", "C")
        .arg("-k1,1")
        .arg("-s")
        .arg("-T")
        .arg(tmp_dir)
        .arg("-o")
        .arg(output_path)
        .arg(input_path)
        .status()?;

    if !status.success() {
        return Err(EngineError::IOError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("sort exited with {status}"),
        )));
    }

    Ok(())
}

/// Stream the lines of a previously-sorted file without loading it whole
/// into memory.
pub fn read_sorted_lines(path: &Path) -> Result<impl Iterator<Item = String>> {
    let f = File::open(path)?;
    let reader = BufReader::new(f);
    Ok(reader.lines().map_while(std::result::Result::ok))
}
