// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! File framing: the magic number and a cheap header peek.
//!
//! There is no version field. A layout change is a breaking change and gets
//! a new magic.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::encoding::{Decode, Encode};
use crate::error::{IndexError, Result};

/// Magic number at offset 0 of every index file.
pub const MAGIC: u32 = 0xABEE_FDAD;

/// Size of the magic on disk.
pub const MAGIC_SIZE: usize = 4;

pub fn write_magic<W: Write>(w: &mut W) -> Result<()> {
    MAGIC.encode(w)
}

/// Consume four bytes and check them against [`MAGIC`].
pub fn read_magic<R: Read>(r: &mut R) -> Result<()> {
    let found = u32::decode(r)?;
    if found != MAGIC {
        return Err(IndexError::Format {
            expected: MAGIC,
            found,
        });
    }
    Ok(())
}

/// Section sizes read from an index file without loading its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    /// Sequence length, sentinel included.
    pub sequence_len: u64,
    pub suffix_count: u64,
    /// Prefix table key length; zero when no table was built.
    pub prefix_len: u64,
    pub prefix_entries: u64,
    /// Total file size in bytes.
    pub file_size: u64,
}

impl IndexHeader {
    /// Walk the section lengths, seeking over the payload.
    pub fn read<R: Read + Seek>(r: &mut R) -> Result<Self> {
        read_magic(r)?;

        let sequence_len = u64::decode(r)?;
        skip(r, sequence_len, 1)?;

        let suffix_count = u64::decode(r)?;
        skip(r, suffix_count, 4)?;

        let prefix_len = u64::decode(r)?;
        let prefix_entries = if prefix_len != 0 { u64::decode(r)? } else { 0 };

        let file_size = r.seek(SeekFrom::End(0))?;

        Ok(Self {
            sequence_len,
            suffix_count,
            prefix_len,
            prefix_entries,
            file_size,
        })
    }
}

/// Read the header of the index file at `path`.
pub fn peek_header(path: &Path) -> Result<IndexHeader> {
    let mut reader = BufReader::new(File::open(path)?);
    IndexHeader::read(&mut reader)
}

fn skip<R: Seek>(r: &mut R, count: u64, width: u64) -> Result<()> {
    let bytes = count
        .checked_mul(width)
        .and_then(|b| i64::try_from(b).ok())
        .ok_or_else(|| {
            IndexError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("section of {} elements overflows the file offset", count),
            ))
        })?;
    r.seek(SeekFrom::Current(bytes))?;
    Ok(())
}
