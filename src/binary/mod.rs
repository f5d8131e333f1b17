// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary persistence for suffix array indexes.
//!
//! The format is the plain recursive image of the index: no compression, no
//! checksums, no version byte. Loading is a sequence of bulk reads, so a
//! reloaded index is bit-for-bit the one that was saved.
//!
//! # Format Overview
//!
//! All integers are little-endian.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ MAGIC: u32 = 0xABEEFDAD                                    │
//! ├────────────────────────────────────────────────────────────┤
//! │ SEQUENCE                                                   │
//! │   len: u64 (sentinel included)                             │
//! │   bytes: [u8; len]                                         │
//! ├────────────────────────────────────────────────────────────┤
//! │ SUFFIX PERMUTATION                                         │
//! │   len: u64                                                 │
//! │   offsets: [i32; len]                                      │
//! ├────────────────────────────────────────────────────────────┤
//! │ PREFIX TABLE                                               │
//! │   k: u64 (0 = no table, section ends here)                 │
//! │   entry_count: u64                                         │
//! │   For each entry, sorted by key:                           │
//! │     key_len: u64, key: [u8; key_len]                       │
//! │     range_start: i32, range_end: i32 (inclusive)           │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;

pub use encoding::{Decode, Encode};
pub use header::{peek_header, read_magic, write_magic, IndexHeader, MAGIC, MAGIC_SIZE};

use std::io::{Read, Write};

use crate::error::Result;

/// Write the magic number followed by `value`.
pub fn write_framed<T: Encode + ?Sized, W: Write>(value: &T, w: &mut W) -> Result<()> {
    write_magic(w)?;
    value.encode(w)
}

/// Check the magic number, then decode a `T`.
pub fn read_framed<T: Decode + Default, R: Read>(r: &mut R) -> Result<T> {
    read_magic(r)?;
    T::decode(r)
}
