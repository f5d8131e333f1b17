// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The indexed character buffer.
//!
//! A `Sequence` is the caller's text with exactly one sentinel byte appended.
//! The sentinel must sort before every symbol actually used; for nucleotide
//! and protein alphabets `$` does. Validating the alphabet is the caller's job.

use std::io::{Read, Write};

use rayon::prelude::*;

use crate::binary::{Decode, Encode};
use crate::config::AlphabetPolicy;
use crate::error::Result;

/// Terminator appended once at the logical end.
pub const SENTINEL: u8 = b'$';

/// Bytes per rayon task when normalising the alphabet.
const NORMALIZE_CHUNK: usize = 1 << 16;

/// Immutable text plus trailing sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    bytes: Vec<u8>,
}

impl Sequence {
    /// Take ownership of `text` and append the sentinel.
    pub fn new(mut text: Vec<u8>) -> Self {
        text.push(SENTINEL);
        Self { bytes: text }
    }

    /// Apply `policy` to `text`, then append the sentinel.
    pub fn with_policy(mut text: Vec<u8>, policy: AlphabetPolicy, parallel: bool) -> Self {
        normalize_alphabet(&mut text, policy, parallel);
        Self::new(text)
    }

    /// Full buffer, sentinel included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The caller's text without the sentinel.
    pub fn text(&self) -> &[u8] {
        match self.bytes.split_last() {
            Some((_, text)) => text,
            None => &[],
        }
    }

    /// Length including the sentinel.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Suffix starting at `offset`. Out-of-range offsets give an empty slice.
    #[inline]
    pub fn suffix(&self, offset: usize) -> &[u8] {
        self.bytes.get(offset..).unwrap_or(&[])
    }
}

/// Rewrite `text` in place according to `policy`.
pub fn normalize_alphabet(text: &mut [u8], policy: AlphabetPolicy, parallel: bool) {
    match policy {
        AlphabetPolicy::Raw => {}
        AlphabetPolicy::Uppercase => {
            if parallel {
                text.par_chunks_mut(NORMALIZE_CHUNK)
                    .for_each(|chunk| chunk.make_ascii_uppercase());
            } else {
                text.make_ascii_uppercase();
            }
        }
    }
}

impl Encode for Sequence {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.bytes.encode(w)
    }
}

impl Decode for Sequence {
    fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()> {
        self.bytes.decode_into(r)
    }
}
