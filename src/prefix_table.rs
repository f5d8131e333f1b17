// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix table: every k-length prefix mapped to its block of the suffix array.
//!
//! Because the suffix array is sorted, all suffixes sharing a k-prefix sit in
//! one contiguous run. The table records each run as an inclusive
//! `[start, end]`, letting a query jump straight to its run instead of
//! binary searching the whole array.
//!
//! # Parallel construction
//!
//! ```text
//! suffix array:  | a$ | an | an | ba | na | na |   (k = 2)
//! chunks (F=3):  |  chunk 0  |  chunk 1  |  chunk 2  |
//!                        └─ "an" run straddles 0/1 ─┘
//! ```
//!
//! Each chunk runs the sequential scan over its own slice of positions. A run
//! belongs to the chunk where it starts: that chunk reads past its end to
//! find where the run stops, and the next chunk skips its leading entries
//! while they continue the run from across the boundary. The per-chunk
//! tables therefore have disjoint keys and merge by plain union. The merge
//! is single-threaded; that is fine, suffix sorting dominates build time.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::ops::Range;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::binary::{Decode, Encode};
use crate::config::BuildConfig;
use crate::error::{IndexError, Result};
use crate::utils::Timer;

/// Inclusive block `[start, end]` of suffix array positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrefixRange {
    pub start: i32,
    pub end: i32,
}

impl PrefixRange {
    pub fn new(start: usize, end_inclusive: usize) -> Self {
        Self {
            start: start as i32,
            end: end_inclusive as i32,
        }
    }

    /// Half-open positions covered by this block.
    pub fn positions(&self) -> Range<usize> {
        self.start as usize..self.end as usize + 1
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl Encode for PrefixRange {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.start.encode(w)?;
        self.end.encode(w)
    }
}

impl Decode for PrefixRange {
    fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()> {
        self.start.decode_into(r)?;
        self.end.decode_into(r)
    }
}

/// Map from k-length prefix to its suffix array block.
///
/// Keys are kept sorted so the serialised table is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTable {
    k: usize,
    entries: BTreeMap<Vec<u8>, PrefixRange>,
}

impl PrefixTable {
    /// Key length. Zero means "no table".
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, prefix: &[u8]) -> Option<PrefixRange> {
        self.entries.get(prefix).copied()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], PrefixRange)> + '_ {
        self.entries.iter().map(|(key, range)| (key.as_slice(), *range))
    }

    /// Build with the strategy `config` asks for.
    pub fn build(sequence: &[u8], suffixes: &[i32], config: &BuildConfig) -> Self {
        let timer = Timer::started();
        let table = if config.parallel {
            Self::build_parallel(sequence, suffixes, config.prefix_len, config.effective_fanout())
        } else {
            Self::build_sequential(sequence, suffixes, config.prefix_len)
        };
        info!(
            k = config.prefix_len,
            entries = table.len(),
            parallel = config.parallel,
            elapsed_ms = timer.elapsed_ms(),
            "built prefix table"
        );
        table
    }

    /// Single left-to-right scan of the whole suffix array.
    pub fn build_sequential(sequence: &[u8], suffixes: &[i32], k: usize) -> Self {
        if k == 0 {
            return Self::default();
        }
        let runs = RunScanner::new(sequence, suffixes, k).scan(0..suffixes.len());
        Self {
            k,
            entries: runs.into_iter().collect(),
        }
    }

    /// Scan `fanout` contiguous chunks on the rayon pool, then merge.
    ///
    /// Produces exactly the table `build_sequential` does.
    pub fn build_parallel(sequence: &[u8], suffixes: &[i32], k: usize, fanout: usize) -> Self {
        if k == 0 {
            return Self::default();
        }

        let n = suffixes.len();
        // More chunks than suffixes would only add empty ones.
        let fanout = fanout.clamp(1, n.max(1));
        let chunk_len = n.div_ceil(fanout).max(1);
        let scanner = RunScanner::new(sequence, suffixes, k);

        let chunks: Vec<Vec<(Vec<u8>, PrefixRange)>> = (0..fanout)
            .into_par_iter()
            .map(|chunk| {
                let start = (chunk * chunk_len).min(n);
                let end = (start + chunk_len).min(n);
                scanner.scan(start..end)
            })
            .collect();

        let mut entries = BTreeMap::new();
        for runs in chunks {
            for (key, range) in runs {
                let previous = entries.insert(key, range);
                debug_assert!(previous.is_none(), "chunks produced overlapping keys");
            }
        }
        debug!(k, fanout, chunk_len, entries = entries.len(), "merged prefix table chunks");

        Self { k, entries }
    }
}

/// Finds runs of equal k-prefixes in a sorted suffix array.
#[derive(Clone, Copy)]
struct RunScanner<'a> {
    sequence: &'a [u8],
    suffixes: &'a [i32],
    k: usize,
}

impl<'a> RunScanner<'a> {
    fn new(sequence: &'a [u8], suffixes: &'a [i32], k: usize) -> Self {
        Self {
            sequence,
            suffixes,
            k,
        }
    }

    /// k-prefix of the suffix at `position`, if that suffix is long enough.
    #[inline]
    fn prefix_at(&self, position: usize) -> Option<&'a [u8]> {
        let offset = self.suffixes[position] as usize;
        let end = offset.checked_add(self.k)?;
        self.sequence.get(offset..end)
    }

    /// First position at or after `from` whose prefix differs from `prefix`.
    fn run_end(&self, prefix: &[u8], from: usize) -> usize {
        let mut pos = from;
        while pos < self.suffixes.len() && self.prefix_at(pos) == Some(prefix) {
            pos += 1;
        }
        pos
    }

    /// Runs that start inside `positions`. A run may extend past the end.
    fn scan(&self, positions: Range<usize>) -> Vec<(Vec<u8>, PrefixRange)> {
        let mut runs = Vec::new();
        let mut i = positions.start;

        // A leading run that began before this chunk belongs to the chunk before.
        if i > 0 && i < positions.end {
            if let Some(first) = self.prefix_at(i) {
                if self.prefix_at(i - 1) == Some(first) {
                    i = self.run_end(first, i);
                }
            }
        }

        while i < positions.end {
            let Some(prefix) = self.prefix_at(i) else {
                i += 1;
                continue;
            };
            let end = self.run_end(prefix, i + 1);
            runs.push((prefix.to_vec(), PrefixRange::new(i, end - 1)));
            i = end;
        }

        runs
    }
}

impl Encode for PrefixTable {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.k.encode(w)?;
        if self.k == 0 {
            return Ok(());
        }
        self.entries.len().encode(w)?;
        for (key, range) in &self.entries {
            key.encode(w)?;
            range.encode(w)?;
        }
        Ok(())
    }
}

impl Decode for PrefixTable {
    fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()> {
        self.entries.clear();
        self.k.decode_into(r)?;
        if self.k == 0 {
            return Ok(());
        }

        let count = u64::decode(r)?;
        for _ in 0..count {
            let key = Vec::<u8>::decode(r)?;
            let range = PrefixRange::decode(r)?;
            if key.len() != self.k {
                return Err(IndexError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("prefix key of length {} in a k={} table", key.len(), self.k),
                )));
            }
            self.entries.insert(key, range);
        }
        Ok(())
    }
}
