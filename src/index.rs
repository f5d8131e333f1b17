// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index facade: build, persist, reload, query.
//!
//! # Lifecycle
//!
//! ```text
//! text ──▶ Sequence (+ '$') ──▶ sort_suffixes ──▶ PrefixTable (k > 0)
//!                                                     │
//!                     save ◀──── SuffixIndex ◀────────┘
//!                       │             ▲
//!                       ▼             │
//!                  index file ───── load
//! ```
//!
//! Construction is all-or-nothing: a sort failure returns an error and no
//! index. Once built, nothing mutates the index, so any number of threads
//! can query it at once.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::ops::Range;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::binary::{read_framed, write_framed, Decode, Encode};
use crate::config::{BuildConfig, QueryConfig};
use crate::error::Result;
use crate::fasta::read_reference;
use crate::prefix_table::PrefixTable;
use crate::query::{QueryEngine, QueryMode};
use crate::sequence::Sequence;
use crate::suffix_array::{self, SuffixPermutation};
use crate::utils::Timer;
use crate::verify::{check_bounds, check_index};

/// Wall-clock cost of each build step. Never persisted; zero after `load`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BuildStats {
    pub sort_ms: f64,
    pub prefix_table_ms: f64,
}

/// Sequence, its suffix array, and an optional prefix table.
#[derive(Debug, Clone, Default)]
pub struct SuffixIndex {
    sequence: Sequence,
    suffixes: SuffixPermutation,
    /// `k == 0` when no table was requested.
    prefix_table: PrefixTable,
    stats: BuildStats,
}

impl SuffixIndex {
    /// Index `text`. The sentinel is appended here; a `text` that already
    /// contains it fails with `Construction`.
    pub fn from_text(text: impl Into<Vec<u8>>, config: &BuildConfig) -> Result<Self> {
        let sequence = Sequence::with_policy(text.into(), config.alphabet, config.parallel);

        let mut timer = Timer::started();
        let suffixes = suffix_array::build(&sequence)?;
        timer.stop();
        let sort_ms = timer.elapsed_ms();

        let mut timer = Timer::started();
        let prefix_table = if config.prefix_len > 0 {
            PrefixTable::build(sequence.as_bytes(), &suffixes, config)
        } else {
            PrefixTable::default()
        };
        timer.stop();

        Ok(Self {
            sequence,
            suffixes,
            prefix_table,
            stats: BuildStats {
                sort_ms,
                prefix_table_ms: timer.elapsed_ms(),
            },
        })
    }

    /// Index the concatenated body of a FASTA reference.
    pub fn from_fasta(path: &Path, config: &BuildConfig) -> Result<Self> {
        Self::from_text(read_reference(path)?, config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let timer = Timer::started();
        let mut writer = BufWriter::new(File::create(path)?);
        write_framed(self, &mut writer)?;
        writer.flush()?;
        info!(
            path = %path.display(),
            len = self.sequence.len(),
            k = self.prefix_len(),
            elapsed_ms = timer.elapsed_ms(),
            "saved index"
        );
        Ok(())
    }

    /// Read an index written by [`save`](Self::save).
    ///
    /// Offsets and prefix ranges are bounds-checked so a damaged file can't
    /// make a query panic. Ordering is not; call [`verify`](Self::verify)
    /// for that.
    pub fn load(path: &Path) -> Result<Self> {
        let timer = Timer::started();
        let mut reader = BufReader::new(File::open(path)?);
        let index: Self = read_framed(&mut reader)?;
        info!(
            path = %path.display(),
            len = index.sequence.len(),
            k = index.prefix_len(),
            elapsed_ms = timer.elapsed_ms(),
            "loaded index"
        );
        Ok(index)
    }

    /// The exact bytes `save` would write.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        write_framed(self, &mut buf)?;
        Ok(buf)
    }

    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        read_framed(&mut bytes)
    }

    pub fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(
            self.sequence.as_bytes(),
            &self.suffixes,
            self.prefix_table(),
        )
    }

    /// Start offsets of every occurrence of `pattern`, in suffix order.
    pub fn query(&self, pattern: &[u8], mode: QueryMode) -> &[i32] {
        self.engine().query(pattern, mode)
    }

    /// Suffix array positions matching `pattern`.
    pub fn find(&self, pattern: &[u8], mode: QueryMode) -> Range<usize> {
        self.engine().find(pattern, mode)
    }

    pub fn query_batch<P>(&self, patterns: &[P], config: &QueryConfig) -> Vec<Range<usize>>
    where
        P: AsRef<[u8]> + Sync,
    {
        self.engine().query_batch(patterns, config)
    }

    /// The indexed bytes, sentinel included.
    pub fn data(&self) -> &[u8] {
        self.sequence.as_bytes()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn suffixes(&self) -> &[i32] {
        &self.suffixes
    }

    pub fn prefix_table(&self) -> Option<&PrefixTable> {
        (self.prefix_table.k() > 0).then_some(&self.prefix_table)
    }

    /// Prefix table key length; zero when there is no table.
    pub fn prefix_len(&self) -> usize {
        self.prefix_table.k()
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Check every structural invariant. O(n * lcp).
    pub fn verify(&self) -> Result<()> {
        check_index(self.data(), &self.suffixes, self.prefix_table())?;
        Ok(())
    }

    /// Suffix table view showing at most `limit` rows.
    pub fn rows(&self, limit: usize) -> SuffixRows<'_> {
        SuffixRows { index: self, limit }
    }
}

impl Encode for SuffixIndex {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.sequence.encode(w)?;
        self.suffixes.encode(w)?;
        self.prefix_table.encode(w)
    }
}

impl Decode for SuffixIndex {
    fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()> {
        self.sequence.decode_into(r)?;
        self.suffixes.decode_into(r)?;
        self.prefix_table.decode_into(r)?;
        check_bounds(self.sequence.as_bytes(), &self.suffixes, &self.prefix_table)?;
        self.stats = BuildStats::default();
        Ok(())
    }
}

/// The `i  A[i]  S[A[i]..]` table for the first `limit` suffixes.
pub struct SuffixRows<'a> {
    index: &'a SuffixIndex,
    limit: usize,
}

impl fmt::Display for SuffixRows<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "i\tA[i]\tS[A[i]..]")?;
        for (i, &offset) in self.index.suffixes.iter().take(self.limit).enumerate() {
            let suffix = self.index.sequence.suffix(offset as usize);
            writeln!(f, "{}\t{}\t{}", i, offset, String::from_utf8_lossy(suffix))?;
        }
        Ok(())
    }
}

impl fmt::Display for SuffixIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rows(usize::MAX), f)
    }
}
