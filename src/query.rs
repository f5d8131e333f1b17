// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Exact substring lookup by binary search over the suffix array.
//!
//! A pattern occurs at every suffix that starts with it, and those suffixes
//! form one contiguous block of the suffix array. Two binary searches find
//! the block: the first suffix `>= pattern`, then the first suffix that is
//! past every extension of `pattern`.
//!
//! # Modes
//!
//! - `Naive` compares the whole pattern at every probe.
//! - `SimpleAccelerant` remembers how many leading characters the pattern
//!   shares with the current lower and upper bracket. Every suffix between
//!   the brackets shares at least the smaller of the two, so the next
//!   comparison starts there. Same answers, fewer character comparisons.
//!
//! With a prefix table, a pattern of length `>= k` first jumps to the block
//! for its first `k` characters; a missing key means no match at all.

use std::cmp::Ordering;
use std::ops::Range;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::QueryConfig;
use crate::prefix_table::PrefixTable;
use crate::utils::common_prefix_len;

/// Binary search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Naive,
    #[default]
    #[serde(rename = "simpleaccel")]
    SimpleAccelerant,
}

impl QueryMode {
    /// `"naive"` selects `Naive`; any other name selects `SimpleAccelerant`.
    pub fn from_name(name: &str) -> Self {
        if name == "naive" {
            QueryMode::Naive
        } else {
            QueryMode::SimpleAccelerant
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QueryMode::Naive => "naive",
            QueryMode::SimpleAccelerant => "simpleaccel",
        }
    }
}

/// Which boundary a search is looking for.
#[derive(Clone, Copy)]
enum Bound {
    /// First suffix that is `>=` the pattern.
    Lower,
    /// First suffix that is past every suffix starting with the pattern.
    Upper,
}

impl Bound {
    #[inline]
    fn is_right_of(self, ord: Ordering) -> bool {
        match self {
            Bound::Lower => ord != Ordering::Less,
            Bound::Upper => ord == Ordering::Greater,
        }
    }
}

/// Read-only view used to answer queries.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    sequence: &'a [u8],
    suffixes: &'a [i32],
    table: Option<&'a PrefixTable>,
}

impl<'a> QueryEngine<'a> {
    /// A table with `k == 0` is treated as absent.
    pub fn new(sequence: &'a [u8], suffixes: &'a [i32], table: Option<&'a PrefixTable>) -> Self {
        Self {
            sequence,
            suffixes,
            table: table.filter(|t| t.k() > 0),
        }
    }

    /// Suffix array positions whose suffixes start with `pattern`.
    pub fn find(&self, pattern: &[u8], mode: QueryMode) -> Range<usize> {
        let (window, shared) = match self.table {
            Some(table) if pattern.len() >= table.k() => {
                match table.get(&pattern[..table.k()]) {
                    Some(range) => (range.positions(), table.k()),
                    None => return 0..0,
                }
            }
            _ => (0..self.suffixes.len(), 0),
        };

        let lower = self.search(pattern, window.clone(), shared, Bound::Lower, mode);
        let upper = self.search(pattern, lower..window.end, shared, Bound::Upper, mode);
        lower..upper
    }

    /// Start offsets of every occurrence, in suffix order.
    pub fn query(&self, pattern: &[u8], mode: QueryMode) -> &'a [i32] {
        &self.suffixes[self.find(pattern, mode)]
    }

    /// Evaluate independent patterns, results in input order.
    pub fn query_batch<P>(&self, patterns: &[P], config: &QueryConfig) -> Vec<Range<usize>>
    where
        P: AsRef<[u8]> + Sync,
    {
        if config.parallel {
            patterns
                .par_iter()
                .map(|p| self.find(p.as_ref(), config.mode))
                .collect()
        } else {
            patterns
                .iter()
                .map(|p| self.find(p.as_ref(), config.mode))
                .collect()
        }
    }

    pub fn suffixes(&self) -> &'a [i32] {
        self.suffixes
    }

    /// Partition point of `bound` within `window`.
    ///
    /// Every suffix in `window` is known to share its first `shared`
    /// characters with `pattern`.
    fn search(
        &self,
        pattern: &[u8],
        window: Range<usize>,
        shared: usize,
        bound: Bound,
        mode: QueryMode,
    ) -> usize {
        let (mut lo, mut hi) = (window.start, window.end);
        // Characters the pattern shares with the suffixes just outside [lo, hi).
        let (mut lcp_lo, mut lcp_hi) = (shared, shared);

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let skip = match mode {
                QueryMode::Naive => 0,
                QueryMode::SimpleAccelerant => lcp_lo.min(lcp_hi),
            };
            let (ord, lcp) = self.compare(self.suffixes[mid] as usize, pattern, skip);
            if bound.is_right_of(ord) {
                hi = mid;
                lcp_hi = lcp;
            } else {
                lo = mid + 1;
                lcp_lo = lcp;
            }
        }
        lo
    }

    /// Compare the suffix at `offset` to `pattern`, starting at index `skip`.
    ///
    /// `Equal` means the suffix starts with `pattern`. Also returns the
    /// length of the common prefix.
    #[inline]
    fn compare(&self, offset: usize, pattern: &[u8], skip: usize) -> (Ordering, usize) {
        let suffix = self.sequence.get(offset..).unwrap_or(&[]);
        let tail = suffix.get(skip..).unwrap_or(&[]);
        let lcp = skip + common_prefix_len(tail, &pattern[skip..]);
        if lcp == pattern.len() {
            return (Ordering::Equal, lcp);
        }
        match suffix.get(lcp) {
            Some(c) => (c.cmp(&pattern[lcp]), lcp),
            // The suffix is a proper prefix of the pattern.
            None => (Ordering::Less, lcp),
        }
    }
}
