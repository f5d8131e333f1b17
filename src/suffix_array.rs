// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suffix array construction.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **PERMUTATION**: `suffixes` holds every offset in `[0, len)` exactly once
//! 2. **SORTED**: `sequence[suffixes[i]..] < sequence[suffixes[i + 1]..]`
//! 3. **ATOMIC**: construction either yields both the sequence and its
//!    permutation or fails with nothing usable left behind

use tracing::info;

use crate::error::{IndexError, Result};
use crate::sais::sort_suffixes;
use crate::sequence::{Sequence, SENTINEL};
use crate::utils::Timer;

/// Ordering of all suffix start offsets. `i32` matches the on-disk layout.
pub type SuffixPermutation = Vec<i32>;

/// Sort the suffixes of `sequence` (sentinel already appended).
///
/// The sentinel may appear only at the end; one inside the text fails with
/// `Construction`.
pub fn build(sequence: &Sequence) -> Result<SuffixPermutation> {
    if let Some(pos) = sequence.text().iter().position(|&b| b == SENTINEL) {
        return Err(IndexError::Construction(format!(
            "sentinel '{}' inside the text at offset {}",
            SENTINEL as char, pos
        )));
    }

    let timer = Timer::started();
    let suffixes = sort_suffixes(sequence.as_bytes())?;
    info!(
        len = sequence.len(),
        elapsed_ms = timer.elapsed_ms(),
        "built suffix array"
    );
    Ok(suffixes)
}

/// Check the SORTED invariant by direct comparison.
///
/// O(n * lcp); meant for tests and `verify`, not the hot path.
pub fn is_suffix_array_sorted(sequence: &[u8], suffixes: &[i32]) -> bool {
    suffixes.windows(2).all(|pair| {
        let prev = sequence.get(pair[0] as usize..).unwrap_or(&[]);
        let curr = sequence.get(pair[1] as usize..).unwrap_or(&[]);
        prev < curr
    })
}
