// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural checks for a suffix array and its prefix table.
//!
//! | Check                  | What's Guaranteed                                  |
//! |------------------------|----------------------------------------------------|
//! | `check_sentinel`       | Sequence ends with exactly one `$`                 |
//! | `check_permutation`    | Every offset in `[0, n)` appears exactly once      |
//! | `check_sorted`         | Adjacent suffixes strictly ascend                  |
//! | `check_prefix_table`   | Ranges are exact, disjoint, and cover all suffixes |
//!
//! Building never needs these: the sort primitive and the table builder
//! establish the invariants. They exist for indexes read from disk and for
//! tests.

use std::cmp::Ordering;

use thiserror::Error;

use crate::prefix_table::PrefixTable;
use crate::sequence::SENTINEL;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("sequence does not end with a single sentinel")]
    MissingSentinel,

    #[error("suffix array has {suffix_len} entries for a sequence of length {sequence_len}")]
    LengthMismatch {
        sequence_len: usize,
        suffix_len: usize,
    },

    #[error("suffix array entry {position} is offset {offset}, outside 0..{len}")]
    OffsetOutOfBounds {
        position: usize,
        offset: i32,
        len: usize,
    },

    #[error("offset {offset} appears twice, second time at position {position}")]
    DuplicateOffset { position: usize, offset: i32 },

    #[error("suffix array not sorted at position {position}")]
    UnsortedSuffixArray { position: usize },

    #[error("prefix range for '{key}' is [{start}, {end}], outside the suffix array")]
    InvalidPrefixRange { key: String, start: i32, end: i32 },

    #[error("suffix at position {position} does not start with prefix '{key}'")]
    PrefixMismatch { key: String, position: usize },

    #[error("prefix range for '{key}' overlaps or precedes the previous range")]
    OverlappingPrefixRanges { key: String },

    #[error("prefix table covers {covered} suffixes, expected {expected}")]
    IncompletePrefixTable { covered: usize, expected: usize },
}

/// The sequence must end with the sentinel, and only there.
pub fn check_sentinel(sequence: &[u8]) -> Result<(), InvariantError> {
    match sequence.split_last() {
        Some((&SENTINEL, text)) if !text.contains(&SENTINEL) => Ok(()),
        _ => Err(InvariantError::MissingSentinel),
    }
}

/// `suffixes` is a permutation of `0..sequence.len()`.
pub fn check_permutation(sequence: &[u8], suffixes: &[i32]) -> Result<(), InvariantError> {
    let n = sequence.len();
    if suffixes.len() != n {
        return Err(InvariantError::LengthMismatch {
            sequence_len: n,
            suffix_len: suffixes.len(),
        });
    }

    let mut seen = vec![false; n];
    for (position, &offset) in suffixes.iter().enumerate() {
        let slot = usize::try_from(offset)
            .ok()
            .filter(|&o| o < n)
            .ok_or(InvariantError::OffsetOutOfBounds {
                position,
                offset,
                len: n,
            })?;
        if std::mem::replace(&mut seen[slot], true) {
            return Err(InvariantError::DuplicateOffset { position, offset });
        }
    }
    Ok(())
}

/// Adjacent suffixes strictly ascend. Offsets must already be in bounds.
pub fn check_sorted(sequence: &[u8], suffixes: &[i32]) -> Result<(), InvariantError> {
    for position in 1..suffixes.len() {
        let prev = &sequence[suffixes[position - 1] as usize..];
        let curr = &sequence[suffixes[position] as usize..];
        if prev.cmp(curr) != Ordering::Less {
            return Err(InvariantError::UnsortedSuffixArray { position });
        }
    }
    Ok(())
}

/// Every range holds exactly the suffixes starting with its key.
///
/// A table with `k == 0` is trivially valid. Offsets must already be in
/// bounds.
pub fn check_prefix_table(
    sequence: &[u8],
    suffixes: &[i32],
    table: &PrefixTable,
) -> Result<(), InvariantError> {
    let k = table.k();
    if k == 0 {
        return Ok(());
    }

    let mut covered = 0usize;
    let mut previous_end: Option<i32> = None;

    check_prefix_ranges(suffixes.len(), table)?;

    for (key, range) in table.iter() {
        let label = String::from_utf8_lossy(key).into_owned();
        if previous_end.is_some_and(|end| range.start <= end) {
            return Err(InvariantError::OverlappingPrefixRanges { key: label });
        }
        previous_end = Some(range.end);

        for position in range.positions() {
            if !sequence[suffixes[position] as usize..].starts_with(key) {
                return Err(InvariantError::PrefixMismatch {
                    key: label,
                    position,
                });
            }
        }
        covered += range.len();
    }

    let expected = suffixes
        .iter()
        .filter(|&&offset| sequence.len() - offset as usize >= k)
        .count();
    if covered != expected {
        return Err(InvariantError::IncompletePrefixTable { covered, expected });
    }
    Ok(())
}

/// Every range is non-empty and lies inside a suffix array of `len` entries.
pub fn check_prefix_ranges(len: usize, table: &PrefixTable) -> Result<(), InvariantError> {
    for (key, range) in table.iter() {
        if range.start < 0 || range.end < range.start || range.end as usize >= len {
            return Err(InvariantError::InvalidPrefixRange {
                key: String::from_utf8_lossy(key).into_owned(),
                start: range.start,
                end: range.end,
            });
        }
    }
    Ok(())
}

/// The O(n) subset of [`check_index`] that rules out out-of-bounds access.
///
/// Passing this makes querying safe; the answers are only correct once
/// [`check_index`] passes too.
pub fn check_bounds(
    sequence: &[u8],
    suffixes: &[i32],
    table: &PrefixTable,
) -> Result<(), InvariantError> {
    check_permutation(sequence, suffixes)?;
    check_prefix_ranges(suffixes.len(), table)
}

/// Run every check in dependency order.
pub fn check_index(
    sequence: &[u8],
    suffixes: &[i32],
    table: Option<&PrefixTable>,
) -> Result<(), InvariantError> {
    check_sentinel(sequence)?;
    check_permutation(sequence, suffixes)?;
    check_sorted(sequence, suffixes)?;
    if let Some(table) = table {
        check_prefix_table(sequence, suffixes, table)?;
    }
    Ok(())
}
