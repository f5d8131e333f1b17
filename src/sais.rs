// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! SA-IS: Suffix Array by Induced Sorting
//!
//! Linear-time O(n) suffix sorting, used by the index as an opaque primitive:
//! hand it bytes, get back a permutation of offsets or an error.
//!
//! # Algorithm Overview
//!
//! ```text
//! Input: "banana$"   (a virtual terminator 0x00 is appended internally)
//!
//! Step 1: Classify suffixes
//! ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! │ b │ a │ n │ a │ n │ a │ $ │ ⊥ │
//! ├───┼───┼───┼───┼───┼───┼───┼───┤
//! │ L │ S │ L │ S │ L │ L │ L │ S │   (S = smaller than next, L = larger)
//! └───┴───┴───┴───┴───┴───┴───┴───┘
//!
//! Step 2: LMS (leftmost S-type) positions: 1, 3, 7
//! Step 3: Place LMS at bucket tails, induce L left-to-right, S right-to-left
//! Step 4: Name LMS substrings; recurse if the names are not unique
//! Step 5: Induce the final order from the sorted LMS suffixes
//!
//! Output (terminator dropped): [6, 5, 3, 1, 0, 4, 2]
//! ```
//!
//! # References
//!
//! - Nong, Zhang, Chan (2009): "Linear Suffix Array Construction by Almost Pure Induced-Sorting"
//! - <https://doi.org/10.1109/DCC.2009.42>

use tracing::debug;

use crate::error::{IndexError, Result};

/// Largest input the permutation can address with `i32` offsets.
pub const MAX_SORT_LEN: usize = i32::MAX as usize - 1;

/// Virtual terminator; must not occur in the input.
const TERMINATOR: u8 = 0;

const EMPTY: usize = usize::MAX;

/// Suffix type classification.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SuffixType {
    /// S-type: suffix is lexicographically smaller than the next suffix
    S,
    /// L-type: suffix is lexicographically larger than the next suffix
    L,
}

/// A symbol the induced sort can bucket.
trait Symbol: Copy + Ord {
    fn rank(self) -> usize;
}

impl Symbol for u8 {
    #[inline]
    fn rank(self) -> usize {
        self as usize
    }
}

impl Symbol for usize {
    #[inline]
    fn rank(self) -> usize {
        self
    }
}

/// Sort every suffix of `text` lexicographically.
///
/// Returns `sa` with `text[sa[i]..] < text[sa[i + 1]..]`. A suffix that is a
/// proper prefix of another sorts first. Fails when `text` holds the reserved
/// byte `0x00` or is too long for `i32` offsets.
pub fn sort_suffixes(text: &[u8]) -> Result<Vec<i32>> {
    if text.len() > MAX_SORT_LEN {
        return Err(IndexError::Construction(format!(
            "input of {} symbols exceeds the {} symbol limit",
            text.len(),
            MAX_SORT_LEN
        )));
    }
    if let Some(pos) = text.iter().position(|&b| b == TERMINATOR) {
        return Err(IndexError::Construction(format!(
            "reserved byte 0x00 at offset {}",
            pos
        )));
    }
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut terminated = Vec::with_capacity(text.len() + 1);
    terminated.extend_from_slice(text);
    terminated.push(TERMINATOR);

    let sa = sais_core(&terminated, 256);
    debug!(len = text.len(), "suffix sort complete");

    // The terminator is the unique smallest suffix, always at sa[0].
    Ok(sa[1..].iter().map(|&pos| pos as i32).collect())
}

/// Induced sort over a string whose last symbol is its unique minimum.
fn sais_core<T: Symbol>(text: &[T], alphabet_size: usize) -> Vec<usize> {
    let n = text.len();
    if n <= 1 {
        return (0..n).collect();
    }

    let types = classify_suffixes(text);
    let lms_positions: Vec<usize> = (1..n).filter(|&i| is_lms(&types, i)).collect();
    let bucket_sizes = compute_bucket_sizes(text, alphabet_size);

    // First pass: approximate LMS order, good enough to name LMS substrings.
    let mut sa = vec![EMPTY; n];
    induced_sort(text, &types, &bucket_sizes, &lms_positions, &mut sa);

    let mut name = 0usize;
    let mut prev_pos: Option<usize> = None;
    let mut lms_names = vec![EMPTY; n];
    for &pos in &sa {
        if !is_lms(&types, pos) {
            continue;
        }
        if let Some(prev) = prev_pos {
            if !lms_substrings_equal(text, &types, prev, pos) {
                name += 1;
            }
        }
        lms_names[pos] = name;
        prev_pos = Some(pos);
    }
    let unique_count = name + 1;

    let reduced: Vec<usize> = lms_positions.iter().map(|&pos| lms_names[pos]).collect();

    let sorted_lms_indices = if unique_count < lms_positions.len() {
        sais_core(&reduced, unique_count)
    } else {
        // Every name is distinct, so the names are the ranks.
        let mut order = vec![0usize; reduced.len()];
        for (i, &rank) in reduced.iter().enumerate() {
            order[rank] = i;
        }
        order
    };

    let sorted_lms: Vec<usize> = sorted_lms_indices
        .iter()
        .map(|&i| lms_positions[i])
        .collect();

    sa.fill(EMPTY);
    induced_sort(text, &types, &bucket_sizes, &sorted_lms, &mut sa);
    sa
}

/// Seed `lms` (in order) at bucket tails, then induce L and S types.
fn induced_sort<T: Symbol>(
    text: &[T],
    types: &[SuffixType],
    bucket_sizes: &[usize],
    lms: &[usize],
    sa: &mut [usize],
) {
    let n = text.len();

    let mut tails = compute_bucket_tails(bucket_sizes);
    for &pos in lms.iter().rev() {
        let c = text[pos].rank();
        tails[c] -= 1;
        sa[tails[c]] = pos;
    }

    let mut heads = compute_bucket_heads(bucket_sizes);
    for i in 0..n {
        if sa[i] == EMPTY || sa[i] == 0 {
            continue;
        }
        let j = sa[i] - 1;
        if types[j] == SuffixType::L {
            let c = text[j].rank();
            sa[heads[c]] = j;
            heads[c] += 1;
        }
    }

    let mut tails = compute_bucket_tails(bucket_sizes);
    for i in (0..n).rev() {
        if sa[i] == EMPTY || sa[i] == 0 {
            continue;
        }
        let j = sa[i] - 1;
        if types[j] == SuffixType::S {
            let c = text[j].rank();
            tails[c] -= 1;
            sa[tails[c]] = j;
        }
    }
}

fn classify_suffixes<T: Symbol>(text: &[T]) -> Vec<SuffixType> {
    let n = text.len();
    let mut types = vec![SuffixType::S; n];

    for i in (0..n - 1).rev() {
        types[i] = match text[i].cmp(&text[i + 1]) {
            std::cmp::Ordering::Greater => SuffixType::L,
            std::cmp::Ordering::Less => SuffixType::S,
            std::cmp::Ordering::Equal => types[i + 1],
        };
    }

    types
}

#[inline]
fn is_lms(types: &[SuffixType], i: usize) -> bool {
    i > 0 && i < types.len() && types[i] == SuffixType::S && types[i - 1] == SuffixType::L
}

fn compute_bucket_sizes<T: Symbol>(text: &[T], alphabet_size: usize) -> Vec<usize> {
    let mut sizes = vec![0; alphabet_size];
    for &c in text {
        sizes[c.rank()] += 1;
    }
    sizes
}

fn compute_bucket_heads(sizes: &[usize]) -> Vec<usize> {
    let mut heads = vec![0; sizes.len()];
    let mut sum = 0;
    for (i, &size) in sizes.iter().enumerate() {
        heads[i] = sum;
        sum += size;
    }
    heads
}

fn compute_bucket_tails(sizes: &[usize]) -> Vec<usize> {
    let mut tails = vec![0; sizes.len()];
    let mut sum = 0;
    for (i, &size) in sizes.iter().enumerate() {
        sum += size;
        tails[i] = sum;
    }
    tails
}

/// Two LMS substrings are equal when symbols and types agree up to and
/// including the next LMS position of both.
fn lms_substrings_equal<T: Symbol>(text: &[T], types: &[SuffixType], i: usize, j: usize) -> bool {
    if i == j {
        return true;
    }

    let n = text.len();
    let mut k = 0;

    loop {
        let pi = i + k;
        let pj = j + k;

        if pi >= n || pj >= n {
            return pi >= n && pj >= n;
        }
        if text[pi] != text[pj] || types[pi] != types[pj] {
            return false;
        }
        if k > 0 {
            let lms_i = is_lms(types, pi);
            let lms_j = is_lms(types, pj);
            if lms_i && lms_j {
                return true;
            }
            if lms_i != lms_j {
                return false;
            }
        }

        k += 1;
    }
}
