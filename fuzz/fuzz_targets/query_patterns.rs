// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query engine against arbitrary texts and patterns.
//!
//! Builds a small index from fuzzer-chosen text and checks every query
//! against a linear scan, in both search modes, with and without a prefix
//! table.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use saindex::{BuildConfig, QueryMode, SuffixIndex, SENTINEL};

#[derive(Debug, Arbitrary)]
struct Input {
    text: Vec<u8>,
    patterns: Vec<Vec<u8>>,
    prefix_len: u8,
    fanout: u8,
}

fuzz_target!(|input: Input| {
    // Zero is reserved by the sorter and the sentinel by the index.
    let text: Vec<u8> = input
        .text
        .into_iter()
        .filter(|&b| b != 0 && b != SENTINEL)
        .take(4096)
        .collect();

    let config = BuildConfig::default()
        .with_prefix_len(usize::from(input.prefix_len % 8))
        .with_fanout(usize::from(input.fanout));
    let index = SuffixIndex::from_text(text, &config).unwrap();

    let data = index.data();
    for pattern in input.patterns.iter().take(16) {
        let expected: Vec<i32> = (0..data.len())
            .filter(|&i| data[i..].starts_with(pattern))
            .map(|i| i as i32)
            .collect();

        for mode in [QueryMode::Naive, QueryMode::SimpleAccelerant] {
            let mut hits = index.query(pattern, mode).to_vec();
            hits.sort_unstable();
            assert_eq!(hits, expected, "mode {:?}", mode);
        }
    }
});
