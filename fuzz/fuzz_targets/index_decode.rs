// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index file decoding under adversarial input.
//!
//! A damaged or crafted index file should produce an error, not a panic or
//! an allocation the size of the claimed lengths. Anything that decodes is
//! then verified, and only a verified index is queried.

#![no_main]

use libfuzzer_sys::fuzz_target;
use saindex::{QueryMode, SuffixIndex, MAGIC};

fuzz_target!(|data: &[u8]| {
    // Prefix a valid magic so the fuzzer reaches the sections as well.
    let mut framed = MAGIC.to_le_bytes().to_vec();
    framed.extend_from_slice(data);

    for bytes in [data, framed.as_slice()] {
        let Ok(index) = SuffixIndex::from_bytes(bytes) else {
            continue;
        };
        if index.verify().is_err() {
            continue;
        }

        // INVARIANT: both search modes agree, and a prefix of the text occurs.
        let text = index.data();
        let pattern = &text[..text.len().min(3)];
        let naive = index.find(pattern, QueryMode::Naive);
        assert_eq!(naive, index.find(pattern, QueryMode::SimpleAccelerant));
        assert!(!naive.is_empty());

        // INVARIANT: a verified index survives its own encoding.
        let again = SuffixIndex::from_bytes(&index.to_bytes().unwrap()).unwrap();
        assert_eq!(again.data(), index.data());
        assert_eq!(again.suffixes(), index.suffixes());
        assert_eq!(again.prefix_table(), index.prefix_table());
    }
});
