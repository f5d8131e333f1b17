//! Suffix array property tests.
//!
//! - Permutation: every offset in `[0, n)` appears once
//! - Sortedness: adjacent suffixes strictly ascend
//! - Agreement with a comparison-sort oracle on arbitrary bytes

use super::common::{assert_index_well_formed, dna_strategy, naive_suffix_array, nonzero_bytes_strategy};
use proptest::prelude::*;
use saindex::{is_suffix_array_sorted, sort_suffixes, BuildConfig, IndexError, SuffixIndex};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn sort_matches_oracle(text in nonzero_bytes_strategy(200)) {
        let sa = sort_suffixes(&text).unwrap();
        prop_assert_eq!(sa, naive_suffix_array(&text));
    }

    #[test]
    fn built_suffixes_are_sorted_permutation(text in dna_strategy(400)) {
        let index = SuffixIndex::from_text(text, &BuildConfig::default()).unwrap();

        let mut offsets = index.suffixes().to_vec();
        offsets.sort_unstable();
        let expected: Vec<i32> = (0..index.data().len() as i32).collect();
        prop_assert_eq!(offsets, expected);
        prop_assert!(is_suffix_array_sorted(index.data(), index.suffixes()));
    }

    #[test]
    fn sentinel_suffix_sorts_first(text in dna_strategy(100)) {
        let index = SuffixIndex::from_text(text.clone(), &BuildConfig::default()).unwrap();
        prop_assert_eq!(index.suffixes()[0] as usize, text.len());
    }

    #[test]
    fn zero_byte_anywhere_is_rejected(mut text in nonzero_bytes_strategy(50), at in any::<prop::sample::Index>()) {
        let pos = at.index(text.len() + 1);
        text.insert(pos, 0);
        let result = SuffixIndex::from_text(text, &BuildConfig::default());
        prop_assert!(matches!(result, Err(IndexError::Construction(_))));
    }
}

#[test]
fn periodic_texts_match_oracle() {
    for period in [b"A".as_slice(), b"AB", b"AAB", b"ACGTT"] {
        let text: Vec<u8> = period.iter().copied().cycle().take(257).collect();
        let index = SuffixIndex::from_text(text, &BuildConfig::default()).unwrap();
        assert_index_well_formed(&index);
    }
}

#[test]
fn empty_text_indexes_only_the_sentinel() {
    let index = SuffixIndex::from_text(Vec::new(), &BuildConfig::default()).unwrap();
    assert_eq!(index.data(), b"$");
    assert_eq!(index.suffixes(), &[0]);
}
