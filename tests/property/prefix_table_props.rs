//! Prefix table property tests.
//!
//! - Parallel construction equals sequential construction for any fan-out
//! - Each range holds exactly the suffixes that start with its key
//! - Ranges cover every suffix at least `k` long

use super::common::{binary_text_strategy, dna_strategy, naive_suffix_array};
use proptest::prelude::*;
use saindex::{BuildConfig, PrefixTable, SuffixIndex};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn parallel_equals_sequential(
        text in binary_text_strategy(300),
        k in 1usize..8,
        fanout in 1usize..300,
    ) {
        let mut data = text;
        data.push(b'$');
        let sa = naive_suffix_array(&data);

        let sequential = PrefixTable::build_sequential(&data, &sa, k);
        let parallel = PrefixTable::build_parallel(&data, &sa, k, fanout);
        prop_assert_eq!(parallel, sequential);
    }

    #[test]
    fn ranges_are_exact(text in dna_strategy(300), k in 1usize..5) {
        let config = BuildConfig::default().with_prefix_len(k);
        let index = SuffixIndex::from_text(text, &config).unwrap();
        let data = index.data();
        let sa = index.suffixes();
        let table = index.prefix_table().unwrap();

        for (key, range) in table.iter() {
            prop_assert_eq!(key.len(), k);
            for pos in 0..sa.len() {
                let has_key = data[sa[pos] as usize..].starts_with(key);
                prop_assert_eq!(range.positions().contains(&pos), has_key);
            }
        }
    }

    #[test]
    fn ranges_cover_long_suffixes(text in dna_strategy(300), k in 1usize..6) {
        let config = BuildConfig::default().with_prefix_len(k).sequential();
        let index = SuffixIndex::from_text(text, &config).unwrap();
        let n = index.data().len();

        let covered: usize = index.prefix_table().unwrap().iter().map(|(_, r)| r.len()).sum();
        let long_enough = index.suffixes().iter().filter(|&&o| n - o as usize >= k).count();
        prop_assert_eq!(covered, long_enough);
    }
}

#[test]
fn fanout_larger_than_input_matches_sequential() {
    let data = b"ACGTACGTAC$".to_vec();
    let sa = naive_suffix_array(&data);
    for k in 1..=4 {
        assert_eq!(
            PrefixTable::build_parallel(&data, &sa, k, 10_000),
            PrefixTable::build_sequential(&data, &sa, k)
        );
    }
}

#[test]
fn keys_may_contain_the_sentinel() {
    let config = BuildConfig::default().with_prefix_len(2);
    let index = SuffixIndex::from_text("banana", &config).unwrap();
    let keys: Vec<&[u8]> = index.prefix_table().unwrap().iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![&b"a$"[..], &b"an"[..], &b"ba"[..], &b"na"[..]]);
}
