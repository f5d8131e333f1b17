//! FASTA reference in, FASTA queries against the saved index.

use saindex::fasta::{read_queries, read_reference};
use saindex::{AlphabetPolicy, BuildConfig, QueryConfig, QueryMode, SuffixIndex};

use super::common::{assert_index_well_formed, brute_force_offsets, synthetic_genome, write_fasta};

#[test]
fn multi_record_reference_is_concatenated() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fasta(
        dir.path(),
        "ref.fa",
        &[("chr1", b"ACGTACGTAA"), ("chr2", b"TTGACC")],
        4,
    );

    assert_eq!(read_reference(&path).unwrap(), b"ACGTACGTAATTGACC");

    let index = SuffixIndex::from_fasta(&path, &BuildConfig::default().with_prefix_len(3)).unwrap();
    assert_eq!(index.data(), b"ACGTACGTAATTGACC$");
    assert_index_well_formed(&index);
}

#[test]
fn soft_masked_reference_with_uppercase_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fasta(dir.path(), "masked.fa", &[("chr", b"acgtACGTnnAC")], 60);

    let config = BuildConfig::default().with_alphabet(AlphabetPolicy::Uppercase);
    let index = SuffixIndex::from_fasta(&path, &config).unwrap();
    assert_eq!(index.sequence().text(), b"ACGTACGTNNAC");
    assert_eq!(index.query(b"ACGT", QueryMode::Naive).len(), 2);
}

#[test]
fn build_save_load_query() {
    let dir = tempfile::tempdir().unwrap();
    let genome = synthetic_genome(20_000, 7);
    let reference = write_fasta(dir.path(), "genome.fa", &[("synthetic", &genome)], 70);

    let queries: Vec<(String, Vec<u8>)> = (0..50)
        .map(|i| {
            let start = (i * 397) % (genome.len() - 40);
            let len = 8 + i % 25;
            (format!("read_{}", i), genome[start..start + len].to_vec())
        })
        .chain(std::iter::once(("absent".to_string(), b"NNNNNNNN".to_vec())))
        .collect();
    let query_records: Vec<(&str, &[u8])> = queries
        .iter()
        .map(|(t, p)| (t.as_str(), p.as_slice()))
        .collect();
    let query_path = write_fasta(dir.path(), "reads.fa", &query_records, 10);

    let index_path = dir.path().join("genome.sa");
    let config = BuildConfig::default().with_prefix_len(6).with_fanout(16);
    SuffixIndex::from_fasta(&reference, &config)
        .unwrap()
        .save(&index_path)
        .unwrap();

    let index = SuffixIndex::load(&index_path).unwrap();
    index.verify().unwrap();

    let records = read_queries(&query_path).unwrap();
    assert_eq!(records.len(), queries.len());

    let patterns: Vec<&[u8]> = records.iter().map(|r| r.pattern.as_slice()).collect();
    for mode in [QueryMode::Naive, QueryMode::SimpleAccelerant] {
        let ranges = index.query_batch(&patterns, &QueryConfig::new(mode));
        for (record, range) in records.iter().zip(ranges) {
            let mut hits = index.suffixes()[range].to_vec();
            hits.sort_unstable();
            assert_eq!(hits, brute_force_offsets(index.data(), &record.pattern), "{}", record.title);
        }
    }

    let absent = records.last().unwrap();
    assert_eq!(absent.title, "absent");
    assert!(index.query(&absent.pattern, QueryMode::SimpleAccelerant).is_empty());
}
