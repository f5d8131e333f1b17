//! Index file layout and load-time failure modes.

use std::fs;

use saindex::{peek_header, BuildConfig, IndexError, IndexHeader, InvariantError, SuffixIndex, MAGIC};

fn banana(k: usize) -> SuffixIndex {
    SuffixIndex::from_text("banana", &BuildConfig::default().with_prefix_len(k)).unwrap()
}

#[test]
fn banana_file_layout_is_exact() {
    let bytes = banana(2).to_bytes().unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&MAGIC.to_le_bytes());
    expected.extend_from_slice(&7u64.to_le_bytes());
    expected.extend_from_slice(b"banana$");
    expected.extend_from_slice(&7u64.to_le_bytes());
    for offset in [6i32, 5, 3, 1, 0, 4, 2] {
        expected.extend_from_slice(&offset.to_le_bytes());
    }
    expected.extend_from_slice(&2u64.to_le_bytes());
    expected.extend_from_slice(&4u64.to_le_bytes());
    for (key, start, end) in [(b"a$", 1i32, 1i32), (b"an", 2, 3), (b"ba", 4, 4), (b"na", 5, 6)] {
        expected.extend_from_slice(&2u64.to_le_bytes());
        expected.extend_from_slice(key);
        expected.extend_from_slice(&start.to_le_bytes());
        expected.extend_from_slice(&end.to_le_bytes());
    }

    assert_eq!(bytes, expected);
}

#[test]
fn no_table_ends_with_zero_k() {
    let bytes = banana(0).to_bytes().unwrap();
    assert_eq!(bytes.len(), 4 + (8 + 7) + (8 + 7 * 4) + 8);
    assert_eq!(&bytes[bytes.len() - 8..], &0u64.to_le_bytes());
}

#[test]
fn header_peek_reports_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banana.sa");
    banana(2).save(&path).unwrap();

    let header = peek_header(&path).unwrap();
    assert_eq!(
        header,
        IndexHeader {
            sequence_len: 7,
            suffix_count: 7,
            prefix_len: 2,
            prefix_entries: 4,
            file_size: fs::metadata(&path).unwrap().len(),
        }
    );
}

#[test]
fn wrong_magic_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.sa");
    let mut bytes = banana(0).to_bytes().unwrap();
    bytes[0] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    let err = SuffixIndex::load(&path).unwrap_err();
    assert!(matches!(err, IndexError::Format { expected: MAGIC, .. }), "{}", err);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SuffixIndex::load(&dir.path().join("absent.sa")).unwrap_err();
    assert!(matches!(err, IndexError::Io(_)));
}

#[test]
fn truncated_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.sa");
    let bytes = banana(2).to_bytes().unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    let err = SuffixIndex::load(&path).unwrap_err();
    assert!(matches!(err, IndexError::Io(ref e) if e.kind() == std::io::ErrorKind::UnexpectedEof));
}

#[test]
fn corrupted_permutation_loads_but_fails_verification() {
    let mut bytes = banana(0).to_bytes().unwrap();
    // Swap A[2] and A[3]: offsets start after magic, sequence, and the count.
    let base = 4 + 8 + 7 + 8;
    let (a, b) = (base + 2 * 4, base + 3 * 4);
    for i in 0..4 {
        bytes.swap(a + i, b + i);
    }

    let index = SuffixIndex::from_bytes(&bytes).unwrap();
    let err = index.verify().unwrap_err();
    assert!(matches!(
        err,
        IndexError::Invariant(InvariantError::UnsortedSuffixArray { position: 3 })
    ));
}

#[test]
fn prefix_range_past_the_end_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("range.sa");
    let mut bytes = banana(2).to_bytes().unwrap();
    // The file ends with the inclusive end of the "na" range.
    let end = bytes.len() - 4;
    bytes[end..].copy_from_slice(&1000i32.to_le_bytes());
    fs::write(&path, &bytes).unwrap();

    let err = SuffixIndex::load(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        IndexError::Invariant(InvariantError::InvalidPrefixRange {
            key: "na".to_string(),
            start: 5,
            end: 1000,
        })
        .to_string()
    );
    assert!(SuffixIndex::from_bytes(&bytes).is_err());
}

#[test]
fn offset_outside_sequence_is_rejected_on_load() {
    let mut bytes = banana(0).to_bytes().unwrap();
    let last = 4 + 8 + 7 + 8 + 6 * 4;
    bytes[last..last + 4].copy_from_slice(&503i32.to_le_bytes());

    let err = SuffixIndex::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        IndexError::Invariant(InvariantError::OffsetOutOfBounds { position: 6, offset: 503, len: 7 })
    ));
}

#[test]
fn loaded_index_reports_no_build_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.sa");
    let built = banana(1);
    built.save(&path).unwrap();

    let loaded = SuffixIndex::load(&path).unwrap();
    assert_eq!(loaded.stats().sort_ms, 0.0);
    assert_eq!(loaded.stats().prefix_table_ms, 0.0);
    assert_eq!(loaded.suffixes(), built.suffixes());
}
