// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suffix array index for exact substring search over long sequences.
//!
//! The index holds the text (with a `$` sentinel appended), the sorted order
//! of all its suffixes, and optionally a prefix table mapping every k-length
//! prefix to its block of that order. A query is two binary searches; the
//! prefix table narrows them before they start.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────────┐     ┌────────────────┐
//! │ sequence.rs │────▶│ suffix_array.rs│────▶│ prefix_table.rs│
//! │ (text + '$')│     │ (sais sort)    │     │ (k-mer blocks) │
//! └─────────────┘     └────────────────┘     └────────────────┘
//!        │                    │                      │
//!        ▼                    ▼                      ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         index.rs                            │
//! │        SuffixIndex: build, save/load, query facade          │
//! └─────────────────────────────────────────────────────────────┘
//!        │                    │                      │
//!        ▼                    ▼                      ▼
//! ┌─────────────┐     ┌────────────────┐     ┌────────────────┐
//! │  binary/    │     │   query.rs     │     │   verify/      │
//! │ (file codec)│     │ (naive / LCP)  │     │ (invariants)   │
//! └─────────────┘     └────────────────┘     └────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use saindex::{BuildConfig, QueryMode, SuffixIndex};
//!
//! let config = BuildConfig::default().with_prefix_len(2);
//! let index = SuffixIndex::from_text("banana", &config).unwrap();
//!
//! let mut hits = index.query(b"ana", QueryMode::SimpleAccelerant).to_vec();
//! hits.sort_unstable();
//! assert_eq!(hits, vec![1, 3]);
//! ```

pub mod binary;
pub mod config;
pub mod error;
pub mod fasta;
pub mod index;
pub mod prefix_table;
pub mod query;
mod sais;
pub mod sequence;
pub mod suffix_array;
pub mod utils;
pub mod verify;

pub use binary::{peek_header, Decode, Encode, IndexHeader, MAGIC};
pub use config::{AlphabetPolicy, BuildConfig, QueryConfig, DEFAULT_FANOUT};
pub use error::{IndexError, Result};
pub use fasta::QueryRecord;
pub use index::{BuildStats, SuffixIndex};
pub use prefix_table::{PrefixRange, PrefixTable};
pub use query::{QueryEngine, QueryMode};
pub use sais::{sort_suffixes, MAX_SORT_LEN};
pub use sequence::{Sequence, SENTINEL};
pub use suffix_array::{is_suffix_array_sorted, SuffixPermutation};
pub use utils::Timer;
pub use verify::InvariantError;
