// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build and query configuration.
//!
//! Whether a step runs sequentially or on the rayon pool is decided here,
//! per call, and handed to each component. Nothing is switched on globally.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};
use crate::query::QueryMode;

/// Default number of chunks for parallel prefix-table construction.
pub const DEFAULT_FANOUT: usize = 128;

/// How input symbols are treated before the sentinel is appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetPolicy {
    /// Keep bytes exactly as read.
    #[default]
    Raw,
    /// ASCII-uppercase every byte (soft-masked references).
    Uppercase,
}

/// Parameters for building an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Prefix table key length `k`. Zero disables the table.
    pub prefix_len: usize,
    /// Use the rayon pool for alphabet normalisation and the prefix table.
    pub parallel: bool,
    /// Number of chunks the prefix-table builder splits the permutation into.
    pub fanout: usize,
    pub alphabet: AlphabetPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            prefix_len: 0,
            parallel: true,
            fanout: DEFAULT_FANOUT,
            alphabet: AlphabetPolicy::Raw,
        }
    }
}

impl BuildConfig {
    pub fn with_prefix_len(mut self, k: usize) -> Self {
        self.prefix_len = k;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = fanout;
        self
    }

    pub fn with_alphabet(mut self, alphabet: AlphabetPolicy) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Fan-out clamped to at least one chunk.
    pub fn effective_fanout(&self) -> usize {
        self.fanout.max(1)
    }

    /// Read a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| IndexError::Io(e.into()))
    }
}

/// Parameters for evaluating queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub mode: QueryMode,
    /// Evaluate batches on the rayon pool.
    pub parallel: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            mode: QueryMode::SimpleAccelerant,
            parallel: true,
        }
    }
}

impl QueryConfig {
    pub fn new(mode: QueryMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
