// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for index construction, persistence, and verification.
//!
//! Every failure propagates to the caller. Corruption (`Format`,
//! `SizeMismatch`) is kept apart from plain I/O trouble so a missing file
//! and a damaged one can be told apart.

use std::io;

use thiserror::Error;

use crate::verify::InvariantError;

/// Errors produced by the index core.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Open/read/write failure, including truncated streams.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// The file does not start with the expected magic number.
    #[error("invalid index file: expected magic {expected:#010x}, found {found:#010x}")]
    Format { expected: u32, found: u32 },

    /// The suffix-sort primitive rejected its input.
    #[error("suffix array construction failed: {0}")]
    Construction(String),

    /// A stored record length does not fit a fixed-size container.
    ///
    /// The stream position is undefined afterwards; decoding must stop.
    #[error("container size mismatch during decode: container holds {expected}, stream has {found}")]
    SizeMismatch { expected: u64, found: u64 },

    /// A loaded or built index violates a structural invariant.
    #[error("index invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, IndexError>;
