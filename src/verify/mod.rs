// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: invariant checks over a built or loaded index.
//!
//! The binary format carries no checksum, so a file that decodes cleanly can
//! still describe a broken index. Running these checks after `load` turns
//! such a file into an `Invariant` error instead of wrong query answers.

mod types;

pub use types::*;
