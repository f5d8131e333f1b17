// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! FASTA text extraction.
//!
//! A reference file becomes one concatenated sequence with header lines
//! dropped. A query file becomes `(title, pattern)` records, one per header.
//! Line endings (`\n` or `\r\n`) are stripped. Body lines are otherwise
//! kept byte for byte; nothing about the alphabet is checked.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::Result;

const HEADER: u8 = b'>';

/// One named pattern from a query file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRecord {
    /// Header text after `>`.
    pub title: String,
    pub pattern: Vec<u8>,
}

/// Concatenate the body lines of every record in the file at `path`.
pub fn read_reference(path: &Path) -> Result<Vec<u8>> {
    let text = parse_reference(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), len = text.len(), "read reference");
    Ok(text)
}

/// Read every record of the query file at `path`, in file order.
pub fn read_queries(path: &Path) -> Result<Vec<QueryRecord>> {
    let records = parse_queries(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), count = records.len(), "read queries");
    Ok(records)
}

pub fn parse_reference<R: BufRead>(reader: R) -> Result<Vec<u8>> {
    let mut text = Vec::new();
    for line in reader.split(b'\n') {
        let line = line?;
        let line = strip_line_ending(&line);
        if line.first() != Some(&HEADER) {
            text.extend_from_slice(line);
        }
    }
    Ok(text)
}

/// Body lines seen before the first header form an untitled record.
pub fn parse_queries<R: BufRead>(reader: R) -> Result<Vec<QueryRecord>> {
    let mut records = Vec::new();
    let mut current: Option<QueryRecord> = None;

    for line in reader.split(b'\n') {
        let line = line?;
        let line = strip_line_ending(&line);

        if let Some(title) = line.strip_prefix(&[HEADER]) {
            records.extend(current.take());
            current = Some(QueryRecord {
                title: String::from_utf8_lossy(title.trim_ascii()).into_owned(),
                pattern: Vec::new(),
            });
        } else if !line.is_empty() {
            current
                .get_or_insert_with(QueryRecord::default)
                .pattern
                .extend_from_slice(line);
        }
    }
    records.extend(current);

    Ok(records)
}

#[inline]
fn strip_line_ending(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
