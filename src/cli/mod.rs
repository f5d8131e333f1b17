// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the saindex command-line interface.
//!
//! Three subcommands: `build` to index a FASTA reference, `query` to look
//! up every record of a FASTA query file, and `inspect` to examine an index
//! file. `build` and `query` print one metrics record on stdout so runs can
//! be appended to a CSV.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "saindex",
    about = "Suffix array index builder and exact substring search",
    version
)]
pub struct Cli {
    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from a FASTA reference
    Build {
        /// FASTA reference; header lines are dropped, bodies concatenated
        reference: PathBuf,

        /// Where to write the index file
        output: PathBuf,

        /// Prefix table key length (0 disables the table)
        #[arg(long, value_name = "K")]
        preftab: Option<usize>,

        /// Build the prefix table on a single thread
        #[arg(long)]
        sequential: bool,

        /// Number of chunks for the parallel prefix table builder
        #[arg(long, value_name = "F")]
        fanout: Option<usize>,

        /// Uppercase the reference before indexing (soft-masked input)
        #[arg(long)]
        uppercase: bool,

        /// JSON build configuration; flags given here take precedence
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print metrics as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Look up every record of a FASTA query file
    Query {
        /// Index file written by `build`
        index: PathBuf,

        /// FASTA query file; each header starts a new pattern
        queries: PathBuf,

        /// "naive", or anything else for LCP-accelerated search
        mode: String,

        /// Output file, or "-" for stdout
        output: String,

        /// Evaluate queries on a single thread
        #[arg(long)]
        sequential: bool,

        /// Print metrics as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Show the layout of an index file
    Inspect {
        /// Index file written by `build`
        index: PathBuf,

        /// Number of suffix table rows to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Load the whole index and check its invariants
        #[arg(long)]
        verify: bool,
    },
}
