// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use saindex::fasta::read_queries;
use saindex::{
    peek_header, AlphabetPolicy, BuildConfig, QueryConfig, QueryMode, SuffixIndex, Timer,
};

mod cli;
use cli::display::{self, BuildMetrics, QueryMetrics};
use cli::{Cli, Commands};

/// Queries handed to the engine per progress update.
const QUERY_BATCH: usize = 4096;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            reference,
            output,
            preftab,
            sequential,
            fanout,
            uppercase,
            config,
            json,
        } => {
            let mut cfg = match config {
                Some(path) => BuildConfig::from_json_file(&path)
                    .with_context(|| format!("failed to read config {}", path.display()))?,
                None => BuildConfig::default(),
            };
            if let Some(k) = preftab {
                cfg.prefix_len = k;
            }
            if let Some(f) = fanout {
                cfg.fanout = f;
            }
            if sequential {
                cfg.parallel = false;
            }
            if uppercase {
                cfg.alphabet = AlphabetPolicy::Uppercase;
            }
            run_build(&reference, &output, &cfg, json)
        }
        Commands::Query {
            index,
            queries,
            mode,
            output,
            sequential,
            json,
        } => {
            let mut cfg = QueryConfig::new(QueryMode::from_name(&mode));
            if sequential {
                cfg = cfg.sequential();
            }
            run_query(&index, &queries, &output, &cfg, json)
        }
        Commands::Inspect {
            index,
            limit,
            verify,
        } => run_inspect(&index, limit, verify),
    }
}

/// Logs go to stderr; stdout carries metrics and query results.
fn init_tracing(verbose: bool) {
    let default = if verbose { "saindex=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_build(reference: &Path, output: &Path, cfg: &BuildConfig, json: bool) -> Result<()> {
    info!(reference = %reference.display(), k = cfg.prefix_len, parallel = cfg.parallel, "building index");

    let index = SuffixIndex::from_fasta(reference, cfg)
        .with_context(|| format!("failed to index {}", reference.display()))?;
    index
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    let file_size = fs::metadata(output)
        .with_context(|| format!("failed to stat {}", output.display()))?
        .len();

    let stats = index.stats();
    display::emit(
        &BuildMetrics {
            seq_length: index.sequence().text().len(),
            preftab: index.prefix_len(),
            sa_build_time: stats.sort_ms,
            preftab_build_time: stats.prefix_table_ms,
            file_size,
        },
        json,
    )?;
    Ok(())
}

fn run_query(
    index_path: &Path,
    queries_path: &Path,
    output: &str,
    cfg: &QueryConfig,
    json: bool,
) -> Result<()> {
    let index = SuffixIndex::load(index_path)
        .with_context(|| format!("failed to load index {}", index_path.display()))?;
    let records = read_queries(queries_path)
        .with_context(|| format!("failed to read queries {}", queries_path.display()))?;
    let patterns: Vec<&[u8]> = records.iter().map(|r| r.pattern.as_slice()).collect();

    let bar = display::progress_bar(patterns.len() as u64, "Querying");
    let mut results = Vec::with_capacity(patterns.len());
    let mut timer = Timer::started();
    for batch in patterns.chunks(QUERY_BATCH) {
        results.extend(index.query_batch(batch, cfg));
        bar.inc(batch.len() as u64);
    }
    timer.stop();
    bar.finish_and_clear();

    {
        let sink: Box<dyn Write> = if output == "-" {
            Box::new(io::stdout().lock())
        } else {
            Box::new(File::create(output).with_context(|| format!("failed to create {}", output))?)
        };
        let mut out = BufWriter::new(sink);
        for (record, range) in records.iter().zip(&results) {
            write!(out, "{}\t{}", record.title, range.len())?;
            for offset in &index.suffixes()[range.clone()] {
                write!(out, "\t{}", offset)?;
            }
            writeln!(out)?;
        }
        out.flush()?;
    }

    let total_ms = timer.elapsed_ms();
    display::emit(
        &QueryMetrics {
            seq_length: index.sequence().text().len(),
            preftab: index.prefix_len(),
            mode: cfg.mode.name(),
            num_queries: records.len(),
            total_query_time: total_ms,
            avg_query_time: if records.is_empty() {
                0.0
            } else {
                total_ms / records.len() as f64
            },
        },
        json,
    )?;
    Ok(())
}

fn run_inspect(path: &Path, limit: usize, verify: bool) -> Result<()> {
    let header =
        peek_header(path).with_context(|| format!("failed to read header of {}", path.display()))?;

    display::section_top("INDEX");
    display::field("file", &path.display().to_string());
    display::field("file size", &display::format_size(header.file_size));
    display::field("sequence length", &header.sequence_len.to_string());
    display::field("suffixes", &header.suffix_count.to_string());
    if header.prefix_len == 0 {
        display::field("prefix table", "none");
    } else {
        display::field(
            "prefix table",
            &format!("k={}, {} entries", header.prefix_len, header.prefix_entries),
        );
    }
    display::section_bot();

    if limit == 0 && !verify {
        return Ok(());
    }

    let index = SuffixIndex::load(path)
        .with_context(|| format!("failed to load index {}", path.display()))?;
    if limit > 0 {
        print!("{}", index.rows(limit));
    }
    if verify {
        index
            .verify()
            .with_context(|| format!("{} failed verification", path.display()))?;
        println!("{}", display::styled(&[display::BOLD], "verified: ok"));
    }
    Ok(())
}
