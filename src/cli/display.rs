// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the saindex CLI.
//!
//! Metrics go to stdout as one CSV row (or one JSON object) so a driver
//! script can collect them. Everything decorative goes through `use_colors`,
//! which respects `NO_COLOR` and non-TTY stdout.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 64;

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Apply styles if TTY, otherwise return plain text
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1} GB", bytes as f64 / 1024.0 / 1024.0 / 1024.0)
    } else if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(s: &str) -> String {
    styled(&[GRAY], s)
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// Print a `label  value` line inside a box.
pub fn field(label: &str, value: &str) {
    row(&format!(" {:<18}{}", styled(&[DIM], label), value));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", styled(&[CYAN, BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// PROGRESS
// ═══════════════════════════════════════════════════════════════════════════

/// Bar on stderr, hidden when stderr is not a terminal.
pub fn progress_bar(len: u64, prefix: &'static str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("━━╸"));
    }
    bar.set_prefix(prefix);
    bar
}

// ═══════════════════════════════════════════════════════════════════════════
// METRICS
// ═══════════════════════════════════════════════════════════════════════════

/// A record printed once per run.
pub trait Metrics: Serialize {
    /// Values in CSV column order.
    fn csv_row(&self) -> String;
}

#[derive(Debug, Serialize)]
pub struct BuildMetrics {
    pub seq_length: usize,
    pub preftab: usize,
    pub sa_build_time: f64,
    pub preftab_build_time: f64,
    pub file_size: u64,
}

impl Metrics for BuildMetrics {
    fn csv_row(&self) -> String {
        format!(
            "{},{},{:.3},{:.3},{}",
            self.seq_length, self.preftab, self.sa_build_time, self.preftab_build_time, self.file_size
        )
    }
}

#[derive(Debug, Serialize)]
pub struct QueryMetrics {
    pub seq_length: usize,
    pub preftab: usize,
    pub mode: &'static str,
    pub num_queries: usize,
    pub total_query_time: f64,
    pub avg_query_time: f64,
}

impl Metrics for QueryMetrics {
    fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.3},{:.6}",
            self.seq_length,
            self.preftab,
            self.mode,
            self.num_queries,
            self.total_query_time,
            self.avg_query_time
        )
    }
}

/// Print `metrics` on stdout, as JSON or as one CSV row.
pub fn emit<M: Metrics>(metrics: &M, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string(metrics)?);
    } else {
        println!("{}", metrics.csv_row());
    }
    Ok(())
}
