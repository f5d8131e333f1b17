// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Small helpers shared by the builders, the query engine, and the CLI.

use std::time::{Duration, Instant};

/// Length of the common prefix of `a` and `b`, in bytes.
#[inline]
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Wall-clock stopwatch used for reporting only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    begin: Option<Instant>,
    end: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timer that is already running.
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    pub fn start(&mut self) {
        self.begin = Some(Instant::now());
        self.end = None;
    }

    pub fn stop(&mut self) {
        self.end = Some(Instant::now());
    }

    /// Time between `start` and `stop`; if still running, up to now.
    pub fn elapsed(&self) -> Duration {
        match (self.begin, self.end) {
            (Some(begin), Some(end)) => end.saturating_duration_since(begin),
            (Some(begin), None) => begin.elapsed(),
            _ => Duration::ZERO,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
