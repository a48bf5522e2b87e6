//! Batch ingestion metrics
//!
//! Tracks how much of a log stream was plain, styled, or escape-code noise
//! (escape sequences present but nothing left to style).

use crate::ansi::{parse_ansi, ParsedAnsi};
use serde::Serialize;

/// Counters accumulated over many parsed lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Lines parsed
    pub lines: usize,
    /// Lines with no escape sequence at all
    pub plain_lines: usize,
    /// Lines producing at least one styled segment
    pub styled_lines: usize,
    /// Lines whose escape sequences left nothing to style
    pub noise_lines: usize,
    /// Segments emitted across all styled lines
    pub segments: usize,
    /// Input bytes, escape sequences included
    pub input_bytes: usize,
    /// Bytes of de-escaped text
    pub plain_bytes: usize,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parse result into the counters
    pub fn record(&mut self, parsed: &ParsedAnsi<'_>, input_len: usize) {
        self.lines += 1;
        self.input_bytes += input_len;
        self.plain_bytes += parsed.plain.len();
        self.segments += parsed.segments.len();

        if !parsed.has_ansi {
            self.plain_lines += 1;
        } else if parsed.segments.is_empty() {
            self.noise_lines += 1;
        } else {
            self.styled_lines += 1;
        }
    }

    /// Combine counters from another batch
    pub fn merge(&mut self, other: &IngestStats) {
        self.lines += other.lines;
        self.plain_lines += other.plain_lines;
        self.styled_lines += other.styled_lines;
        self.noise_lines += other.noise_lines;
        self.segments += other.segments;
        self.input_bytes += other.input_bytes;
        self.plain_bytes += other.plain_bytes;
    }

    /// Share of lines that carried escape codes but no visible styling
    pub fn noise_ratio(&self) -> f64 {
        if self.lines == 0 {
            0.0
        } else {
            self.noise_lines as f64 / self.lines as f64
        }
    }

    /// Bytes removed by stripping escape sequences
    ///
    /// Floors at zero when callers report an `input_len` shorter than the
    /// parsed text.
    pub fn stripped_bytes(&self) -> usize {
        self.input_bytes.saturating_sub(self.plain_bytes)
    }
}

/// Parse a batch of lines independently, collecting stats along the way
pub fn parse_lines<'a, I>(lines: I) -> (Vec<ParsedAnsi<'a>>, IngestStats)
where
    I: IntoIterator<Item = &'a str>,
{
    let lines = lines.into_iter();
    let mut parsed = Vec::with_capacity(lines.size_hint().0);
    let mut stats = IngestStats::new();

    for line in lines {
        let result = parse_ansi(line);
        stats.record(&result, line.len());
        parsed.push(result);
    }

    debug!(
        lines = stats.lines,
        styled = stats.styled_lines,
        noise = stats.noise_lines,
        "Parsed batch of lines"
    );

    (parsed, stats)
}
