//! Configuration management for ansi-segments
//!
//! Settings for the command-line front end: how output is rendered, how
//! input lines are prepared before parsing, and the default log level.
//! Every section falls back to its defaults when missing from a file.

pub mod loader;

pub use loader::{ConfigFormat, ConfigLoader, LoadOptions};

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound accepted for `input.max_line_bytes`
pub const MAX_LINE_BYTES_LIMIT: usize = 64 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration
    pub output: OutputConfig,

    /// Input configuration
    pub input: InputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// What to write for each input line
    pub format: OutputFormat,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            pretty: false,
        }
    }
}

/// Output mode of the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Stripped text, one line per input line
    Plain,
    /// One parse result per line as JSON
    Json,
    /// Only the ingestion statistics
    Stats,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            "stats" => Ok(OutputFormat::Stats),
            other => Err(Error::InvalidArgument {
                argument: other.to_string(),
                reason: "expected one of: plain, json, stats".to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
            OutputFormat::Stats => "stats",
        };
        f.write_str(name)
    }
}

/// Input-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Drop a trailing `\r` from CRLF-terminated lines
    pub strip_carriage_returns: bool,

    /// Lines longer than this are truncated (on a char boundary) before parsing
    pub max_line_bytes: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            strip_carriage_returns: true,
            max_line_bytes: 1024 * 1024, // 1MB per line
        }
    }
}

impl InputConfig {
    /// Apply the configured preparation steps to one raw line
    pub fn prepare_line<'l>(&self, line: &'l str) -> &'l str {
        let line = if self.strip_carriage_returns {
            line.strip_suffix('\r').unwrap_or(line)
        } else {
            line
        };

        if line.len() <= self.max_line_bytes {
            return line;
        }

        let mut end = self.max_line_bytes;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        &line[..end]
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
