//! ansi-segments - ANSI escape sequence parsing for log and terminal views
//!
//! Converts lines of terminal output (pod logs, dev-server builds,
//! interactive shells) into ANSI-free plain text plus a minimal list of
//! styled segments that a row renderer can draw directly.
//!
//! ## Features
//!
//! - **Single pass:** One O(n) scan per line, no regex engine
//! - **Zero-copy fast path:** Lines without escapes are returned borrowed
//! - **Colors:** 16-color, 256-color and 24-bit truecolor SGR sequences
//! - **Noise removal:** Cursor movement, erase, OSC hyperlinks and charset
//!   designation sequences are stripped without touching the text
//! - **Minimal output:** Adjacent runs with equal styles are merged, and
//!   lines whose codes style nothing report no segments at all
//!
//! ## Module Organization
//!
//! - [`ansi`] - Scanner, SGR interpreter, color resolver, segment builder
//! - [`stats`] - Batch ingestion helpers and noise metrics
//! - [`config`] - Configuration for the `ansi-segments` command-line tool
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```
//! use ansi_segments::{parse_ansi, RenderMode};
//!
//! let parsed = parse_ansi("\x1b[1;31merror:\x1b[0m disk full");
//! assert_eq!(parsed.plain, "error: disk full");
//!
//! match parsed.render_mode() {
//!     RenderMode::Plain(text) => println!("{}", text),
//!     RenderMode::Styled(segments) => {
//!         for segment in segments {
//!             println!("{:?} {:?}", segment.text, segment.style);
//!         }
//!     }
//! }
//! ```
//!
//! ## Safety and Reliability
//!
//! - **No Panics:** The parser is total over every `&str`, malformed and
//!   truncated sequences included
//! - **No Shared State:** Each call owns its style and builder; only the
//!   compile-time color tables are shared

#[macro_use]
extern crate tracing;

pub mod ansi;
pub mod config;
pub mod error;
pub mod stats;

// Re-exports for core functionality
pub use ansi::{
    parse_ansi, strip_ansi, HexColor, ParsedAnsi, RenderMode, Segment, Style,
};
pub use config::{Config, ConfigLoader, OutputFormat};
pub use error::{Error, Result};
pub use stats::{parse_lines, IngestStats};

/// The current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The package description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
