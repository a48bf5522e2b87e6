//! ANSI escape sequence parsing
//!
//! Turns one line of terminal or log output into ANSI-free plain text plus
//! a minimal list of styled segments ready for rendering.
//!
//! ```
//! use ansi_segments::parse_ansi;
//!
//! let parsed = parse_ansi("\x1b[31mred\x1b[39mnormal");
//! assert_eq!(parsed.plain, "rednormal");
//! assert_eq!(parsed.segments.len(), 2);
//! assert_eq!(parsed.segments[0].style.fg.unwrap(), "#cc0000");
//! assert!(parsed.segments[1].style.fg.is_none());
//! ```
//!
//! Every call starts from a fresh default style and owns all of its state,
//! so parsing is safe from any number of threads without locking. The only
//! shared data are the compile-time color tables in [`palette`].

pub mod palette;
pub mod scanner;
pub mod segment;
pub mod sgr;

pub use palette::HexColor;
pub use scanner::Scanner;
pub use segment::{Segment, SegmentBuilder, Style};
pub use sgr::SgrInterpreter;

use serde::Serialize;
use std::borrow::Cow;

/// Result of parsing one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedAnsi<'a> {
    /// Input text with every escape sequence removed
    pub plain: Cow<'a, str>,
    /// Styled runs in source order; empty when nothing needs styling
    pub segments: Vec<Segment<'a>>,
    /// Whether at least one escape sequence was seen
    #[serde(rename = "hasAnsi")]
    pub has_ansi: bool,
}

/// How a row renderer should draw a parsed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode<'r, 'a> {
    /// Draw the stripped text as-is
    Plain(&'r str),
    /// Draw each segment as a styled inline run
    Styled(&'r [Segment<'a>]),
}

impl<'a> ParsedAnsi<'a> {
    /// Result for a line containing no escape character
    pub fn plain_text(input: &'a str) -> Self {
        Self {
            plain: Cow::Borrowed(input),
            segments: Vec::new(),
            has_ansi: false,
        }
    }

    /// Choose between plain and styled rendering
    pub fn render_mode(&self) -> RenderMode<'_, 'a> {
        if !self.has_ansi || self.segments.is_empty() {
            RenderMode::Plain(&self.plain)
        } else {
            RenderMode::Styled(&self.segments)
        }
    }

    /// True when the line had escape codes but nothing left to style
    pub fn is_noise(&self) -> bool {
        self.has_ansi && self.segments.is_empty()
    }

    /// Detach the result from the input buffer
    pub fn into_owned(self) -> ParsedAnsi<'static> {
        ParsedAnsi {
            plain: Cow::Owned(self.plain.into_owned()),
            segments: self.segments.into_iter().map(Segment::into_owned).collect(),
            has_ansi: self.has_ansi,
        }
    }
}

/// Parse one line of output
///
/// Total over all inputs: malformed, unknown, or truncated sequences are
/// dropped and never disturb the surrounding text. A line without any
/// escape character is returned borrowed, without allocating.
pub fn parse_ansi(input: &str) -> ParsedAnsi<'_> {
    match input.as_bytes().iter().position(|&b| b == scanner::ESC) {
        None => ParsedAnsi::plain_text(input),
        Some(first_escape) => Scanner::new(input).run(first_escape),
    }
}

/// Strip every escape sequence, keeping only the visible text
pub fn strip_ansi(input: &str) -> Cow<'_, str> {
    parse_ansi(input).plain
}
