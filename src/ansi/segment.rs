//! Styled segments and the segment builder
//!
//! The builder collects `(text, style)` runs in source order, coalescing a
//! run into its predecessor whenever both carry the same style, so the
//! finished list never holds two adjacent segments with equal styles.

use super::palette::HexColor;
use serde::Serialize;
use std::borrow::Cow;

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// The running rendering state threaded through a scan
///
/// Default fields are omitted when serialized, so a segment only ever
/// carries what differs from the renderer default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Style {
    /// Foreground color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg: Option<HexColor>,
    /// Background color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<HexColor>,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub dim: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
}

impl Style {
    /// True when every field is unset
    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }

    /// Return every field to its default
    pub fn reset(&mut self) {
        *self = Style::default();
    }
}

/// A contiguous run of plain text with the style active over it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: Cow<'a, str>,
    #[serde(flatten)]
    pub style: Style,
}

impl<'a> Segment<'a> {
    /// Create a segment borrowing its text
    pub fn new(text: &'a str, style: Style) -> Self {
        Self {
            text: Cow::Borrowed(text),
            style,
        }
    }

    /// Detach the segment from the input buffer
    pub fn into_owned(self) -> Segment<'static> {
        Segment {
            text: Cow::Owned(self.text.into_owned()),
            style: self.style,
        }
    }
}

/// Accumulates styled runs and produces the minimal segment list
#[derive(Debug, Default)]
pub struct SegmentBuilder<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> SegmentBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run, merging it into the previous segment when styles match
    pub fn push(&mut self, text: &'a str, style: Style) {
        if text.is_empty() {
            return;
        }

        if let Some(last) = self.segments.last_mut() {
            if last.style == style {
                last.text.to_mut().push_str(text);
                return;
            }
        }
        self.segments.push(Segment::new(text, style));
    }

    /// Finish building
    ///
    /// Returns an empty list when no segment carries any non-default
    /// style: the caller can then render the plain text directly.
    pub fn finish(self) -> Vec<Segment<'a>> {
        if self.segments.iter().all(|segment| segment.style.is_default()) {
            Vec::new()
        } else {
            self.segments
        }
    }
}
