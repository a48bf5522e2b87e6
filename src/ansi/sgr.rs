//! SGR (Select Graphic Rendition) interpretation
//!
//! Applies the parameter list of one `ESC [ ... m` sequence to the
//! current [`Style`]. Unknown codes and malformed extended colors are
//! no-ops; nothing here can fail.

use super::palette::{self, HexColor, BRIGHT, STANDARD};
use super::segment::Style;

/// Value stored for a parameter that is not a plain decimal number
const UNKNOWN_PARAM: u32 = u32::MAX;

/// Interprets SGR parameter strings against a running style
///
/// Holds a scratch buffer for the split parameters so one parse reuses a
/// single allocation across all of its SGR sequences.
#[derive(Debug, Default)]
pub struct SgrInterpreter {
    params: Vec<u32>,
}

impl SgrInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one SGR parameter string (everything between `[` and `m`)
    pub fn apply(&mut self, params: &str, style: &mut Style) {
        // Bare resets close nearly every colorized token in real logs.
        if params.is_empty() || params == "0" {
            style.reset();
            return;
        }

        self.params.clear();
        self.params.extend(params.split(';').map(parse_param));

        let codes = self.params.as_slice();
        let mut i = 0;
        while i < codes.len() {
            match codes[i] {
                0 => style.reset(),
                1 => style.bold = true,
                2 => style.dim = true,
                3 => style.italic = true,
                4 => style.underline = true,
                9 => style.strikethrough = true,
                22 => {
                    style.bold = false;
                    style.dim = false;
                }
                23 => style.italic = false,
                24 => style.underline = false,
                29 => style.strikethrough = false,
                code @ 30..=37 => style.fg = Some(STANDARD[(code - 30) as usize]),
                code @ 40..=47 => style.bg = Some(STANDARD[(code - 40) as usize]),
                code @ 90..=97 => style.fg = Some(BRIGHT[(code - 90) as usize]),
                code @ 100..=107 => style.bg = Some(BRIGHT[(code - 100) as usize]),
                39 => style.fg = None,
                49 => style.bg = None,
                38 => {
                    let (color, consumed) = extended_color(&codes[i + 1..]);
                    if let Some(color) = color {
                        style.fg = Some(color);
                    }
                    i += consumed;
                }
                48 => {
                    let (color, consumed) = extended_color(&codes[i + 1..]);
                    if let Some(color) = color {
                        style.bg = Some(color);
                    }
                    i += consumed;
                }
                // blink, reverse video, fonts, ... are not rendered
                _ => {}
            }
            i += 1;
        }
    }
}

/// Parse one `;`-separated field; an empty field means 0
fn parse_param(field: &str) -> u32 {
    if field.is_empty() {
        return 0;
    }

    let mut value: u32 = 0;
    for byte in field.bytes() {
        if !byte.is_ascii_digit() {
            return UNKNOWN_PARAM;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(u32::from(byte - b'0'));
    }
    value
}

/// Decode the tail of a `38`/`48` code
///
/// Returns the resolved color (if any) and how many of the following
/// parameters it consumed. A `5` or `2` sub-form cut short swallows
/// whatever is left of the sequence; only an unrecognized selector is left
/// for the caller to read as an ordinary code.
fn extended_color(rest: &[u32]) -> (Option<HexColor>, usize) {
    match rest {
        [5, index, ..] => (palette::resolve_index(*index), 2),
        [5] => (None, 1),
        [2, r, g, b, ..] => (Some(palette::resolve_rgb(*r, *g, *b)), 4),
        [2, ..] => (None, rest.len()),
        _ => (None, 0),
    }
}
