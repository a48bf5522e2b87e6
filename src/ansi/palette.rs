//! Color Resolver
//!
//! Maps SGR palette indices (0-255) and truecolor triples to canonical
//! lowercase `#rrggbb` strings. Every table here is built at compile time
//! and shared read-only across all parses.

use serde::{Serialize, Serializer};
use std::fmt;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A 7-byte lowercase `#rrggbb` color string
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 7]);

impl HexColor {
    /// Encode three channel bytes
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([
            b'#',
            HEX_DIGITS[(r >> 4) as usize],
            HEX_DIGITS[(r & 0x0f) as usize],
            HEX_DIGITS[(g >> 4) as usize],
            HEX_DIGITS[(g & 0x0f) as usize],
            HEX_DIGITS[(b >> 4) as usize],
            HEX_DIGITS[(b & 0x0f) as usize],
        ])
    }

    /// Borrow the color as `#rrggbb`
    pub fn as_str(&self) -> &str {
        // Only ever constructed from ASCII hex digits.
        std::str::from_utf8(&self.0).unwrap_or("#000000")
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexColor({})", self.as_str())
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Standard colors used by SGR 30-37 / 40-47 and palette indices 0-7
pub const STANDARD: [HexColor; 8] = [
    HexColor::from_rgb(0x2e, 0x34, 0x36), // Black
    HexColor::from_rgb(0xcc, 0x00, 0x00), // Red
    HexColor::from_rgb(0x4e, 0x9a, 0x06), // Green
    HexColor::from_rgb(0xc4, 0xa0, 0x00), // Yellow
    HexColor::from_rgb(0x34, 0x65, 0xa4), // Blue
    HexColor::from_rgb(0x75, 0x50, 0x7b), // Magenta
    HexColor::from_rgb(0x06, 0x98, 0x9a), // Cyan
    HexColor::from_rgb(0xd3, 0xd7, 0xcf), // White
];

/// Bright colors used by SGR 90-97 / 100-107 and palette indices 8-15
pub const BRIGHT: [HexColor; 8] = [
    HexColor::from_rgb(0x55, 0x57, 0x53), // Bright Black (Gray)
    HexColor::from_rgb(0xef, 0x29, 0x29), // Bright Red
    HexColor::from_rgb(0x8a, 0xe2, 0x34), // Bright Green
    HexColor::from_rgb(0xfc, 0xe9, 0x4f), // Bright Yellow
    HexColor::from_rgb(0x72, 0x9f, 0xcf), // Bright Blue
    HexColor::from_rgb(0xad, 0x7f, 0xa8), // Bright Magenta
    HexColor::from_rgb(0x34, 0xe2, 0xe2), // Bright Cyan
    HexColor::from_rgb(0xee, 0xee, 0xec), // Bright White
];

/// The full 256-entry xterm palette
pub static PALETTE_256: [HexColor; 256] = build_palette();

const fn cube_level(coordinate: usize) -> u8 {
    if coordinate == 0 {
        0
    } else {
        (coordinate * 40 + 55) as u8
    }
}

const fn build_palette() -> [HexColor; 256] {
    let mut table = [HexColor::from_rgb(0, 0, 0); 256];

    let mut i = 0;
    while i < 8 {
        table[i] = STANDARD[i];
        table[i + 8] = BRIGHT[i];
        i += 1;
    }

    // 6x6x6 color cube (16-231)
    let mut n = 0;
    while n < 216 {
        table[16 + n] = HexColor::from_rgb(
            cube_level(n / 36),
            cube_level((n / 6) % 6),
            cube_level(n % 6),
        );
        n += 1;
    }

    // Grayscale ramp (232-255)
    let mut step = 0;
    while step < 24 {
        let gray = (step * 10 + 8) as u8;
        table[232 + step] = HexColor::from_rgb(gray, gray, gray);
        step += 1;
    }

    table
}

/// Resolve a 256-color palette index
///
/// Returns `None` for indices outside 0-255.
pub fn resolve_index(index: u32) -> Option<HexColor> {
    PALETTE_256.get(index as usize).copied()
}

/// Encode a truecolor triple, clamping each channel to 0-255
pub fn resolve_rgb(r: u32, g: u32, b: u32) -> HexColor {
    HexColor::from_rgb(clamp_channel(r), clamp_channel(g), clamp_channel(b))
}

fn clamp_channel(value: u32) -> u8 {
    value.min(u8::MAX as u32) as u8
}
