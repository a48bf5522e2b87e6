//! Single-pass escape sequence scanner
//!
//! Walks the input once, splitting it into plain-text runs and escape
//! sequences. SGR sequences update the running style; every other
//! sequence (cursor movement, erase, OSC hyperlinks, charset designation)
//! is consumed and dropped. Truncated sequences at end of input are
//! discarded silently.

use super::segment::{SegmentBuilder, Style};
use super::sgr::SgrInterpreter;
use super::ParsedAnsi;
use std::borrow::Cow;

pub(crate) const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Scanner state for one input line
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    /// Start of the pending plain-text run
    run_start: usize,
    style: Style,
    sgr: SgrInterpreter,
    builder: SegmentBuilder<'a>,
    plain: String,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            run_start: 0,
            style: Style::default(),
            sgr: SgrInterpreter::new(),
            builder: SegmentBuilder::new(),
            plain: String::with_capacity(input.len()),
        }
    }

    /// Scan the whole input, starting the escape search at `from`
    ///
    /// `from` must be a char boundary at or before the first escape
    /// character; the caller's fast-path check already located it.
    pub fn run(mut self, from: usize) -> ParsedAnsi<'a> {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut pos = from;

        while let Some(offset) = bytes[pos..].iter().position(|&b| b == ESC) {
            let esc = pos + offset;
            self.flush_run(esc);
            pos = self.consume_escape(esc);
            self.run_start = pos;
        }
        self.flush_run(bytes.len());

        ParsedAnsi {
            plain: Cow::Owned(self.plain),
            segments: self.builder.finish(),
            has_ansi: true,
        }
    }

    /// Close the pending run at `end` under the current style
    fn flush_run(&mut self, end: usize) {
        let input = self.input;
        let text = &input[self.run_start..end];
        if !text.is_empty() {
            self.plain.push_str(text);
            self.builder.push(text, self.style);
        }
    }

    /// Consume the sequence introduced at `esc`, returning the index just
    /// past it
    fn consume_escape(&mut self, esc: usize) -> usize {
        let input = self.input;
        let bytes = input.as_bytes();
        match bytes.get(esc + 1) {
            None => bytes.len(),
            Some(b'[') => self.consume_csi(esc + 2),
            Some(b']') => consume_osc(bytes, esc + 2),
            // charset designation: ESC ( X / ESC ) X
            Some(b'(') | Some(b')') => {
                if esc + 2 < bytes.len() {
                    self.char_end(esc + 2)
                } else {
                    bytes.len()
                }
            }
            Some(_) => self.char_end(esc + 1),
        }
    }

    fn consume_csi(&mut self, start: usize) -> usize {
        let input = self.input;
        let bytes = input.as_bytes();

        let mut i = start;
        while i < bytes.len() && is_parameter_or_intermediate(bytes[i]) {
            i += 1;
        }

        match bytes.get(i) {
            None => bytes.len(),
            Some(b'm') => {
                self.sgr.apply(&input[start..i], &mut self.style);
                i + 1
            }
            Some(_) => self.char_end(i),
        }
    }

    /// Index just past the character starting at `pos`
    fn char_end(&self, pos: usize) -> usize {
        pos + self.input[pos..].chars().next().map_or(1, char::len_utf8)
    }
}

/// CSI parameter bytes (0x30-0x3F) and intermediate bytes (0x20-0x2F)
fn is_parameter_or_intermediate(byte: u8) -> bool {
    (0x20..=0x3f).contains(&byte)
}

/// Skip an OSC body up to and including its BEL or ST terminator
fn consume_osc(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            BEL => return i + 1,
            ESC if bytes.get(i + 1) == Some(&b'\\') => return i + 2,
            _ => i += 1,
        }
    }
    bytes.len()
}
