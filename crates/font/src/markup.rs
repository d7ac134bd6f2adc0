//! Inline color-code markup.
//!
//! A color code is the two bytes `&` + a code that has a color in the
//! [`ColorTable`]. Codes switch the color of everything after them and are
//! never drawn themselves. An `&` followed by anything else is plain text.
//!
//! All results borrow from the scanned text; none of them may outlive it.

use crate::palette::ColorTable;

/// Code of the color text starts with.
pub const DEFAULT_COLOR_CODE: u8 = b'f';
/// Byte introducing a color code.
pub const COLOR_CODE_MARKER: u8 = b'&';

/// Returns `true` if `text[i]` exists and is a color code.
#[inline]
pub fn is_valid_color_code_at(table: &ColorTable, text: &[u8], i: usize) -> bool {
    text.get(i).is_some_and(|&c| table.is_valid(c))
}

#[inline]
fn is_marker_at(table: &ColorTable, text: &[u8], i: usize) -> bool {
    text[i] == COLOR_CODE_MARKER && is_valid_color_code_at(table, text, i + 1)
}

/// Returns `true` if `text` is empty or holds nothing but color codes.
pub fn is_empty_text(table: &ColorTable, text: &[u8]) -> bool {
    let mut i = 0;
    while i < text.len() {
        if !is_marker_at(table, text, i) {
            return false;
        }
        i += 2;
    }
    true
}

/// Code of the last color marker at or before `start`, or `0` if none.
///
/// `start` is clamped to the last index of `text`. Used to carry color over
/// when only part of a string is drawn.
pub fn last_color(table: &ColorTable, text: &[u8], start: usize) -> u8 {
    if text.is_empty() {
        return 0;
    }
    let start = start.min(text.len() - 1);
    (0..=start)
        .rev()
        .find(|&i| is_marker_at(table, text, i))
        .map_or(0, |i| text[i + 1])
}

/// Returns `true` for the codes that draw as plain white.
#[inline]
pub fn is_white_color(code: u8) -> bool {
    matches!(code, 0 | b'f' | b'F')
}

/// Scan one run starting at `start`.
///
/// Returns the run (up to the next marker or the end of `text`), the index
/// after the marker, and the marker's code. The code applies to the *next*
/// run; it is `None` when the run ended at the end of the text.
pub fn next_part<'a>(table: &ColorTable, text: &'a [u8], start: usize) -> (&'a [u8], usize, Option<u8>) {
    let start = start.min(text.len());
    let end = (start..text.len())
        .find(|&i| is_marker_at(table, text, i))
        .unwrap_or(text.len());

    let next = end + 2;
    let next_color = if next <= text.len() { Some(text[next - 1]) } else { None };
    (&text[start..end], next, next_color)
}

/// A piece of text drawn in a single color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run<'a> {
    pub text: &'a [u8],
    /// Color code in effect for this run.
    pub color: u8,
}

/// Iterator over the runs of a markup string, including empty ones.
pub struct Runs<'t, 'a> {
    table: &'t ColorTable,
    text: &'a [u8],
    pos: usize,
    color: u8,
}

impl<'t, 'a> Runs<'t, 'a> {
    pub fn new(table: &'t ColorTable, text: &'a [u8]) -> Self {
        Self::with_color(table, text, DEFAULT_COLOR_CODE)
    }

    /// Start with `color` instead of white.
    pub fn with_color(table: &'t ColorTable, text: &'a [u8], color: u8) -> Self {
        Self { table, text, pos: 0, color }
    }
}

impl<'a> Iterator for Runs<'_, 'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        if self.pos >= self.text.len() {
            return None;
        }
        let color = self.color;
        let (text, next, next_color) = next_part(self.table, self.text, self.pos);
        self.pos = next;
        if let Some(code) = next_color {
            self.color = code;
        }
        Some(Run { text, color })
    }
}

/// Iterator over the drawable bytes of a markup string with their color code.
pub struct Glyphs<'t, 'a> {
    table: &'t ColorTable,
    text: &'a [u8],
    pos: usize,
    color: u8,
}

impl<'t, 'a> Glyphs<'t, 'a> {
    pub fn new(table: &'t ColorTable, text: &'a [u8]) -> Self {
        Self { table, text, pos: 0, color: DEFAULT_COLOR_CODE }
    }
}

impl Iterator for Glyphs<'_, '_> {
    type Item = (u8, u8);

    fn next(&mut self) -> Option<(u8, u8)> {
        while self.pos < self.text.len() {
            let i = self.pos;
            if is_marker_at(self.table, self.text, i) {
                self.color = self.text[i + 1];
                self.pos += 2;
                continue;
            }
            self.pos += 1;
            return Some((self.text[i], self.color));
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
