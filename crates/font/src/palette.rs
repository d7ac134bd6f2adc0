//! Color code palette.
//!
//! Maps the single character of an `&` color code to an RGBA color. Only the
//! sixteen hex digits carry a color; every other entry stays fully
//! transparent, which marks it as "not a color code".

use common::Color;

/// Channel intensity for a set R/G/B bit of the code.
pub const LOW_INTENSITY: u8 = 191;
/// Extra intensity added to every channel when bit 3 is set.
pub const HIGH_INTENSITY: u8 = 64;

/// Color of hex nibble `hex` (0–15).
///
/// Bits 2, 1 and 0 select red, green and blue at `lo`; bit 3 adds `hi` to all
/// three channels. Channels wrap when `lo + hi` exceeds 255.
pub const fn hex_encoded_color(hex: u8, lo: u8, hi: u8) -> Color {
    let bright = hi.wrapping_mul((hex >> 3) & 1);
    Color::rgb(
        lo.wrapping_mul((hex >> 2) & 1).wrapping_add(bright),
        lo.wrapping_mul((hex >> 1) & 1).wrapping_add(bright),
        lo.wrapping_mul(hex & 1).wrapping_add(bright),
    )
}

/// Lookup table from color code byte to color.
#[derive(Clone, Debug)]
pub struct ColorTable {
    cols: [Color; 256],
}

impl ColorTable {
    /// Build the table with `'0'..='9'` and `'a'..='f'` populated.
    pub fn new() -> Self {
        let mut cols = [Color::TRANSPARENT; 256];
        for hex in 0..16u8 {
            let code = if hex < 10 { b'0' + hex } else { b'a' + (hex - 10) };
            cols[code as usize] = hex_encoded_color(hex, LOW_INTENSITY, HIGH_INTENSITY);
        }
        Self { cols }
    }

    /// Color for `code`. Uppercase `A`–`F` fold to lowercase.
    #[inline]
    pub fn get(&self, code: u8) -> Color {
        let code = if matches!(code, b'A'..=b'F') { code.to_ascii_lowercase() } else { code };
        self.cols[code as usize]
    }

    /// Returns `true` if `code` names a color.
    #[inline]
    pub fn is_valid(&self, code: u8) -> bool {
        self.get(code).a > 0
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}
