//! Bitmapped text metrics.
//!
//! The bitmap font is drawn with extra padding so its line height and letter
//! spacing line up with what an outline font at the same point size would
//! produce.

use common::ceil_div;

use crate::atlas::FontAtlas;

/// Shadow offset used by the external font path, in pixels.
pub const EXTERNAL_SHADOW_OFFSET: i32 = 1;

/// Offset of the drop shadow for bitmapped text.
#[inline]
pub const fn shadow_offset(point: i32) -> i32 {
    point / 8
}

/// Horizontal gap after every bitmapped glyph.
#[inline]
pub const fn x_padding(point: i32) -> i32 {
    ceil_div(point, 8)
}

/// Line height of bitmapped text at `point`.
#[inline]
pub const fn adj_height(point: i32) -> i32 {
    ceil_div(point.saturating_mul(3), 2)
}

/// Gap above the glyph cell that centers it inside [`adj_height`].
#[inline]
pub const fn y_padding(point: i32) -> i32 {
    (adj_height(point) - point) / 2
}

/// Row inside the drawn cell where the underline starts, i.e. the bottom row
/// of an 8 pixel cell scaled up to `point`.
#[inline]
pub const fn underline_offset(point: i32) -> i32 {
    (8 - 1) * point / 8
}

/// Drawn width of glyph `c` at `point`, without padding.
#[inline]
pub fn glyph_width(atlas: &FontAtlas, point: i32, c: u8) -> i32 {
    ceil_div((atlas.glyph_width(c) as i32).saturating_mul(point), atlas.cell_size() as i32)
}

/// Drawn width of glyph `c` at `point` including the trailing padding.
#[inline]
pub fn glyph_advance(atlas: &FontAtlas, point: i32, c: u8) -> i32 {
    glyph_width(atlas, point, c).saturating_add(x_padding(point))
}
