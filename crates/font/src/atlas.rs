//! Fixed-grid bitmap font atlas.
//!
//! The atlas is a single ARGB image split into 16 columns × 16 rows of equal
//! square cells, one per byte value. Glyph `c` lives in column `c & 0x0F` and
//! row `c >> 4`. When the atlas is installed the tight width of every cell is
//! measured once so layout never has to touch the pixels.

use common::{argb_alpha, DrawError};

/// Cells per atlas row (and rows per atlas).
pub const CHARS_PER_ROW: u32 = 16;
/// log2 of [`CHARS_PER_ROW`].
pub const LOG2_CHARS_PER_ROW: u32 = 4;
/// Cell size used while no atlas is loaded, so layout never divides by zero.
pub const DEFAULT_CELL_SIZE: u32 = 8;
/// Minimum alpha for a pixel to count towards a glyph's width.
pub const WIDTH_ALPHA_THRESHOLD: u8 = 127;

/// Glyph widths indexed by byte value.
pub type GlyphWidths = [u32; 256];

/// A loaded bitmap font atlas plus its derived glyph widths.
#[derive(Clone, Debug)]
pub struct FontAtlas {
    /// ARGB pixels (`0xAARRGGBB`), row-major.
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    cell_size: u32,
    widths: GlyphWidths,
}

impl FontAtlas {
    /// Take ownership of an ARGB image and index it.
    ///
    /// The width must be a positive multiple of 16 and the image must be at
    /// least 16 cells tall.
    pub fn new(pixels: Vec<u32>, width: u32, height: u32) -> Result<Self, DrawError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DrawError::PixelCountMismatch { expected, actual: pixels.len() });
        }
        if width == 0 || width % CHARS_PER_ROW != 0 {
            return Err(DrawError::InvalidAtlas("width must be a positive multiple of 16"));
        }
        let cell_size = width >> LOG2_CHARS_PER_ROW;
        if height < cell_size * CHARS_PER_ROW {
            return Err(DrawError::InvalidAtlas("height must fit 16 rows of cells"));
        }

        let widths = calculate_text_widths(&pixels, width, height, cell_size);
        log::debug!("font atlas {width}x{height} loaded, cell size {cell_size}");
        Ok(Self { pixels, width, height, cell_size, widths })
    }

    /// Edge length of one grid cell in pixels. Never zero.
    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tight source width of glyph `c` in atlas pixels.
    #[inline]
    pub fn glyph_width(&self, c: u8) -> u32 {
        self.widths[c as usize]
    }

    pub fn widths(&self) -> &GlyphWidths {
        &self.widths
    }

    /// Top-left corner of the cell holding glyph `c`.
    #[inline]
    pub fn cell_origin(&self, c: u8) -> (u32, u32) {
        let c = c as u32;
        ((c & 0x0F) * self.cell_size, (c >> LOG2_CHARS_PER_ROW) * self.cell_size)
    }

    /// One row of atlas pixels. Empty when `y` is out of range.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        if y >= self.height {
            return &[];
        }
        let start = (y * self.width) as usize;
        &self.pixels[start..start + self.width as usize]
    }
}

impl Default for FontAtlas {
    /// The state before any atlas has been installed: no pixels, all widths
    /// zero, cell size [`DEFAULT_CELL_SIZE`].
    fn default() -> Self {
        Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
            cell_size: DEFAULT_CELL_SIZE,
            widths: [0; 256],
        }
    }
}

/// Measure the tight width of every cell of a 16×16 grid atlas.
///
/// For each pixel row and each cell on it, the cell is scanned right to left
/// and the first pixel with alpha ≥ [`WIDTH_ALPHA_THRESHOLD`] gives a
/// candidate width; a cell's width is the maximum over its rows. Space is
/// then forced to a quarter of a cell.
pub fn calculate_text_widths(pixels: &[u32], width: u32, height: u32, cell_size: u32) -> GlyphWidths {
    let mut widths = [0u32; 256];

    if cell_size > 0 {
        for y in 0..height {
            let char_y = y / cell_size;
            let row_start = (y * width) as usize;
            let row = &pixels[row_start..row_start + width as usize];

            let mut x = 0;
            while x + cell_size <= width {
                let char_x = x / cell_size;
                let index = (char_x | (char_y << LOG2_CHARS_PER_ROW)) as usize;

                for xx in (0..cell_size).rev() {
                    if argb_alpha(row[(x + xx) as usize]) < WIDTH_ALPHA_THRESHOLD {
                        continue;
                    }
                    if index < widths.len() {
                        widths[index] = widths[index].max(xx + 1);
                    }
                    break;
                }
                x += cell_size;
            }
        }
    }

    widths[b' ' as usize] = cell_size / 4;
    widths
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE: u32 = 0xFFFF_FFFF;

    /// Blank atlas with `cell`-sized cells.
    fn blank(cell: u32) -> (Vec<u32>, u32, u32) {
        let size = cell * 16;
        (vec![0; (size * size) as usize], size, size)
    }

    fn paint(pixels: &mut [u32], width: u32, c: u8, cell: u32, x: u32, y: u32, argb: u32) {
        let ox = (c as u32 & 0x0F) * cell;
        let oy = (c as u32 >> 4) * cell;
        pixels[((oy + y) * width + ox + x) as usize] = argb;
    }

    #[test]
    fn measures_rightmost_opaque_column() {
        let (mut px, w, h) = blank(8);
        paint(&mut px, w, b'A', 8, 0, 0, OPAQUE);
        paint(&mut px, w, b'A', 8, 5, 3, OPAQUE);
        paint(&mut px, w, b'A', 8, 2, 7, OPAQUE);
        let atlas = FontAtlas::new(px, w, h).unwrap();
        assert_eq!(atlas.glyph_width(b'A'), 6);
        assert_eq!(atlas.glyph_width(b'B'), 0);
    }

    #[test]
    fn faint_pixels_do_not_count() {
        let (mut px, w, h) = blank(8);
        paint(&mut px, w, b'i', 8, 1, 1, OPAQUE);
        paint(&mut px, w, b'i', 8, 6, 1, 0x7E00_0000);
        paint(&mut px, w, b'j', 8, 6, 1, 0x7F00_0000);
        let atlas = FontAtlas::new(px, w, h).unwrap();
        assert_eq!(atlas.glyph_width(b'i'), 2);
        assert_eq!(atlas.glyph_width(b'j'), 7);
    }

    #[test]
    fn space_is_quarter_cell_regardless_of_pixels() {
        let (mut px, w, h) = blank(16);
        for x in 0..16 {
            paint(&mut px, w, b' ', 16, x, 0, OPAQUE);
        }
        let atlas = FontAtlas::new(px, w, h).unwrap();
        assert_eq!(atlas.cell_size(), 16);
        assert_eq!(atlas.glyph_width(b' '), 4);
    }

    #[test]
    fn last_cell_is_indexed() {
        let (mut px, w, h) = blank(8);
        paint(&mut px, w, 0xFF, 8, 7, 7, OPAQUE);
        let atlas = FontAtlas::new(px, w, h).unwrap();
        assert_eq!(atlas.glyph_width(0xFF), 8);
        assert_eq!(atlas.cell_origin(0xFF), (120, 120));
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(FontAtlas::new(vec![0; 10], 4, 4), Err(DrawError::PixelCountMismatch { .. })));
        assert!(matches!(FontAtlas::new(vec![0; 12 * 12], 12, 12), Err(DrawError::InvalidAtlas(_))));
        assert!(matches!(FontAtlas::new(Vec::new(), 0, 0), Err(DrawError::InvalidAtlas(_))));
        assert!(matches!(FontAtlas::new(vec![0; 128 * 64], 128, 64), Err(DrawError::InvalidAtlas(_))));
    }

    #[test]
    fn default_atlas_has_safe_cell_size() {
        let atlas = FontAtlas::default();
        assert_eq!(atlas.cell_size(), DEFAULT_CELL_SIZE);
        assert!(atlas.widths().iter().all(|&w| w == 0));
        assert!(atlas.row(0).is_empty());
    }

    #[test]
    fn zero_cell_size_degenerates_to_zero_widths() {
        let widths = calculate_text_widths(&[], 0, 0, 0);
        assert!(widths.iter().all(|&w| w == 0));
    }
}
