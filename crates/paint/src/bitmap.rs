//! ARGB pixel buffer that text is drawn into.
//!
//! Pixel format: **ARGB** (`0xAARRGGBB`), one `u32` per pixel, row-major.

use common::{next_pow_of_2, Color, DrawError};

/// An ARGB pixel buffer owned by the caller.
///
/// `pixels.len()` must equal `width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub pixels: Vec<u32>,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    /// Create a bitmap filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Create a transparent bitmap whose dimensions are `width` and `height`
    /// rounded up to powers of two.
    pub fn allocate_cleared_pow2(width: u32, height: u32) -> Self {
        Self::new(next_pow_of_2(width), next_pow_of_2(height))
    }

    /// Wrap existing pixel data.
    pub fn from_pixels(pixels: Vec<u32>, width: u32, height: u32) -> Result<Self, DrawError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DrawError::PixelCountMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { pixels, width, height })
    }

    /// Read a pixel. `None` outside the bitmap.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Overwrite a single pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, argb: u32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = argb;
    }

    /// One row of pixels. Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable row of pixels. Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.width as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    /// Fill a rectangle that must lie entirely inside the bitmap.
    ///
    /// Unlike [`Self::fill_rect`] nothing is clipped: a rectangle with a
    /// negative origin or size, or one reaching past the right or bottom edge,
    /// is rejected with [`DrawError::InvalidBounds`] and no pixel is written.
    pub fn clear(&mut self, color: Color, x: i32, y: i32, width: i32, height: i32) -> Result<(), DrawError> {
        let in_bounds = x >= 0
            && y >= 0
            && width >= 0
            && height >= 0
            && x as i64 + width as i64 <= self.width as i64
            && y as i64 + height as i64 <= self.height as i64;
        if !in_bounds {
            return Err(DrawError::InvalidBounds {
                x, y, width, height,
                bmp_width: self.width,
                bmp_height: self.height,
            });
        }

        let argb = color.to_argb();
        for yy in y..y + height {
            self.row_mut(yy as u32)[x as usize..(x + width) as usize].fill(argb);
        }
        Ok(())
    }

    /// Fill a flat rectangle, clipped to the bitmap. Pixels are overwritten,
    /// not blended.
    pub fn fill_rect(&mut self, color: Color, x: i32, y: i32, width: i32, height: i32) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + width as i64).min(self.width as i64);
        let y1 = (y as i64 + height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let argb = color.to_argb();
        for row in y0..y1 {
            self.row_mut(row as u32)[x0 as usize..x1 as usize].fill(argb);
        }
    }

    /// Draw a solid underline bar.
    ///
    /// Rows are walked top to bottom, so the first row past the bottom edge
    /// ends the fill. Columns past the right edge end the row.
    pub fn underline(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let argb = color.to_argb();
        for yy in y..y.saturating_add(height) {
            if yy >= self.height as i32 {
                return;
            }
            if yy < 0 {
                continue;
            }
            let row = self.row_mut(yy as u32);
            for xx in x..x.saturating_add(width) {
                if xx >= row.len() as i32 {
                    break;
                }
                if xx < 0 {
                    continue;
                }
                row[xx as usize] = argb;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
