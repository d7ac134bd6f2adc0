//! # Bitmapped Text Rasterizer
//!
//! Measures and draws markup text straight from the 16×16 font atlas.
//! Each glyph cell is scaled with nearest-neighbor sampling to the requested
//! point size, alpha-tested, tinted with its run color and written into the
//! destination bitmap. Optional drop shadow and underline.

use common::{argb_alpha, Color, Size2D};
use font::markup::{is_empty_text, Glyphs};
use font::metrics::{adj_height, glyph_width, shadow_offset, underline_offset, x_padding, y_padding};
use font::{ColorTable, DrawTextArgs, FontAtlas, FontStyle};

use crate::bitmap::Bitmap;
use crate::TextRenderer;

/// Glyphs drawn per call. Text past this many visible glyphs is dropped.
pub const MAX_GLYPHS: usize = 256;

/// Tint an atlas pixel: keep its alpha, scale each color channel by `col`.
#[inline]
pub fn tint_pixel(src: u32, col: Color) -> u32 {
    let b = (src & 0xFF) * col.b as u32 / 255;
    let g = ((src >> 8) & 0xFF) * col.g as u32 / 255;
    let r = ((src >> 16) & 0xFF) * col.r as u32 / 255;
    (src & 0xFF00_0000) | r << 16 | g << 8 | b
}

/// Color of a drop shadow cast by text in `col`.
#[inline]
pub fn shadow_color(col: Color, black_text_shadows: bool) -> Color {
    if black_text_shadows { Color::BLACK } else { col.scale(0.25) }
}

/// A glyph prepared for drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PlacedGlyph {
    c: u8,
    color: Color,
    dst_width: i32,
}

/// Resolve colors and widths of every visible glyph, up to [`MAX_GLYPHS`].
fn layout_glyphs(
    atlas: &FontAtlas,
    colors: &ColorTable,
    text: &[u8],
    point: i32,
    shadow: Option<bool>,
    out: &mut [PlacedGlyph; MAX_GLYPHS],
) -> usize {
    let resolve = |code: u8| {
        let col = colors.get(code);
        match shadow {
            Some(black) => shadow_color(col, black),
            None => col,
        }
    };

    let mut count = 0;
    for (c, code) in Glyphs::new(colors, text) {
        if count == MAX_GLYPHS {
            log::warn!("text has more than {MAX_GLYPHS} glyphs, drawing only the first {MAX_GLYPHS}");
            break;
        }
        out[count] = PlacedGlyph { c, color: resolve(code), dst_width: glyph_width(atlas, point, c) };
        count += 1;
    }
    count
}

/// Group consecutive glyphs of identical color into underline segments.
///
/// Yields `(x offset, width, color)` per segment, widths including padding.
fn underline_segments(glyphs: &[PlacedGlyph], x_pad: i32) -> Vec<(i32, i32, Color)> {
    let mut segments = Vec::new();
    let mut offset = 0;
    let mut i = 0;
    while i < glyphs.len() {
        let col = glyphs[i].color;
        let mut width = 0;
        while i < glyphs.len() && glyphs[i].color == col {
            width += glyphs[i].dst_width + x_pad;
            i += 1;
        }
        segments.push((offset, width, col));
        offset += width;
    }
    segments
}

/// Draw one copy of the text at `(x, y)`.
///
/// `shadow` is `Some(black_text_shadows)` for the shadow copy, which replaces
/// every run color with its shadow color.
pub fn draw_core(
    atlas: &FontAtlas,
    colors: &ColorTable,
    bmp: &mut Bitmap,
    args: &DrawTextArgs<'_>,
    x: i32,
    y: i32,
    shadow: Option<bool>,
) {
    let point = args.font.size;
    if point <= 0 {
        return;
    }

    let mut glyphs = [PlacedGlyph::default(); MAX_GLYPHS];
    let count = layout_glyphs(atlas, colors, args.text, point, shadow, &mut glyphs);
    let glyphs = &glyphs[..count];

    let cell = atlas.cell_size() as i32;
    let x_pad = x_padding(point);
    let y_pad = y_padding(point);
    let bmp_width = bmp.width as i32;

    for yy in 0..point {
        let dst_y = y.saturating_add(yy + y_pad);
        if dst_y >= bmp.height as i32 {
            break;
        }
        if dst_y < 0 {
            continue;
        }

        let font_y = (yy * cell / point) as u32;
        let dst_row = bmp.row_mut(dst_y as u32);
        let mut pen_x = x;

        for g in glyphs {
            let (src_x, src_y) = atlas.cell_origin(g.c);
            let font_row = atlas.row(src_y + font_y);
            let src_width = atlas.glyph_width(g.c) as i32;

            for xx in 0..g.dst_width {
                let font_x = src_x as i32 + xx * src_width / g.dst_width;
                let src = font_row.get(font_x as usize).copied().unwrap_or(0);
                if argb_alpha(src) == 0 {
                    continue;
                }

                let dst_x = pen_x.saturating_add(xx);
                if dst_x >= bmp_width {
                    break;
                }
                if dst_x < 0 {
                    continue;
                }
                dst_row[dst_x as usize] = tint_pixel(src, g.color);
            }
            pen_x = pen_x.saturating_add(g.dst_width.saturating_add(x_pad));
        }
    }

    if args.font.style != FontStyle::Underline {
        return;
    }
    let cell_y = underline_offset(point);
    let underline_y = y.saturating_add(cell_y + y_pad);
    let underline_height = point - cell_y;
    for (offset, width, col) in underline_segments(glyphs, x_pad) {
        bmp.underline(x.saturating_add(offset), underline_y, width, underline_height, col);
    }
}

/// Size of bitmapped text: glyph widths plus padding by the adjusted line
/// height, plus the shadow offset if enabled.
pub fn measure_bitmap_text(atlas: &FontAtlas, colors: &ColorTable, args: &DrawTextArgs<'_>) -> Size2D {
    let point = args.font.size;
    let x_pad = x_padding(point);
    let mut total = Size2D::new(0, adj_height(point));

    for (c, _) in Glyphs::new(colors, args.text) {
        total.width = total.width.saturating_add(glyph_width(atlas, point, c).saturating_add(x_pad));
    }

    if args.use_shadow {
        let offset = shadow_offset(point);
        total.width = total.width.saturating_add(offset);
        total.height = total.height.saturating_add(offset);
    }
    total
}

// ─────────────────────────────────────────────────────────────────────────────
// BitmapTextRenderer
// ─────────────────────────────────────────────────────────────────────────────

/// Text renderer drawing from a bitmap font atlas.
#[derive(Clone, Debug, Default)]
pub struct BitmapTextRenderer {
    atlas: FontAtlas,
    colors: ColorTable,
    black_text_shadows: bool,
}

impl BitmapTextRenderer {
    pub fn new(atlas: FontAtlas, black_text_shadows: bool) -> Self {
        Self { atlas, colors: ColorTable::new(), black_text_shadows }
    }

    pub fn atlas(&self) -> &FontAtlas {
        &self.atlas
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    /// Install a new atlas, dropping the previous one.
    pub fn set_atlas(&mut self, atlas: FontAtlas) {
        self.atlas = atlas;
    }
}

impl TextRenderer for BitmapTextRenderer {
    fn measure(&self, args: &DrawTextArgs<'_>) -> Size2D {
        if is_empty_text(&self.colors, args.text) {
            return Size2D::ZERO;
        }
        measure_bitmap_text(&self.atlas, &self.colors, args)
    }

    fn draw(&self, bmp: &mut Bitmap, args: &DrawTextArgs<'_>, x: i32, y: i32) {
        if is_empty_text(&self.colors, args.text) {
            return;
        }
        if args.use_shadow {
            let offset = shadow_offset(args.font.size);
            let (sx, sy) = (x.saturating_add(offset), y.saturating_add(offset));
            draw_core(&self.atlas, &self.colors, bmp, args, sx, sy, Some(self.black_text_shadows));
        }
        draw_core(&self.atlas, &self.colors, bmp, args, x, y, None);
    }

    fn is_bitmapped(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use font::FontDesc;

    const CELL: u32 = 8;
    const SIZE: u32 = CELL * 16;
    const OPAQUE: u32 = 0xFFFF_FFFF;

    /// Atlas where glyph `c` is a solid block `widths[c]` wide covering the
    /// top six rows of its cell.
    fn block_atlas(glyphs: &[(u8, u32)]) -> FontAtlas {
        let mut px = vec![0u32; (SIZE * SIZE) as usize];
        for &(c, w) in glyphs {
            let ox = (c as u32 & 0x0F) * CELL;
            let oy = (c as u32 >> 4) * CELL;
            for y in 0..6 {
                for x in 0..w {
                    px[((oy + y) * SIZE + ox + x) as usize] = OPAQUE;
                }
            }
        }
        FontAtlas::new(px, SIZE, SIZE).unwrap()
    }

    fn args(text: &str, size: i32, style: FontStyle, shadow: bool) -> DrawTextArgs<'_> {
        DrawTextArgs::new(text, FontDesc::bitmapped(size, style), shadow)
    }

    /// Columns of `row` holding a non-transparent pixel.
    fn lit_columns(bmp: &Bitmap, row: u32) -> Vec<usize> {
        bmp.row(row).iter().enumerate().filter(|(_, p)| **p != 0).map(|(i, _)| i).collect()
    }

    #[test]
    fn tint_keeps_alpha_and_scales_channels() {
        assert_eq!(tint_pixel(0x80FF_FFFF, Color::rgb(191, 0, 64)), 0x80BF_0040);
        assert_eq!(tint_pixel(0xFF80_8080, Color::WHITE), 0xFF80_8080);
        assert_eq!(tint_pixel(0xFFFF_FFFF, Color::BLACK), 0xFF00_0000);
    }

    #[test]
    fn shadow_colors() {
        assert_eq!(shadow_color(Color::WHITE, true), Color::BLACK);
        assert_eq!(shadow_color(Color::WHITE, false), Color::rgb(63, 63, 63));
    }

    #[test]
    fn glyph_scaled_to_point_size() {
        let atlas = block_atlas(&[(b'A', 6)]);
        let colors = ColorTable::new();
        assert_eq!(atlas.glyph_width(b'A'), 6);

        let mut bmp = Bitmap::new(64, 32);
        draw_core(&atlas, &colors, &mut bmp, &args("A", 16, FontStyle::Normal, false), 0, 0, None);

        // y padding at point 16 is 4; first atlas row maps to rows 4..6
        assert!(lit_columns(&bmp, 3).is_empty());
        assert_eq!(lit_columns(&bmp, 4), (0..12).collect::<Vec<_>>());
        // atlas rows 6,7 are empty: destination rows 4 + 12.. stay clear
        assert!(lit_columns(&bmp, 16).is_empty());
    }

    #[test]
    fn glyphs_advance_with_padding_and_color() {
        let atlas = block_atlas(&[(b'A', 4), (b'B', 8)]);
        let colors = ColorTable::new();
        let mut bmp = Bitmap::new(64, 16);
        draw_core(&atlas, &colors, &mut bmp, &args("A&cB", 8, FontStyle::Normal, false), 0, 0, None);

        // point 8: A is 4 wide, B 8 wide, padding 1, y padding 2
        let row = bmp.row(2);
        assert_eq!(row[0], Color::WHITE.to_argb());
        assert_eq!(row[3], Color::WHITE.to_argb());
        assert_eq!(row[4], 0);
        assert_eq!(row[5], colors.get(b'c').to_argb());
        assert_eq!(row[12], colors.get(b'c').to_argb());
        assert_eq!(row[13], 0);
    }

    #[test]
    fn shadow_copy_uses_shadow_colors() {
        let atlas = block_atlas(&[(b'A', 8)]);
        let colors = ColorTable::new();
        let mut bmp = Bitmap::new(32, 32);
        draw_core(&atlas, &colors, &mut bmp, &args("&cA", 8, FontStyle::Normal, false), 0, 0, Some(false));
        assert_eq!(bmp.row(2)[0], colors.get(b'c').scale(0.25).to_argb());

        let mut bmp = Bitmap::new(32, 32);
        draw_core(&atlas, &colors, &mut bmp, &args("&cA", 8, FontStyle::Normal, false), 0, 0, Some(true));
        assert_eq!(bmp.row(2)[0], Color::BLACK.to_argb());
    }

    #[test]
    fn draw_with_shadow_offsets_shadow_copy() {
        let renderer = BitmapTextRenderer::new(block_atlas(&[(b'A', 8)]), true);
        let mut bmp = Bitmap::new(32, 32);
        renderer.draw(&mut bmp, &args("A", 16, FontStyle::Normal, true), 0, 0);
        // foreground covers x 0..16 on rows 4..16, shadow is offset by 2
        assert_eq!(bmp.row(4)[15], Color::WHITE.to_argb());
        assert_eq!(bmp.row(6)[17], Color::BLACK.to_argb());
        assert_eq!(bmp.row(17)[2], Color::BLACK.to_argb());
        assert_eq!(bmp.row(17)[1], 0);
    }

    #[test]
    fn underline_segments_group_by_color() {
        let atlas = block_atlas(&[(b'A', 8), (b'B', 4), (b'C', 8), (b'D', 2)]);
        let colors = ColorTable::new();
        let mut glyphs = [PlacedGlyph::default(); MAX_GLYPHS];
        let count = layout_glyphs(&atlas, &colors, b"&aAB&bCD", 16, None, &mut glyphs);
        assert_eq!(count, 4);

        let segments = underline_segments(&glyphs[..count], 2);
        assert_eq!(
            segments,
            vec![
                (0, (16 + 2) + (8 + 2), colors.get(b'a')),
                (28, (16 + 2) + (4 + 2), colors.get(b'b')),
            ]
        );
    }

    #[test]
    fn underline_drawn_below_text() {
        let atlas = block_atlas(&[(b'A', 8), (b'B', 4), (b'C', 8), (b'D', 2)]);
        let colors = ColorTable::new();
        let mut bmp = Bitmap::new(128, 32);
        draw_core(&atlas, &colors, &mut bmp, &args("&aAB&bCD", 16, FontStyle::Underline, false), 0, 0, None);

        // underline rows: 14 + 4 = 18 and 19
        for row in [18, 19] {
            let r = bmp.row(row);
            assert!(r[..28].iter().all(|&p| p == colors.get(b'a').to_argb()));
            assert!(r[28..52].iter().all(|&p| p == colors.get(b'b').to_argb()));
            assert!(r[52..].iter().all(|&p| p == 0));
        }
        assert!(lit_columns(&bmp, 20).is_empty());
    }

    #[test]
    fn clipped_at_every_edge() {
        let atlas = block_atlas(&[(b'A', 8)]);
        let colors = ColorTable::new();
        for (x, y) in [(-10, -10), (-5, 3), (10, -20), (14, 14), (1000, 0), (0, 1000), (-1000, -1000), (i32::MAX, i32::MAX)] {
            let mut bmp = Bitmap::new(16, 16);
            draw_core(&atlas, &colors, &mut bmp, &args("AAAA", 16, FontStyle::Underline, false), x, y, None);
            assert_eq!(bmp.pixels.len(), 256);
        }

        let mut bmp = Bitmap::new(16, 16);
        draw_core(&atlas, &colors, &mut bmp, &args("A", 16, FontStyle::Normal, false), -8, -4, None);
        // glyph spans x -8..8 and rows 0..12 after padding
        assert_eq!(bmp.row(0)[7], Color::WHITE.to_argb());
        assert_eq!(bmp.row(0)[8], 0);
    }

    #[test]
    fn glyphs_past_capacity_are_dropped() {
        let atlas = block_atlas(&[(b'A', 8)]);
        let colors = ColorTable::new();
        let text = "A".repeat(MAX_GLYPHS + 10);
        let mut glyphs = [PlacedGlyph::default(); MAX_GLYPHS];
        let count = layout_glyphs(&atlas, &colors, text.as_bytes(), 8, None, &mut glyphs);
        assert_eq!(count, MAX_GLYPHS);
    }

    #[test]
    fn measure_matches_formula() {
        let renderer = BitmapTextRenderer::new(block_atlas(&[(b'A', 6), (b'B', 8)]), false);
        let size = renderer.measure(&args("&aA&bB", 16, FontStyle::Normal, false));
        assert_eq!(size, Size2D::new((12 + 2) + (16 + 2), 24));

        let size = renderer.measure(&args("&aA&bB", 16, FontStyle::Normal, true));
        assert_eq!(size, Size2D::new(32 + 2, 26));
    }

    #[test]
    fn measure_saturates_at_huge_point_size() {
        let renderer = BitmapTextRenderer::new(block_atlas(&[(b'A', 8)]), false);
        let size = renderer.measure(&args("AAAAAAAA", i32::MAX, FontStyle::Normal, true));
        assert_eq!(size.width, i32::MAX);
        assert_eq!(size.height, (1 << 30) + i32::MAX / 8);
    }

    #[test]
    fn empty_text_measures_zero_and_draws_nothing() {
        let renderer = BitmapTextRenderer::new(block_atlas(&[(b'A', 8)]), false);
        for text in ["", "&a&b", "&F"] {
            assert_eq!(renderer.measure(&args(text, 16, FontStyle::Underline, true)), Size2D::ZERO);
            let mut bmp = Bitmap::new(16, 16);
            renderer.draw(&mut bmp, &args(text, 16, FontStyle::Underline, true), 0, 0);
            assert!(bmp.pixels.iter().all(|&p| p == 0));
        }
    }

    #[test]
    fn zero_point_size_draws_nothing() {
        let renderer = BitmapTextRenderer::new(block_atlas(&[(b'A', 8)]), false);
        let mut bmp = Bitmap::new(16, 16);
        renderer.draw(&mut bmp, &args("A", 0, FontStyle::Underline, true), 0, 0);
        assert!(bmp.pixels.iter().all(|&p| p == 0));
    }
}
