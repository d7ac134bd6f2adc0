//! Text drawn by a native font backend.
//!
//! The backend only ever sees plain runs: color codes are split off here and
//! every run is handed over with its resolved color.

use common::{Color, Size2D};
use font::markup::{is_empty_text, Runs};
use font::metrics::EXTERNAL_SHADOW_OFFSET;
use font::{ColorTable, DrawTextArgs, FontDesc, FontStyle};

use crate::bitmap::Bitmap;
use crate::rasterizer::shadow_color;
use crate::TextRenderer;

/// A platform font backend able to measure and draw shaped text.
pub trait ExternalFont {
    /// Create a font of the named family.
    fn make_font(&self, name: &str, size: i32, style: FontStyle) -> FontDesc;

    /// Size of `args.text`, which contains no color codes.
    fn measure(&self, args: &DrawTextArgs<'_>) -> Size2D;

    /// Draw `args.text` in `color` with its top-left corner at `(x, y)` and
    /// return the drawn size.
    fn draw(&self, args: &DrawTextArgs<'_>, bmp: &mut Bitmap, x: i32, y: i32, color: Color) -> Size2D;
}

/// Text renderer delegating glyph work to an [`ExternalFont`].
pub struct ExternalFontTextRenderer {
    font: Box<dyn ExternalFont>,
    colors: ColorTable,
    black_text_shadows: bool,
}

impl ExternalFontTextRenderer {
    pub fn new(font: Box<dyn ExternalFont>, black_text_shadows: bool) -> Self {
        Self { font, colors: ColorTable::new(), black_text_shadows }
    }

    pub fn font(&self) -> &dyn ExternalFont {
        self.font.as_ref()
    }
}

impl TextRenderer for ExternalFontTextRenderer {
    fn measure(&self, args: &DrawTextArgs<'_>) -> Size2D {
        let mut size = Size2D::ZERO;
        if is_empty_text(&self.colors, args.text) {
            return size;
        }

        for run in Runs::new(&self.colors, args.text) {
            if run.text.is_empty() {
                continue;
            }
            let part = self.font.measure(&args.with_text(run.text));
            size.width = size.width.saturating_add(part.width);
            size.height = size.height.max(part.height);
        }

        if args.use_shadow {
            size.width = size.width.saturating_add(EXTERNAL_SHADOW_OFFSET);
            size.height = size.height.saturating_add(EXTERNAL_SHADOW_OFFSET);
        }
        size
    }

    fn draw(&self, bmp: &mut Bitmap, args: &DrawTextArgs<'_>, mut x: i32, y: i32) {
        if is_empty_text(&self.colors, args.text) {
            return;
        }

        for run in Runs::new(&self.colors, args.text) {
            if run.text.is_empty() {
                continue;
            }
            let part = args.with_text(run.text);
            let col = self.colors.get(run.color);

            if args.use_shadow {
                let back = shadow_color(col, self.black_text_shadows);
                self.font.draw(
                    &part,
                    bmp,
                    x.saturating_add(EXTERNAL_SHADOW_OFFSET),
                    y.saturating_add(EXTERNAL_SHADOW_OFFSET),
                    back,
                );
            }
            let drawn = self.font.draw(&part, bmp, x, y, col);
            x = x.saturating_add(drawn.width);
        }
    }

    fn is_bitmapped(&self) -> bool {
        false
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
