//! # Paint Crate
//!
//! Draws color-coded text into ARGB bitmaps, either from a bitmap font atlas
//! or through a native font backend, and turns the result into textures.
//!
//! - `bitmap`: the destination pixel buffer
//! - `rasterizer`: scaled atlas blits, shadows and underlines
//! - `external`: bridge to a platform font backend
//! - `texture`: texture upload and padding trimming
//!
//! [`Drawer2D`] ties these together and is the entry point for callers.

pub mod bitmap;
pub mod external;
pub mod rasterizer;
pub mod texture;

use common::{DrawError, Size2D};
use font::markup;
use font::{ColorTable, DrawTextArgs, FontAtlas, FontDesc, FontStyle};

pub use bitmap::Bitmap;
pub use external::{ExternalFont, ExternalFontTextRenderer};
pub use rasterizer::BitmapTextRenderer;
pub use texture::{GraphicsApi, Texture, TextureId};

/// Reference glyph measured by [`Drawer2D::font_height`].
const HEIGHT_REFERENCE_TEXT: &[u8] = b"I";

// ─────────────────────────────────────────────────────────────────────────────
// TextRenderer
// ─────────────────────────────────────────────────────────────────────────────

/// Measure/draw contract shared by the bitmapped and external font paths.
pub trait TextRenderer {
    /// Size `args` would cover when drawn. `(0, 0)` for empty text.
    fn measure(&self, args: &DrawTextArgs<'_>) -> Size2D;

    /// Draw `args` with its top-left corner at `(x, y)`. Pixels falling
    /// outside `bmp` are skipped.
    fn draw(&self, bmp: &mut Bitmap, args: &DrawTextArgs<'_>, x: i32, y: i32);

    /// Whether this renderer draws from the bitmap font atlas.
    fn is_bitmapped(&self) -> bool;
}

// ─────────────────────────────────────────────────────────────────────────────
// Drawer2DOptions
// ─────────────────────────────────────────────────────────────────────────────

/// Text drawing settings, fixed when the [`Drawer2D`] is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawer2DOptions {
    /// Draw from the bitmap font atlas even when a native font is available.
    pub bitmapped_text: bool,
    /// Shadows are solid black instead of a darkened copy of the text color.
    pub black_text_shadows: bool,
    /// Font family requested from the native font backend.
    pub font_name: String,
}

impl Default for Drawer2DOptions {
    fn default() -> Self {
        Self {
            bitmapped_text: true,
            black_text_shadows: false,
            font_name: String::from("Arial"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Drawer2D
// ─────────────────────────────────────────────────────────────────────────────

/// Text drawing context.
///
/// Owns the font atlas and color table. The atlas is always kept so it can
/// be swapped at any time; which path measures and draws is chosen once, at
/// construction.
pub struct Drawer2D {
    options: Drawer2DOptions,
    bitmap: BitmapTextRenderer,
    external: Option<ExternalFontTextRenderer>,
}

impl Drawer2D {
    /// Context drawing from the bitmap atlas only.
    pub fn new(options: Drawer2DOptions) -> Self {
        let bitmap = BitmapTextRenderer::new(FontAtlas::default(), options.black_text_shadows);
        Self { options, bitmap, external: None }
    }

    /// Context that draws with `font` unless `options.bitmapped_text` is set.
    pub fn with_external_font(options: Drawer2DOptions, font: Box<dyn ExternalFont>) -> Self {
        let external = ExternalFontTextRenderer::new(font, options.black_text_shadows);
        let mut drawer = Self::new(options);
        drawer.external = Some(external);
        drawer
    }

    pub fn options(&self) -> &Drawer2DOptions {
        &self.options
    }

    /// Whether text is drawn from the bitmap font atlas.
    pub fn bitmapped_text(&self) -> bool {
        self.renderer().is_bitmapped()
    }

    fn renderer(&self) -> &dyn TextRenderer {
        match &self.external {
            Some(external) if !self.options.bitmapped_text => external as &dyn TextRenderer,
            _ => &self.bitmap,
        }
    }

    pub fn atlas(&self) -> &FontAtlas {
        self.bitmap.atlas()
    }

    pub fn colors(&self) -> &ColorTable {
        self.bitmap.colors()
    }

    /// Replace the font atlas with `bmp`, which is taken over.
    ///
    /// The bitmap is validated first; on error the current atlas stays.
    pub fn set_font_atlas(&mut self, bmp: Bitmap) -> Result<(), DrawError> {
        let atlas = FontAtlas::new(bmp.pixels, bmp.width, bmp.height).inspect_err(|e| {
            log::warn!("rejected font atlas: {e}");
        })?;
        self.bitmap.set_atlas(atlas);
        Ok(())
    }

    /// Font of the given size and style for the active path.
    pub fn make_font(&self, size: i32, style: FontStyle) -> FontDesc {
        match &self.external {
            Some(external) if !self.bitmapped_text() => {
                external.font().make_font(&self.options.font_name, size, style)
            }
            _ => FontDesc::bitmapped(size, style),
        }
    }

    pub fn measure_text(&self, args: &DrawTextArgs<'_>) -> Size2D {
        self.renderer().measure(args)
    }

    pub fn draw_text(&self, bmp: &mut Bitmap, args: &DrawTextArgs<'_>, x: i32, y: i32) {
        self.renderer().draw(bmp, args, x, y);
    }

    /// Line height of `font`, measured on a capital `I`.
    pub fn font_height(&self, font: &FontDesc, use_shadow: bool) -> i32 {
        let args = DrawTextArgs::new(HEIGHT_REFERENCE_TEXT, *font, use_shadow);
        self.measure_text(&args).height
    }

    /// Draw `args` into a fresh power-of-two bitmap, upload it and place the
    /// result at `(x, y)`.
    pub fn make_text_texture(&self, gfx: &mut dyn GraphicsApi, args: &DrawTextArgs<'_>, x: i32, y: i32) -> Texture {
        let size = self.measure_text(args);
        if size.is_zero() {
            return Texture::empty(x, y);
        }

        let mut bmp = Bitmap::allocate_cleared_pow2(size.width.max(0) as u32, size.height.max(0) as u32);
        self.draw_text(&mut bmp, args, 0, 0);
        texture::make_2d_texture(gfx, &bmp, size, x, y)
    }

    /// Trim the padding bitmapped text adds above and below the glyphs.
    /// Does nothing on the external font path.
    pub fn reduce_padding_texture(&self, tex: &mut Texture, point: i32, scale: i32) {
        if !self.bitmapped_text() {
            return;
        }
        texture::reduce_padding_texture(tex, point, scale);
    }

    /// Height counterpart of [`Self::reduce_padding_texture`].
    pub fn reduce_padding_height(&self, height: i32, point: i32, scale: i32) -> i32 {
        if !self.bitmapped_text() {
            return height;
        }
        texture::reduce_padding_height(height, point, scale)
    }

    /// See [`markup::is_empty_text`].
    pub fn is_empty_text(&self, text: &[u8]) -> bool {
        markup::is_empty_text(self.colors(), text)
    }

    /// See [`markup::is_valid_color_code_at`].
    pub fn is_valid_color_code_at(&self, text: &[u8], i: usize) -> bool {
        markup::is_valid_color_code_at(self.colors(), text, i)
    }

    /// See [`markup::last_color`].
    pub fn last_color(&self, text: &[u8], start: usize) -> u8 {
        markup::last_color(self.colors(), text, start)
    }
}

impl Default for Drawer2D {
    fn default() -> Self {
        Self::new(Drawer2DOptions::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
