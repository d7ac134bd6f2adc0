//! # Font
//!
//! Bitmap font atlas, color-code markup and text metrics.
//!
//! - `atlas`: 16×16 grid font atlas and glyph width discovery
//! - `palette`: `&` color code → RGBA table
//! - `markup`: color-code scanner (runs, glyphs, empty-text checks)
//! - `metrics`: bitmapped text padding, height and glyph width formulas

pub mod atlas;
pub mod markup;
pub mod metrics;
pub mod palette;

pub use atlas::FontAtlas;
pub use palette::ColorTable;

/// Text style requested for a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    /// Only honored by the external font path.
    Bold,
    /// Only honored by the external font path.
    Italic,
    Underline,
}

/// Opaque reference to a font owned by an external font backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u64);

/// A font: point size, style and, for external fonts, the backend handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontDesc {
    /// Rendered cell height in pixels.
    pub size: i32,
    pub style: FontStyle,
    /// `None` when drawing with the bitmap atlas.
    pub handle: Option<FontHandle>,
}

impl FontDesc {
    /// A font drawn from the bitmap atlas.
    pub const fn bitmapped(size: i32, style: FontStyle) -> Self {
        Self { size, style, handle: None }
    }
}

/// Everything needed to measure or draw one string.
///
/// The text is borrowed for the duration of the call. It is treated as 8-bit
/// code page text: every byte selects one atlas cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawTextArgs<'a> {
    pub text: &'a [u8],
    pub font: FontDesc,
    pub use_shadow: bool,
}

impl<'a> DrawTextArgs<'a> {
    pub fn new<T: AsRef<[u8]> + ?Sized>(text: &'a T, font: FontDesc, use_shadow: bool) -> Self {
        Self { text: text.as_ref(), font, use_shadow }
    }

    /// Args with no text, to be filled in later with [`Self::with_text`].
    pub fn empty(font: FontDesc, use_shadow: bool) -> Self {
        Self { text: &[], font, use_shadow }
    }

    /// Same font and shadow, different text.
    pub fn with_text<'b>(&self, text: &'b [u8]) -> DrawTextArgs<'b> {
        DrawTextArgs { text, font: self.font, use_shadow: self.use_shadow }
    }
}
