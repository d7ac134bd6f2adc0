//! Turning drawn text into GPU textures.

use common::{next_pow_of_2, Size2D};

use crate::bitmap::Bitmap;

/// Backend handle of an uploaded texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Graphics backend capability used to upload bitmaps.
pub trait GraphicsApi {
    fn create_texture(&mut self, bmp: &Bitmap, managed: bool, mipmaps: bool) -> TextureId;
}

/// A textured quad: screen rectangle plus the UV rectangle of the used part
/// of its (power-of-two sized) texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Texture {
    /// `None` for a texture with nothing to draw.
    pub id: Option<TextureId>,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

impl Texture {
    /// Zero-sized texture at `(x, y)` covering the full UV range.
    pub const fn empty(x: i32, y: i32) -> Self {
        Self { id: None, x, y, width: 0, height: 0, u1: 0.0, v1: 0.0, u2: 1.0, v2: 1.0 }
    }
}

/// Upload `bmp` and describe the `used` part of it placed at `(x, y)`.
pub fn make_2d_texture(gfx: &mut dyn GraphicsApi, bmp: &Bitmap, used: Size2D, x: i32, y: i32) -> Texture {
    let id = gfx.create_texture(bmp, false, false);
    log::trace!("created {}x{} text texture {:?}", bmp.width, bmp.height, id);

    Texture {
        id: Some(id),
        x,
        y,
        width: used.width,
        height: used.height,
        u1: 0.0,
        v1: 0.0,
        u2: used.width as f32 / bmp.width as f32,
        v2: used.height as f32 / bmp.height as f32,
    }
}

/// Vertical padding to strip from each side of something `height` tall.
/// Zero for a non-positive `scale`.
#[inline]
fn padding(height: i32, point: i32, scale: i32) -> i32 {
    if scale <= 0 { 0 } else { (height - point) / scale }
}

/// Shrink a text texture's height and V range by its vertical padding.
pub fn reduce_padding_texture(tex: &mut Texture, point: i32, scale: i32) {
    let padding = padding(tex.height, point, scale);
    let v_adj = padding as f32 / next_pow_of_2(tex.height.max(0) as u32) as f32;
    tex.v1 += v_adj;
    tex.v2 -= v_adj;
    tex.height -= padding * 2;
}

/// [`reduce_padding_texture`] for a bare height.
pub fn reduce_padding_height(height: i32, point: i32, scale: i32) -> i32 {
    height - padding(height, point, scale) * 2
}
