//! # Common Foundation Crate
//!
//! Shared color type, sizes, integer math helpers and the error type used by
//! the text drawing crates.

#![forbid(unsafe_code)]

use core::fmt;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// DrawError
// ─────────────────────────────────────────────────────────────────────────────

/// Error type that every drawing subsystem maps into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// A rectangle does not lie fully inside the target bitmap.
    #[error("tried to clear at invalid coords ({x}, {y}) {width}x{height} in a {bmp_width}x{bmp_height} bitmap")]
    InvalidBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        bmp_width: u32,
        bmp_height: u32,
    },
    /// A font atlas image that cannot be split into a 16x16 grid.
    #[error("invalid font atlas: {0}")]
    InvalidAtlas(&'static str),
    /// Pixel data does not match the stated dimensions.
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

// ─────────────────────────────────────────────────────────────────────────────
// Integer helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Integer division rounding towards positive infinity.
///
/// Only meaningful for non-negative `a` and positive `b`.
#[inline]
pub const fn ceil_div(a: i32, b: i32) -> i32 {
    a / b + if a % b != 0 { 1 } else { 0 }
}

/// Smallest power of two that is `>= value` (1 for 0).
#[inline]
pub const fn next_pow_of_2(value: u32) -> u32 {
    if value <= 1 {
        return 1;
    }
    value.next_power_of_two()
}

// ─────────────────────────────────────────────────────────────────────────────
// Size2D
// ─────────────────────────────────────────────────────────────────────────────

/// Width and height in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Size2D {
    pub width: i32,
    pub height: i32,
}

impl Size2D {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if both dimensions are zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.width == 0 && self.height == 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// An RGBA color with 8 bits per channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Create a fully-opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply the RGB channels by `t`, truncating. Alpha is kept.
    pub fn scale(self, t: f32) -> Self {
        let mul = |c: u8| (c as f32 * t) as u8;
        Self {
            r: mul(self.r),
            g: mul(self.g),
            b: mul(self.b),
            a: self.a,
        }
    }

    /// Pack into a `u32` in ARGB format (`0xAARRGGBB`).
    #[inline]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | (self.b as u32)
    }

    /// Unpack from a `u32` in `0xAARRGGBB` format.
    #[inline]
    pub const fn from_argb(v: u32) -> Self {
        Self {
            a: (v >> 24) as u8,
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }
}

/// Alpha channel of an ARGB pixel.
#[inline]
pub const fn argb_alpha(pixel: u32) -> u8 {
    (pixel >> 24) as u8
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:02x}{:02x}{:02x}{:02x})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
