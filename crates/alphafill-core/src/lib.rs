//! alphafill Core - Basic data structures for inpainting
//!
//! This crate provides the fundamental data structures used throughout
//! the alphafill workspace:
//!
//! - [`RgbaImage`] - Floating-point RGBA image buffer
//! - [`Sampler`] - Interpolating point sampler with an out-of-range policy
//! - [`Rect`] - Regions of interest and tile traversal

pub mod error;
pub mod image;
pub mod rect;
pub mod sampler;

pub use error::{Error, Result};
pub use image::{Rgba, RgbaImage, TRANSPARENT};
pub use rect::{Rect, Tiles};
pub use sampler::{Abyss, Interpolation, Sampler};

/// Color channel indices and helper functions for RGBA pixels.
///
/// # Pixel format
///
/// Packed 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in
/// LSB). Unpacked pixels are `[f32; 4]` in `R, G, B, A` order with each
/// channel in `[0.0, 1.0]`.
pub mod color {
    use crate::image::Rgba;

    /// Red channel
    pub const RED: usize = 0;
    /// Green channel
    pub const GREEN: usize = 1;
    /// Blue channel
    pub const BLUE: usize = 2;
    /// Alpha channel
    pub const ALPHA: usize = 3;

    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (
            ((pixel >> RED_SHIFT) & 0xff) as u8,
            ((pixel >> GREEN_SHIFT) & 0xff) as u8,
            ((pixel >> BLUE_SHIFT) & 0xff) as u8,
            ((pixel >> ALPHA_SHIFT) & 0xff) as u8,
        )
    }

    /// Convert a packed pixel to floating-point channels.
    #[inline]
    pub fn unpack(pixel: u32) -> Rgba {
        let (r, g, b, a) = extract_rgba(pixel);
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    /// Convert floating-point channels to a packed pixel.
    ///
    /// Channels are clamped to `[0.0, 1.0]` and rounded.
    #[inline]
    pub fn pack(p: Rgba) -> u32 {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        compose_rgba(q(p[RED]), q(p[GREEN]), q(p[BLUE]), q(p[ALPHA]))
    }

    /// Sum of the color channels, ignoring alpha.
    #[inline]
    pub fn energy(p: &Rgba) -> f32 {
        p[RED] + p[GREEN] + p[BLUE]
    }

    /// Squared Euclidean distance over the color channels.
    #[inline]
    pub fn rgb_distance_sq(a: &Rgba, b: &Rgba) -> f32 {
        let dr = a[RED] - b[RED];
        let dg = a[GREEN] - b[GREEN];
        let db = a[BLUE] - b[BLUE];
        dr * dr + dg * dg + db * db
    }

    /// Blend `over` onto `under` with weight `t` on `over`, keeping the
    /// alpha of `under`.
    #[inline]
    pub fn mix_rgb(over: &Rgba, under: &Rgba, t: f32) -> Rgba {
        [
            over[RED] * t + under[RED] * (1.0 - t),
            over[GREEN] * t + under[GREEN] * (1.0 - t),
            over[BLUE] * t + under[BLUE] * (1.0 - t),
            under[ALPHA],
        ]
    }

}
