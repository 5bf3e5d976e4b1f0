//! RgbaImage - Floating-point RGBA image
//!
//! `RgbaImage` is a 2D array of straight (non-premultiplied) RGBA `f32`
//! pixels. All channels are nominally in `[0.0, 1.0]`; alpha below 1.0
//! marks a pixel as (partially) missing for the inpainting engine.
//!
//! # Examples
//!
//! ```
//! use alphafill_core::RgbaImage;
//!
//! let mut image = RgbaImage::new(100, 100).unwrap();
//! image.set_pixel(10, 20, [1.0, 0.0, 0.0, 1.0]).unwrap();
//! assert_eq!(image.get_pixel(10, 20).unwrap(), [1.0, 0.0, 0.0, 1.0]);
//! assert_eq!(image.count_missing(), 100 * 100 - 1);
//! ```

use crate::color;
use crate::error::{Error, Result};
use crate::rect::Rect;

/// One RGBA pixel, channels in `R, G, B, A` order
pub type Rgba = [f32; 4];

/// Fully transparent black
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];

/// Floating-point RGBA image
///
/// # Memory Layout
///
/// Pixels are stored in row-major order with no padding. The pixel at
/// (x, y) is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<Rgba>,
}

impl RgbaImage {
    /// Create a new image with all pixels fully transparent
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, TRANSPARENT)
    }

    /// Create a new image with every pixel set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: Rgba) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| Error::AllocationFailed)?;
        data.resize(size, value);

        Ok(RgbaImage {
            width,
            height,
            data,
        })
    }

    /// Create an image from raw pixel data in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<Rgba>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(RgbaImage {
            width,
            height,
            data,
        })
    }

    /// Create an image from packed 32-bit `0xRRGGBBAA` pixels
    ///
    /// Each 8-bit channel is scaled to `[0.0, 1.0]`.
    pub fn from_packed(width: u32, height: u32, pixels: &[u32]) -> Result<Self> {
        let data = pixels.iter().map(|&p| color::unpack(p)).collect();
        Self::from_data(width, height, data)
    }

    /// Convert to packed 32-bit `0xRRGGBBAA` pixels
    ///
    /// Channels are clamped to `[0.0, 1.0]` and rounded to 8 bits.
    pub fn to_packed(&self) -> Vec<u32> {
        self.data.iter().map(|p| color::pack(*p)).collect()
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The rectangle covering the whole image
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Whether (x, y) lies inside the image
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Get the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Rgba> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        Ok(self.data[self.index(x, y)])
    }

    /// Set the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: Rgba) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the pixel at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Rgba {
        self.data[self.index(x, y)]
    }

    /// Set the pixel at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: Rgba) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Get raw access to the pixel data
    #[inline]
    pub fn data(&self) -> &[Rgba] {
        &self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgba] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Number of pixels whose alpha is below 1.0
    pub fn count_missing(&self) -> usize {
        self.data.iter().filter(|p| p[3] < 1.0).count()
    }

    /// Check that `other` has the same dimensions as `self`
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` when the sizes differ.
    pub fn check_same_size(&self, other: &RgbaImage) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let image = RgbaImage::new(4, 3).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        assert!(image.data().iter().all(|p| *p == TRANSPARENT));
        assert_eq!(image.count_missing(), 12);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(RgbaImage::new(0, 10).is_err());
        assert!(RgbaImage::new(10, 0).is_err());
    }

    #[test]
    fn test_from_data_length_mismatch() {
        let data = vec![TRANSPARENT; 5];
        assert!(RgbaImage::from_data(2, 2, data).is_err());
    }

    #[test]
    fn test_get_set_pixel() {
        let mut image = RgbaImage::new(5, 5).unwrap();
        image.set_pixel(4, 0, [0.1, 0.2, 0.3, 1.0]).unwrap();
        assert_eq!(image.get_pixel(4, 0).unwrap(), [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(image.row(0)[4], [0.1, 0.2, 0.3, 1.0]);
        assert!(image.get_pixel(5, 0).is_err());
        assert!(image.set_pixel(0, 5, TRANSPARENT).is_err());
    }

    #[test]
    fn test_contains() {
        let image = RgbaImage::new(3, 2).unwrap();
        assert!(image.contains(0, 0));
        assert!(image.contains(2, 1));
        assert!(!image.contains(3, 1));
        assert!(!image.contains(-1, 0));
    }

    #[test]
    fn test_packed_conversion() {
        let packed = [0xff0000ff, 0x00ff0080, 0x0000ff00, 0xffffffff];
        let image = RgbaImage::from_packed(2, 2, &packed).unwrap();
        assert_eq!(image.get_pixel(0, 0).unwrap(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(image.count_missing(), 2);
        assert_eq!(image.to_packed(), packed.to_vec());
    }

    #[test]
    fn test_check_same_size() {
        let a = RgbaImage::new(3, 3).unwrap();
        let b = RgbaImage::new(3, 4).unwrap();
        assert!(a.check_same_size(&a.clone()).is_ok());
        assert!(a.check_same_size(&b).is_err());
    }
}
