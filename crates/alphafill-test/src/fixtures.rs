//! Synthetic fixture images
//!
//! Small procedurally generated images for regression tests. All
//! generators produce fully opaque images; [`punch_hole`] and
//! [`set_alpha`] introduce missing regions.

use crate::error::{TestError, TestResult};
use alphafill_core::{Rect, Rgba, RgbaImage};

/// Opaque red
pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
/// Opaque green
pub const GREEN: Rgba = [0.0, 1.0, 0.0, 1.0];
/// Opaque blue
pub const BLUE: Rgba = [0.0, 0.0, 1.0, 1.0];
/// Opaque white
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
/// Opaque black
pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Uniform image
pub fn solid(width: u32, height: u32, color: Rgba) -> TestResult<RgbaImage> {
    Ok(RgbaImage::new_with_value(width, height, color)?)
}

/// Checkerboard of `cell` x `cell` squares alternating `a` and `b`
pub fn checkerboard(width: u32, height: u32, cell: u32, a: Rgba, b: Rgba) -> TestResult<RgbaImage> {
    if cell == 0 {
        return Err(TestError::Fixture {
            name: "checkerboard".to_string(),
            message: "cell size must be positive".to_string(),
        });
    }
    let mut image = RgbaImage::new(width, height)?;
    for (x, y) in image.bounds().points() {
        let even = ((x / cell) + (y / cell)) % 2 == 0;
        image.set_pixel_unchecked(x, y, if even { a } else { b });
    }
    Ok(image)
}

/// Vertical stripes of width `period / 2` alternating `a` and `b`
pub fn stripes(width: u32, height: u32, period: u32, a: Rgba, b: Rgba) -> TestResult<RgbaImage> {
    if period < 2 {
        return Err(TestError::Fixture {
            name: "stripes".to_string(),
            message: "period must be at least 2".to_string(),
        });
    }
    let mut image = RgbaImage::new(width, height)?;
    for (x, y) in image.bounds().points() {
        let first = (x % period) < period / 2;
        image.set_pixel_unchecked(x, y, if first { a } else { b });
    }
    Ok(image)
}

/// Horizontal gray ramp from black at the left to white at the right
pub fn gradient(width: u32, height: u32) -> TestResult<RgbaImage> {
    let mut image = RgbaImage::new(width, height)?;
    let span = (width.max(2) - 1) as f32;
    for (x, y) in image.bounds().points() {
        let v = x as f32 / span;
        image.set_pixel_unchecked(x, y, [v, v, v, 1.0]);
    }
    Ok(image)
}

/// Copy of `image` with every pixel of `hole` made fully transparent
///
/// The color of the hole is kept so that compositing against the
/// original color can be observed.
pub fn punch_hole(image: &RgbaImage, hole: Rect) -> TestResult<RgbaImage> {
    set_alpha(image, hole, 0.0)
}

/// Copy of `image` with the alpha of every pixel in `area` set to `alpha`
pub fn set_alpha(image: &RgbaImage, area: Rect, alpha: f32) -> TestResult<RgbaImage> {
    if !image.bounds().contains_rect(&area) {
        return Err(TestError::Fixture {
            name: "set_alpha".to_string(),
            message: format!("{:?} does not fit in {:?}", area, image.dimensions()),
        });
    }
    let mut out = image.clone();
    for (x, y) in area.points() {
        let mut p = out.get_pixel_unchecked(x, y);
        p[3] = alpha;
        out.set_pixel_unchecked(x, y, p);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_cells() {
        let image = checkerboard(4, 4, 2, WHITE, BLACK).unwrap();
        assert_eq!(image.get_pixel(0, 0).unwrap(), WHITE);
        assert_eq!(image.get_pixel(2, 0).unwrap(), BLACK);
        assert_eq!(image.get_pixel(2, 2).unwrap(), WHITE);
        assert_eq!(image.count_missing(), 0);
    }

    #[test]
    fn test_stripes() {
        let image = stripes(4, 1, 2, RED, BLUE).unwrap();
        assert_eq!(image.row(0), &[RED, BLUE, RED, BLUE]);
        assert!(stripes(4, 1, 1, RED, BLUE).is_err());
    }

    #[test]
    fn test_gradient_endpoints() {
        let image = gradient(5, 1).unwrap();
        assert_eq!(image.get_pixel(0, 0).unwrap(), BLACK);
        assert_eq!(image.get_pixel(4, 0).unwrap(), WHITE);
    }

    #[test]
    fn test_punch_hole() {
        let image = solid(4, 4, RED).unwrap();
        let holed = punch_hole(&image, Rect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(holed.count_missing(), 4);
        assert_eq!(holed.get_pixel(1, 1).unwrap(), [1.0, 0.0, 0.0, 0.0]);
        assert!(punch_hole(&image, Rect::new(3, 3, 2, 2)).is_err());
    }
}
