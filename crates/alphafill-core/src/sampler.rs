//! Point sampling at fractional coordinates
//!
//! Pixel centers sit on integer coordinates, so sampling at `(x, y)` with
//! integral `x` and `y` returns exactly the stored pixel for every
//! interpolation kind. Between pixels, colors are interpolated with
//! alpha weighting (premultiplied accumulation) so that transparent
//! neighbors do not darken the result.
//!
//! Coordinates outside the image are resolved through an [`Abyss`]
//! policy and always yield a defined value.
//!
//! # Example
//!
//! ```
//! use alphafill_core::{Abyss, Interpolation, RgbaImage, Sampler};
//!
//! let image = RgbaImage::new_with_value(4, 4, [1.0, 0.0, 0.0, 1.0]).unwrap();
//! let sampler = Sampler::new(Interpolation::Bilinear, Abyss::Transparent);
//! assert_eq!(sampler.sample(&image, 1.0, 2.0), [1.0, 0.0, 0.0, 1.0]);
//! assert_eq!(sampler.sample(&image, -5.0, 0.0)[3], 0.0);
//! ```

use crate::image::{Rgba, RgbaImage, TRANSPARENT};

/// Alpha below which an accumulated sample is treated as empty
const ALPHA_EPSILON: f32 = 1e-6;

/// Interpolation kind used by [`Sampler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest pixel
    Nearest,
    /// Bilinear over the 2x2 neighborhood
    #[default]
    Bilinear,
    /// Catmull-Rom cubic over the 4x4 neighborhood
    Cubic,
}

/// Value produced for coordinates outside the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Abyss {
    /// Fully transparent black
    #[default]
    Transparent,
    /// Replicate the nearest edge pixel
    Clamp,
}

/// Interpolating point sampler over an [`RgbaImage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sampler {
    /// Interpolation kind
    pub interpolation: Interpolation,
    /// Out-of-range policy
    pub abyss: Abyss,
}

impl Sampler {
    /// Create a sampler
    pub fn new(interpolation: Interpolation, abyss: Abyss) -> Self {
        Self {
            interpolation,
            abyss,
        }
    }

    /// Fetch the pixel at integer coordinates, applying the abyss policy
    #[inline]
    pub fn pixel(&self, image: &RgbaImage, x: i32, y: i32) -> Rgba {
        if image.contains(x, y) {
            return image.get_pixel_unchecked(x as u32, y as u32);
        }
        match self.abyss {
            Abyss::Transparent => TRANSPARENT,
            Abyss::Clamp => {
                let cx = x.clamp(0, image.width() as i32 - 1) as u32;
                let cy = y.clamp(0, image.height() as i32 - 1) as u32;
                image.get_pixel_unchecked(cx, cy)
            }
        }
    }

    /// Sample `image` at the fractional position (x, y)
    pub fn sample(&self, image: &RgbaImage, x: f32, y: f32) -> Rgba {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (ix, iy) = (x0 as i32, y0 as i32);

        if fx == 0.0 && fy == 0.0 {
            return self.pixel(image, ix, iy);
        }

        match self.interpolation {
            Interpolation::Nearest => {
                let nx = (x + 0.5).floor() as i32;
                let ny = (y + 0.5).floor() as i32;
                self.pixel(image, nx, ny)
            }
            Interpolation::Bilinear => {
                let mut acc = Accumulator::default();
                acc.add(self.pixel(image, ix, iy), (1.0 - fx) * (1.0 - fy));
                acc.add(self.pixel(image, ix + 1, iy), fx * (1.0 - fy));
                acc.add(self.pixel(image, ix, iy + 1), (1.0 - fx) * fy);
                acc.add(self.pixel(image, ix + 1, iy + 1), fx * fy);
                acc.finish()
            }
            Interpolation::Cubic => {
                let wx = catmull_rom_weights(fx);
                let wy = catmull_rom_weights(fy);
                let mut acc = Accumulator::default();
                for (j, wyj) in wy.iter().enumerate() {
                    for (i, wxi) in wx.iter().enumerate() {
                        let p = self.pixel(image, ix + i as i32 - 1, iy + j as i32 - 1);
                        acc.add(p, wxi * wyj);
                    }
                }
                acc.finish()
            }
        }
    }
}

/// Premultiplied accumulation of weighted samples
#[derive(Default)]
struct Accumulator {
    rgb: [f32; 3],
    alpha: f32,
}

impl Accumulator {
    #[inline]
    fn add(&mut self, p: Rgba, weight: f32) {
        let wa = weight * p[3];
        for c in 0..3 {
            self.rgb[c] += wa * p[c];
        }
        self.alpha += wa;
    }

    fn finish(self) -> Rgba {
        let alpha = self.alpha.clamp(0.0, 1.0);
        if self.alpha <= ALPHA_EPSILON {
            return TRANSPARENT;
        }
        [
            self.rgb[0] / self.alpha,
            self.rgb[1] / self.alpha,
            self.rgb[2] / self.alpha,
            alpha,
        ]
    }
}

/// Catmull-Rom weights for the taps at offsets -1, 0, 1, 2
fn catmull_rom_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone() -> RgbaImage {
        // Left column black, right column white, both opaque
        let data = vec![
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
        ];
        RgbaImage::from_data(2, 2, data).unwrap()
    }

    #[test]
    fn test_integer_coordinates_are_exact() {
        let image = two_tone();
        for interpolation in [
            Interpolation::Nearest,
            Interpolation::Bilinear,
            Interpolation::Cubic,
        ] {
            let sampler = Sampler::new(interpolation, Abyss::Clamp);
            assert_eq!(sampler.sample(&image, 1.0, 0.0), [1.0, 1.0, 1.0, 1.0]);
            assert_eq!(sampler.sample(&image, 0.0, 1.0), [0.0, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_bilinear_midpoint() {
        let image = two_tone();
        let sampler = Sampler::new(Interpolation::Bilinear, Abyss::Clamp);
        let p = sampler.sample(&image, 0.5, 0.0);
        assert!((p[0] - 0.5).abs() < 1e-6);
        assert!((p[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_rounds() {
        let image = two_tone();
        let sampler = Sampler::new(Interpolation::Nearest, Abyss::Clamp);
        assert_eq!(sampler.sample(&image, 0.4, 0.0)[0], 0.0);
        assert_eq!(sampler.sample(&image, 0.6, 0.0)[0], 1.0);
    }

    #[test]
    fn test_abyss_transparent() {
        let image = two_tone();
        let sampler = Sampler::new(Interpolation::Bilinear, Abyss::Transparent);
        assert_eq!(sampler.sample(&image, -3.0, -3.0), TRANSPARENT);
        // Half way off the right edge: color kept, alpha halved
        let p = sampler.sample(&image, 1.5, 0.0);
        assert!((p[0] - 1.0).abs() < 1e-6);
        assert!((p[3] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_abyss_clamp() {
        let image = two_tone();
        let sampler = Sampler::new(Interpolation::Bilinear, Abyss::Clamp);
        assert_eq!(sampler.sample(&image, 10.0, -4.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(sampler.sample(&image, -10.0, 7.0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_catmull_rom_weights_partition_unity() {
        for t in [0.0, 0.25, 0.5, 0.9] {
            let sum: f32 = catmull_rom_weights(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cubic_flat_region() {
        let image = RgbaImage::new_with_value(6, 6, [0.2, 0.4, 0.6, 1.0]).unwrap();
        let sampler = Sampler::new(Interpolation::Cubic, Abyss::Clamp);
        let p = sampler.sample(&image, 2.3, 3.7);
        for c in 0..4 {
            assert!((p[c] - image.get_pixel_unchecked(0, 0)[c]).abs() < 1e-5);
        }
    }
}
