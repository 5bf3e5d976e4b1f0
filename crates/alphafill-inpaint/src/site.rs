//! Feature extraction
//!
//! A [`Site`] is one RGBA sample per topology slot taken around a point.
//! With direction invariance enabled, the ray with the highest average
//! color energy is rotated to ray index 0 on every block, so two
//! neighborhoods that differ only by orientation compare as similar.

use crate::topology::Topology;
use alphafill_core::{Rgba, RgbaImage, Sampler, color};

/// Alpha above which a circle sample contributes to ray energy
const ENERGY_ALPHA_THRESHOLD: f32 = 0.01;

/// Feature vector: one sample per topology slot
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    samples: Vec<Rgba>,
}

impl Site {
    /// Wrap raw samples
    pub fn from_samples(samples: Vec<Rgba>) -> Self {
        Self { samples }
    }

    /// All samples in slot order
    #[inline]
    pub fn samples(&self) -> &[Rgba] {
        &self.samples
    }

    /// Sample at slot `i`
    #[inline]
    pub fn sample(&self, i: usize) -> &Rgba {
        &self.samples[i]
    }

    /// Alpha of the center sample
    #[inline]
    pub fn center_alpha(&self) -> f32 {
        self.samples[0][color::ALPHA]
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the site holds no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Approximate heap size of one site for `slots` slots
    pub fn byte_size(slots: usize) -> usize {
        slots * std::mem::size_of::<Rgba>()
    }
}

/// Samples sites from images through a fixed topology and sampler
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    topology: Topology,
    sampler: Sampler,
    direction_invariant: bool,
}

impl FeatureExtractor {
    /// Create an extractor
    pub fn new(topology: Topology, sampler: Sampler, direction_invariant: bool) -> Self {
        Self {
            topology,
            sampler,
            direction_invariant,
        }
    }

    /// The sampling topology
    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The point sampler
    #[inline]
    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Extract the site around (x, y) of `image` at `scale`
    ///
    /// Pure function of the image contents at call time.
    pub fn extract(&self, image: &RgbaImage, x: f32, y: f32, scale: f32) -> Site {
        let samples = self
            .topology
            .offsets()
            .iter()
            .map(|o| self.sampler.sample(image, x + o.dx * scale, y + o.dy * scale))
            .collect();
        let mut site = Site::from_samples(samples);
        if self.direction_invariant {
            self.normalize_direction(&mut site);
        }
        site
    }

    /// Rotate every block so that the warmest ray becomes ray 0
    fn normalize_direction(&self, site: &mut Site) {
        let warmest = warmest_ray(&self.topology, site);
        if warmest == 0 {
            return;
        }

        let rays = self.topology.rays();
        for block in 0..self.topology.rings() {
            let start = self.topology.slot(block, 0);
            site.samples[start..start + rays].rotate_left(warmest);
        }
    }
}

/// Ray with the highest average color energy over the sampled circles
///
/// Circles whose sample is (nearly) transparent do not count. Ties keep
/// the lower index, and a ray must beat zero energy to be chosen.
fn warmest_ray(topology: &Topology, site: &Site) -> usize {
    let mut warmest = 0;
    let mut warmest_energy = 0.0f32;

    for ray in 0..topology.rays() {
        let mut energy = 0.0f32;
        let mut count = 0;
        for circle in 0..topology.circles() {
            let p = site.sample(topology.slot(circle, ray));
            if p[color::ALPHA] > ENERGY_ALPHA_THRESHOLD {
                energy += color::energy(p);
                count += 1;
            }
        }
        if count > 0 {
            energy /= count as f32;
        }
        if energy > warmest_energy {
            warmest = ray;
            warmest_energy = energy;
        }
    }

    warmest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InpaintOptions;
    use alphafill_core::{Abyss, Interpolation};

    fn extractor(direction_invariant: bool) -> FeatureExtractor {
        let options = InpaintOptions::default();
        FeatureExtractor::new(
            Topology::from_options(&options),
            Sampler::new(Interpolation::Bilinear, Abyss::Transparent),
            direction_invariant,
        )
    }

    /// Black image with a bright horizontal bar to the right of (8, 8)
    fn bar_right() -> RgbaImage {
        let mut image = RgbaImage::new_with_value(17, 17, [0.0, 0.0, 0.0, 1.0]).unwrap();
        for x in 9..17 {
            image.set_pixel(x, 8, [1.0, 1.0, 1.0, 1.0]).unwrap();
        }
        image
    }

    /// Same bar, pointing up from (8, 8)
    fn bar_up() -> RgbaImage {
        let mut image = RgbaImage::new_with_value(17, 17, [0.0, 0.0, 0.0, 1.0]).unwrap();
        for y in 0..8 {
            image.set_pixel(8, y, [1.0, 1.0, 1.0, 1.0]).unwrap();
        }
        image
    }

    #[test]
    fn test_site_length_matches_topology() {
        let ex = extractor(true);
        let site = ex.extract(&bar_right(), 8.0, 8.0, 1.0);
        assert_eq!(site.len(), ex.topology().len());
        assert_eq!(site.center_alpha(), 1.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let ex = extractor(true);
        let image = bar_up();
        let a = ex.extract(&image, 8.0, 8.0, 1.0);
        let b = ex.extract(&image, 8.0, 8.0, 1.0);
        assert_eq!(a, b);
        let c = ex.extract(&image, 8.0, 8.0, 0.82);
        let d = ex.extract(&image, 8.0, 8.0, 0.82);
        assert_eq!(c, d);
    }

    #[test]
    fn test_warmest_ray_moves_to_front() {
        let ex = extractor(true);
        let site = ex.extract(&bar_up(), 8.0, 8.0, 1.0);
        let topology = ex.topology();
        let first = site.sample(topology.slot(1, 0));
        assert!(color::energy(first) > 2.9);
    }

    #[test]
    fn test_rotated_neighborhoods_match() {
        let ex = extractor(true);
        let a = ex.extract(&bar_right(), 8.0, 8.0, 1.0);
        let b = ex.extract(&bar_up(), 8.0, 8.0, 1.0);
        let topology = ex.topology();
        // Rays on the outer circle agree after normalization
        for ray in 0..topology.rays() {
            let slot = topology.slot(1, ray);
            assert!(color::rgb_distance_sq(a.sample(slot), b.sample(slot)) < 1e-4);
        }
    }

    #[test]
    fn test_without_direction_invariance_order_is_kept() {
        let ex = extractor(false);
        let site = ex.extract(&bar_up(), 8.0, 8.0, 1.0);
        let topology = ex.topology();
        // Ray 0 points right, into the dark
        assert!(color::energy(site.sample(topology.slot(1, 0))) < 1e-4);
    }

    #[test]
    fn test_uniform_site_not_rotated() {
        let image = RgbaImage::new_with_value(9, 9, [0.5, 0.5, 0.5, 1.0]).unwrap();
        let topology = extractor(true).topology().clone();
        let site = extractor(false).extract(&image, 4.0, 4.0, 1.0);
        assert_eq!(warmest_ray(&topology, &site), 0);
    }
}
