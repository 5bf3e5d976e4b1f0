//! Fill and composite stage
//!
//! Three linear passes over the region of interest:
//!
//! 1. Copy the input, turning every pixel with alpha < 1 into a probe and
//!    a placeholder pixel.
//! 2. Run the search driver over the probes.
//! 3. Blend the filled colors back under the original partial alpha.

use crate::driver::SearchDriver;
use crate::options::InpaintOptions;
use crate::probe::{Coord, Probe, ProbeStore};
use crate::progress::{NoProgress, Progress};
use crate::{InpaintError, InpaintResult};
use alphafill_core::{Rect, Rgba, RgbaImage, color};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Pixel written at probe targets before the search
pub const PLACEHOLDER: Rgba = [0.0, 0.0, 1.0, 0.0];

/// Statistics of a fill run
#[derive(Debug, Clone, Default)]
pub struct FillStats {
    /// Probes created from missing pixels
    pub probes_created: usize,
    /// Missing pixels left unfilled because of the probe cap
    pub probes_dropped: usize,
    /// Search rounds executed
    pub rounds: u32,
    /// Whether the progress sink cancelled the search
    pub cancelled: bool,
    /// Final state of every probe in raster order
    pub probes: Vec<Probe>,
}

/// Result of [`inpaint`]
#[derive(Debug, Clone)]
pub struct InpaintOutcome {
    /// The filled image
    pub image: RgbaImage,
    /// What happened during the run
    pub stats: FillStats,
}

/// Fill the transparent pixels of `input` from its own opaque content
///
/// Uses `options.seed` when set, a fresh random seed otherwise.
///
/// # Errors
///
/// Returns [`InpaintError::InvalidParameters`] when the options are out
/// of range, and [`InpaintError::AllocationFailed`] when a working set
/// cannot grow.
pub fn alpha_inpaint(input: &RgbaImage, options: &InpaintOptions) -> InpaintResult<RgbaImage> {
    let seed = options.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = inpaint(input, input, options, &mut rng, &mut NoProgress)?;
    Ok(outcome.image)
}

/// Fill the transparent pixels of `input` with content found in `reference`
///
/// `reference` may differ in size from `input`. Randomness comes only from
/// `rng`, so a seeded generator gives reproducible output. The progress
/// sink can cancel the search; the pixels filled so far are still
/// composited and returned.
///
/// # Errors
///
/// Returns [`InpaintError::InvalidParameters`] when the options are out
/// of range or the region does not lie inside `input`, and
/// [`InpaintError::AllocationFailed`] when a working set cannot grow.
pub fn inpaint<R, P>(
    input: &RgbaImage,
    reference: &RgbaImage,
    options: &InpaintOptions,
    rng: &mut R,
    progress: &mut P,
) -> InpaintResult<InpaintOutcome>
where
    R: Rng + ?Sized,
    P: Progress + ?Sized,
{
    options.validate()?;
    let roi = region_of_interest(input, options)?;

    let mut output = input.clone();
    let mut stats = FillStats::default();
    let store = seed_probes(input, &mut output, roi, options, &mut stats)?;

    if stats.probes_dropped > 0 {
        log::warn!(
            "probe cap of {} reached, {} pixels left unfilled",
            options.max_probes,
            stats.probes_dropped
        );
    }
    log::debug!(
        "fill {}x{} region at ({}, {}): {} probes",
        roi.w,
        roi.h,
        roi.x,
        roi.y,
        stats.probes_created
    );

    let store = if store.is_empty() {
        store
    } else {
        let mut driver = SearchDriver::new(reference, options, store, &mut *rng);
        let summary = driver.run(&mut output, progress)?;
        stats.rounds = summary.rounds;
        stats.cancelled = summary.cancelled;
        driver.into_store()
    };
    stats.probes = store.all();

    composite(input, &mut output, roi, options.tile_size);

    Ok(InpaintOutcome {
        image: output,
        stats,
    })
}

/// Region to fill, checked against the image bounds
fn region_of_interest(input: &RgbaImage, options: &InpaintOptions) -> InpaintResult<Rect> {
    let bounds = input.bounds();
    match options.region {
        None => Ok(bounds),
        Some(region) if bounds.contains_rect(&region) => Ok(region),
        Some(region) => Err(InpaintError::InvalidParameters(format!(
            "region {region:?} is not inside the {}x{} image",
            bounds.w, bounds.h
        ))),
    }
}

/// Pass 1: create probes for missing pixels and write placeholders
fn seed_probes(
    input: &RgbaImage,
    output: &mut RgbaImage,
    roi: Rect,
    options: &InpaintOptions,
    stats: &mut FillStats,
) -> InpaintResult<ProbeStore> {
    let mut store = ProbeStore::new();

    for tile in roi.tiles(options.tile_size, options.tile_size) {
        for (x, y) in tile.points() {
            let pixel = input.get_pixel(x, y)?;
            if pixel[color::ALPHA] >= 1.0 {
                output.set_pixel(x, y, pixel)?;
                continue;
            }
            if stats.probes_created < options.max_probes {
                store.add(Coord::new(x as i32, y as i32));
                stats.probes_created += 1;
            } else {
                stats.probes_dropped += 1;
            }
            output.set_pixel(x, y, PLACEHOLDER)?;
        }
    }

    Ok(store)
}

/// Pass 3: blend filled colors under the original partial alpha
fn composite(input: &RgbaImage, output: &mut RgbaImage, roi: Rect, tile_size: u32) {
    for tile in roi.tiles(tile_size, tile_size) {
        for (x, y) in tile.points() {
            let original = input.get_pixel_unchecked(x, y);
            let a = original[color::ALPHA];
            if a < 1.0 {
                let filled = output.get_pixel_unchecked(x, y);
                output.set_pixel_unchecked(x, y, color::mix_rgb(&original, &filled, a));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_defaults_to_bounds() {
        let input = RgbaImage::new(5, 4).unwrap();
        let roi = region_of_interest(&input, &InpaintOptions::default()).unwrap();
        assert_eq!(roi, Rect::new(0, 0, 5, 4));
    }

    #[test]
    fn test_region_outside_rejected() {
        let input = RgbaImage::new(5, 4).unwrap();
        let options = InpaintOptions::default().with_region(Rect::new(2, 2, 4, 1));
        assert!(matches!(
            region_of_interest(&input, &options),
            Err(InpaintError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_seed_probes_writes_placeholders() {
        let mut input = RgbaImage::new_with_value(4, 4, [0.2, 0.3, 0.4, 1.0]).unwrap();
        input.set_pixel(1, 2, [0.5, 0.5, 0.5, 0.25]).unwrap();
        input.set_pixel(3, 0, [0.0; 4]).unwrap();
        let mut output = input.clone();
        let mut stats = FillStats::default();
        let options = InpaintOptions::default().with_tile_size(3);

        let store =
            seed_probes(&input, &mut output, input.bounds(), &options, &mut stats).unwrap();
        assert_eq!(stats.probes_created, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(output.get_pixel(1, 2).unwrap(), PLACEHOLDER);
        assert_eq!(output.get_pixel(3, 0).unwrap(), PLACEHOLDER);
        assert_eq!(output.get_pixel(0, 0).unwrap(), [0.2, 0.3, 0.4, 1.0]);
    }

    #[test]
    fn test_seed_probes_caps() {
        let input = RgbaImage::new(3, 3).unwrap();
        let mut output = input.clone();
        let mut stats = FillStats::default();
        let options = InpaintOptions::default().with_max_probes(4);

        let store =
            seed_probes(&input, &mut output, input.bounds(), &options, &mut stats).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(stats.probes_dropped, 5);
        // Dropped pixels get the placeholder too
        assert!(output.data().iter().all(|p| *p == PLACEHOLDER));
    }

    #[test]
    fn test_composite_keeps_alpha() {
        let input = RgbaImage::from_data(2, 1, vec![[1.0, 1.0, 1.0, 0.25], [0.0, 0.0, 0.0, 1.0]])
            .unwrap();
        let mut output =
            RgbaImage::from_data(2, 1, vec![[0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0]]).unwrap();
        composite(&input, &mut output, input.bounds(), 128);
        let p = output.get_pixel(0, 0).unwrap();
        assert!((p[0] - 0.25).abs() < 1e-6);
        assert_eq!(p[3], 1.0);
    }
}
