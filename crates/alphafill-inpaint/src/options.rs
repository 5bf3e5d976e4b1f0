//! Inpainting options
//!
//! Every tunable of the search lives in [`InpaintOptions`]. Values are
//! validated against their documented ranges before any work starts.

use crate::{InpaintError, InpaintResult};
use alphafill_core::{Abyss, Interpolation, Rect, Sampler};

// ============================================================================
// Default parameters
// ============================================================================

/// Default maximum seek radius in pixels
pub const DEFAULT_SEEK_DISTANCE: u32 = 9;

/// Default factor the seek radius is multiplied by per iteration
pub const DEFAULT_SEEK_REDUCTION: f32 = 0.9;

/// Default minimum number of search rounds
pub const DEFAULT_MIN_ITER: u32 = 100;

/// Default maximum number of search rounds
pub const DEFAULT_MAX_ITER: u32 = 200;

/// Default random-search iterations per improvement attempt
pub const DEFAULT_ITERATIONS: u32 = 10;

/// Default number of attempts after which a probe retires
pub const DEFAULT_ROUNDS: u32 = 32;

/// Default probability that a probe is attempted in a round
pub const DEFAULT_CHANCE_TRY: f32 = 0.25;

/// Default probability that an already seeded probe is retried
pub const DEFAULT_CHANCE_RETRY: f32 = 0.8;

/// Default exponent of the distance weighting
pub const DEFAULT_METRIC_DIST_POWK: f32 = 2.0;

/// Default penalty for a neighborhood sample with empty hay
pub const DEFAULT_METRIC_EMPTY_HAY_SCORE: f32 = 0.44;

/// Default penalty for a neighborhood sample with an opaque needle
pub const DEFAULT_METRIC_EMPTY_NEEDLE_SCORE: f32 = 0.2;

/// Default weight of the spatial cohesion term
pub const DEFAULT_METRIC_COHESION: f32 = 0.01;

/// Default radii of the sampling circles
pub const DEFAULT_RING_GAPS: [f32; MAX_RING_GAPS] = [1.3, 2.5, 3.7, 5.5];

/// Default number of ring blocks in the topology
pub const DEFAULT_RINGS: u32 = 3;

/// Default number of rays per ring
pub const DEFAULT_RAYS: u32 = 12;

/// Default number of needle scales
pub const DEFAULT_NEEDLE_SCALES: usize = 3;

/// Default cap on the number of probes per run
pub const DEFAULT_MAX_PROBES: usize = 1_000_000;

/// Default byte budget of the hay cache (1 GiB)
pub const DEFAULT_HAY_BUDGET_BYTES: usize = 1024 * 1024 * 1024;

/// Default tile edge for the linear passes
pub const DEFAULT_TILE_SIZE: u32 = 128;

/// Number of configurable ring radii
pub const MAX_RING_GAPS: usize = 4;

/// Scale ladder for needles; the first `needle_scales` entries are used
pub const NEEDLE_SCALE_LADDER: [f32; 7] = [1.0, 0.82, 1.2, 0.66, 1.5, 2.0, 0.5];

// ============================================================================
// Option structure
// ============================================================================

/// Options for alpha inpainting
#[derive(Debug, Clone)]
pub struct InpaintOptions {
    /// Maximum distance searched around the current source per attempt (1-512)
    pub seek_distance: u32,
    /// Factor the seek radius shrinks by each iteration (0.0-1.0, 1.0 = none)
    pub seek_reduction: f32,
    /// Rounds always executed, even once every probe is seeded (1-512)
    pub min_iter: u32,
    /// Hard cap on rounds (1-40000)
    pub max_iter: u32,
    /// Random-search iterations per improvement attempt (1-1000)
    pub iterations: u32,
    /// Attempts after which a probe retires (1-1000)
    pub rounds: u32,
    /// Chance that a probe is attempted in a round (0.0-1.0)
    pub chance_try: f32,
    /// Chance that a seeded probe is retried in a round (0.0-1.0)
    pub chance_retry: f32,
    /// How quickly far away samples lose importance (0.0-10.0)
    pub metric_dist_powk: f32,
    /// Penalty for samples whose hay is empty (0.01-100.0)
    pub metric_empty_hay_score: f32,
    /// Penalty for samples whose needle is opaque (0.01-100.0)
    pub metric_empty_needle_score: f32,
    /// Importance of probes copying from near each other (0.0-100.0)
    pub metric_cohesion: f32,
    /// Incremental twist per circle in turns (0.0-1.0)
    pub ring_twist: f32,
    /// Radius in pixels of each sampling circle, nearest first (0.0-16.0)
    pub ring_gaps: [f32; MAX_RING_GAPS],
    /// Ring blocks in the topology; `rings - 1` of them are sampled (2-5)
    pub rings: u32,
    /// Rays per ring (1-64)
    pub rays: u32,
    /// Number of needle scales taken from [`NEEDLE_SCALE_LADDER`] (1-7)
    pub needle_scales: usize,
    /// Rotate features so the warmest ray comes first
    pub direction_invariant: bool,
    /// Seed the search from the sources of neighboring probes
    pub neighbor_inspiration: bool,
    /// Maximum number of probes; further missing pixels stay unfilled
    pub max_probes: usize,
    /// Byte budget of the hay cache
    pub hay_budget_bytes: usize,
    /// Interpolation used for feature extraction and color fetches
    pub interpolation: Interpolation,
    /// Value sampled outside the image
    pub abyss: Abyss,
    /// Tile edge for the linear passes
    pub tile_size: u32,
    /// Region to fill; `None` fills the whole image
    pub region: Option<Rect>,
    /// Random seed; `None` draws a fresh one per run
    pub seed: Option<u64>,
}

impl Default for InpaintOptions {
    fn default() -> Self {
        Self {
            seek_distance: DEFAULT_SEEK_DISTANCE,
            seek_reduction: DEFAULT_SEEK_REDUCTION,
            min_iter: DEFAULT_MIN_ITER,
            max_iter: DEFAULT_MAX_ITER,
            iterations: DEFAULT_ITERATIONS,
            rounds: DEFAULT_ROUNDS,
            chance_try: DEFAULT_CHANCE_TRY,
            chance_retry: DEFAULT_CHANCE_RETRY,
            metric_dist_powk: DEFAULT_METRIC_DIST_POWK,
            metric_empty_hay_score: DEFAULT_METRIC_EMPTY_HAY_SCORE,
            metric_empty_needle_score: DEFAULT_METRIC_EMPTY_NEEDLE_SCORE,
            metric_cohesion: DEFAULT_METRIC_COHESION,
            ring_twist: 0.0,
            ring_gaps: DEFAULT_RING_GAPS,
            rings: DEFAULT_RINGS,
            rays: DEFAULT_RAYS,
            needle_scales: DEFAULT_NEEDLE_SCALES,
            direction_invariant: true,
            neighbor_inspiration: true,
            max_probes: DEFAULT_MAX_PROBES,
            hay_budget_bytes: DEFAULT_HAY_BUDGET_BYTES,
            interpolation: Interpolation::Bilinear,
            abyss: Abyss::Transparent,
            tile_size: DEFAULT_TILE_SIZE,
            region: None,
            seed: None,
        }
    }
}

impl InpaintOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seek distance
    pub fn with_seek_distance(mut self, distance: u32) -> Self {
        self.seek_distance = distance;
        self
    }

    /// Set the seek reduction factor
    pub fn with_seek_reduction(mut self, reduction: f32) -> Self {
        self.seek_reduction = reduction;
        self
    }

    /// Set the minimum and maximum round counts
    pub fn with_round_limits(mut self, min_iter: u32, max_iter: u32) -> Self {
        self.min_iter = min_iter;
        self.max_iter = max_iter;
        self
    }

    /// Set the random-search iterations per attempt
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the number of attempts after which a probe retires
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the try and retry probabilities
    pub fn with_chances(mut self, chance_try: f32, chance_retry: f32) -> Self {
        self.chance_try = chance_try;
        self.chance_retry = chance_retry;
        self
    }

    /// Set the cohesion weight
    pub fn with_cohesion(mut self, cohesion: f32) -> Self {
        self.metric_cohesion = cohesion;
        self
    }

    /// Set the ring layout
    pub fn with_rings(mut self, rings: u32, rays: u32) -> Self {
        self.rings = rings;
        self.rays = rays;
        self
    }

    /// Set the ring radii
    pub fn with_ring_gaps(mut self, gaps: [f32; MAX_RING_GAPS]) -> Self {
        self.ring_gaps = gaps;
        self
    }

    /// Set the incremental ring twist
    pub fn with_ring_twist(mut self, twist: f32) -> Self {
        self.ring_twist = twist;
        self
    }

    /// Set the number of needle scales
    pub fn with_needle_scales(mut self, scales: usize) -> Self {
        self.needle_scales = scales;
        self
    }

    /// Set the probe cap
    pub fn with_max_probes(mut self, max_probes: usize) -> Self {
        self.max_probes = max_probes;
        self
    }

    /// Set the hay cache byte budget
    pub fn with_hay_budget(mut self, bytes: usize) -> Self {
        self.hay_budget_bytes = bytes;
        self
    }

    /// Set the sampler configuration
    pub fn with_sampler(mut self, interpolation: Interpolation, abyss: Abyss) -> Self {
        self.interpolation = interpolation;
        self.abyss = abyss;
        self
    }

    /// Set the tile size of the linear passes
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Restrict filling to a region
    pub fn with_region(mut self, region: Rect) -> Self {
        self.region = Some(region);
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sampler built from the interpolation and abyss settings
    pub fn sampler(&self) -> Sampler {
        Sampler::new(self.interpolation, self.abyss)
    }

    /// Scales of the needles in extraction order
    pub fn scales(&self) -> &[f32] {
        &NEEDLE_SCALE_LADDER[..self.needle_scales.min(NEEDLE_SCALE_LADDER.len())]
    }

    /// Validate options
    pub fn validate(&self) -> InpaintResult<()> {
        check_range("seek_distance", self.seek_distance, 1, 512)?;
        check_range("seek_reduction", self.seek_reduction, 0.0, 1.0)?;
        check_range("min_iter", self.min_iter, 1, 512)?;
        check_range("max_iter", self.max_iter, 1, 40000)?;
        check_range("iterations", self.iterations, 1, 1000)?;
        check_range("rounds", self.rounds, 1, 1000)?;
        check_range("chance_try", self.chance_try, 0.0, 1.0)?;
        check_range("chance_retry", self.chance_retry, 0.0, 1.0)?;
        check_range("metric_dist_powk", self.metric_dist_powk, 0.0, 10.0)?;
        check_range(
            "metric_empty_hay_score",
            self.metric_empty_hay_score,
            0.01,
            100.0,
        )?;
        check_range(
            "metric_empty_needle_score",
            self.metric_empty_needle_score,
            0.01,
            100.0,
        )?;
        check_range("metric_cohesion", self.metric_cohesion, 0.0, 100.0)?;
        check_range("ring_twist", self.ring_twist, 0.0, 1.0)?;
        for gap in &self.ring_gaps {
            check_range("ring_gaps", *gap, 0.0, 16.0)?;
        }
        check_range("rings", self.rings, 2, MAX_RING_GAPS as u32 + 1)?;
        check_range("rays", self.rays, 1, 64)?;
        check_range("needle_scales", self.needle_scales, 1, NEEDLE_SCALE_LADDER.len())?;
        if self.max_probes == 0 {
            return Err(InpaintError::InvalidParameters(
                "max_probes must be positive".to_string(),
            ));
        }
        if self.hay_budget_bytes == 0 {
            return Err(InpaintError::InvalidParameters(
                "hay_budget_bytes must be positive".to_string(),
            ));
        }
        if self.tile_size == 0 {
            return Err(InpaintError::InvalidParameters(
                "tile_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_range<T>(name: &str, value: T, min: T, max: T) -> InpaintResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    // Written so that NaN fails
    if !(value >= min && value <= max) {
        return Err(InpaintError::InvalidParameters(format!(
            "{name} must be in [{min}, {max}], got {value}"
        )));
    }
    Ok(())
}
