//! Search driver
//!
//! Runs the randomized refinement rounds over every active probe. Each
//! attempt first tries candidates around the sources of neighboring
//! probes, then a shrinking random search around the probe's own source.
//! Improvements are written to the output immediately, so probes visited
//! later in the same round already see them in their needles.
//!
//! # Probe lifecycle
//!
//! ```text
//!   new (INITIAL_SCORE) --accept--> seeded --attempts--> retired
//!                  \__________________ age == rounds ______/
//! ```

use crate::hay::HayCache;
use crate::options::InpaintOptions;
use crate::probe::{Coord, NEIGHBOR_OFFSETS, Neighbors, Probe, ProbeStore};
use crate::progress::Progress;
use crate::score::{self, Metric};
use crate::site::{FeatureExtractor, Site};
use crate::topology::Topology;
use crate::InpaintResult;
use alphafill_core::{RgbaImage, Sampler, color};
use rand::Rng;

/// Probe count above which the start message warns about run time
const LARGE_RUN_PROBES: usize = 10_000;

/// Number of neighbor offsets tested around an inspiring source
const INSPIRATION_RING: usize = 8;

/// Lower bound of the seek radius before it snaps to 2
const MIN_SEEK_MAGNITUDE: f32 = 3.0;

/// Outcome of a driver run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Rounds executed
    pub rounds: u32,
    /// Whether the progress sink stopped the run
    pub cancelled: bool,
}

/// Drives the probe refinement rounds
///
/// Owns the probe store, the hay cache and the random source for the
/// duration of a run.
pub struct SearchDriver<'a, R: Rng> {
    options: &'a InpaintOptions,
    reference: &'a RgbaImage,
    extractor: FeatureExtractor,
    color_sampler: Sampler,
    metric: Metric,
    hay: HayCache<'a>,
    store: ProbeStore,
    rng: R,
    rounds: u32,
}

impl<'a, R: Rng> SearchDriver<'a, R> {
    /// Create a driver searching `reference` with `store` as the probe set
    pub fn new(
        reference: &'a RgbaImage,
        options: &'a InpaintOptions,
        store: ProbeStore,
        rng: R,
    ) -> Self {
        let topology = Topology::from_options(options);
        let slots = topology.len();
        let sampler = options.sampler();
        Self {
            options,
            reference,
            extractor: FeatureExtractor::new(topology, sampler, options.direction_invariant),
            color_sampler: sampler,
            metric: Metric {
                empty_hay: options.metric_empty_hay_score,
                empty_needle: options.metric_empty_needle_score,
                cohesion: options.metric_cohesion,
            },
            hay: HayCache::new(reference, slots, options.hay_budget_bytes),
            store,
            rng,
            rounds: 0,
        }
    }

    /// The probe store
    pub fn store(&self) -> &ProbeStore {
        &self.store
    }

    /// The hay cache
    pub fn hay(&self) -> &HayCache<'a> {
        &self.hay
    }

    /// Rounds executed so far
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Consume the driver, returning the probe store
    pub fn into_store(self) -> ProbeStore {
        self.store
    }

    /// Run rounds until every probe is seeded and `min_iter` rounds are
    /// done, or `max_iter` rounds are reached
    ///
    /// `output` holds the needles: it must contain the placeholder pixels
    /// of every probe target.
    pub fn run<P: Progress + ?Sized>(
        &mut self,
        output: &mut RgbaImage,
        progress: &mut P,
    ) -> InpaintResult<RunSummary> {
        let initial = self.store.len();
        let message = if initial > LARGE_RUN_PROBES {
            "this may take some time"
        } else {
            "pixel duster"
        };
        let mut cancelled = !progress.report(0.0, message);

        log::debug!(
            "search start: {} probes, {} slots, {} scales",
            initial,
            self.extractor.topology().len(),
            self.options.scales().len()
        );

        let mut missing = 1;
        while !cancelled
            && (missing > 0 || self.rounds < self.options.min_iter)
            && self.rounds < self.options.max_iter
        {
            let active = self.store.len();
            missing = self.run_round(output)?;

            let fraction = if initial == 0 {
                1.0
            } else {
                (initial - active) as f32 / initial as f32
            };
            log::trace!(
                "round {}: {} active, {} missing",
                self.rounds,
                active,
                missing
            );
            cancelled = !progress.report(fraction, "finding suitable pixels");
        }

        if !cancelled {
            progress.report(1.0, "done");
        }

        log::debug!(
            "search end: {} rounds, {} active, {} retired, {} hay entries{}",
            self.rounds,
            self.store.len(),
            self.store.retired_len(),
            self.hay.len(),
            if cancelled { ", cancelled" } else { "" }
        );

        Ok(RunSummary {
            rounds: self.rounds,
            cancelled,
        })
    }

    /// Execute one round over a raster-ordered snapshot of active probes
    ///
    /// Returns the number of probes that had no source when visited.
    pub fn run_round(&mut self, output: &mut RgbaImage) -> InpaintResult<usize> {
        self.rounds += 1;
        let mut missing = 0;

        for target in self.store.active_targets() {
            let Some(probe) = self.store.get(target).copied() else {
                continue;
            };

            let attempt = if probe.is_seeded() {
                self.chance(self.options.chance_retry) && self.chance(self.options.chance_try)
            } else {
                missing += 1;
                true
            };

            if attempt {
                self.improve(output, probe)?;
                self.hay.trim(&mut self.rng);
            }
        }

        Ok(missing)
    }

    /// Percent-quantized coin flip
    fn chance(&mut self, p: f32) -> bool {
        (self.rng.random_range(0..100) as f64 / 100.0) < p as f64
    }

    /// One improvement attempt for `probe`
    fn improve(&mut self, output: &mut RgbaImage, mut probe: Probe) -> InpaintResult<()> {
        let old_score = probe.score;
        let needles: Vec<Site> = self
            .options
            .scales()
            .iter()
            .map(|&scale| {
                self.extractor
                    .extract(output, probe.target.x as f32, probe.target.y as f32, scale)
            })
            .collect();
        let neighbors = self.store.neighbors(probe.target);

        if self.options.neighbor_inspiration {
            for source in neighbors.inspiration() {
                for &(dx, dy) in &NEIGHBOR_OFFSETS[..INSPIRATION_RING] {
                    self.consider(&mut probe, &needles, &neighbors, source.offset(dx, dy))?;
                }
            }
        }

        let start = probe.source;
        let mut mag = self.options.seek_distance as f32;
        for _ in 0..self.options.iterations {
            let r = mag as i32;
            let dx = self.rng.random_range(-r..r);
            let dy = self.rng.random_range(-r..r);
            mag *= self.options.seek_reduction;
            if mag < MIN_SEEK_MAGNITUDE {
                mag = 2.0;
            }
            if dx == 0 && dy == 0 {
                continue;
            }
            self.consider(&mut probe, &needles, &neighbors, start.offset(dx, dy))?;
        }

        probe.age += 1;

        if probe.score != old_score {
            let mut rgba = self.color_sampler.sample(
                self.reference,
                probe.source.x as f32,
                probe.source.y as f32,
            );
            rgba[color::ALPHA] = 1.0;
            output.set_pixel(probe.target.x as u32, probe.target.y as u32, rgba)?;
        }

        self.store.update(probe, self.options.rounds);
        Ok(())
    }

    /// Score `candidate` and take it when it is not worse than the current
    /// source
    fn consider(
        &mut self,
        probe: &mut Probe,
        needles: &[Site],
        neighbors: &Neighbors,
        candidate: Coord,
    ) -> InpaintResult<()> {
        let cohesion = score::cohesion(candidate, neighbors, self.metric.cohesion);
        let hay = self.hay.get(&self.extractor, candidate.x, candidate.y)?;
        let score = score::probe_score(
            self.extractor.topology(),
            &self.metric,
            needles,
            hay,
            cohesion,
            probe.score,
        );
        // An unseeded probe also follows rejected candidates
        if score <= probe.score {
            probe.source = candidate;
            probe.score = score;
        }
        Ok(())
    }
}
