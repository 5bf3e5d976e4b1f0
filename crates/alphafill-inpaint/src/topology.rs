//! Neighborhood topology
//!
//! The sampling pattern around a pixel is a set of rays radiating from
//! the center, crossing concentric circles. Slot 0 is the center itself;
//! the remaining slots are grouped in `rings` blocks of `rays` samples.
//! Blocks `0..rings-1` sit on circles of increasing radius, the last
//! block is padding at the center with zero weight.
//!
//! ```text
//!   slot 0          center
//!   slots 1..=R     circle 1 (radius ring_gaps[0])
//!   slots R+1..=2R  circle 2 (radius ring_gaps[1])
//!   ...
//!   last R slots    padding, weight 0
//! ```
//!
//! Each slot carries a weight `(1 / d²)^powk` that makes far away samples
//! matter less.

use crate::InpaintOptions;
use std::f32::consts::TAU;

/// One sampling offset relative to the center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    /// Horizontal offset in pixels at scale 1.0
    pub dx: f32,
    /// Vertical offset in pixels at scale 1.0
    pub dy: f32,
    /// Importance of this slot in scoring
    pub weight: f32,
}

/// Fixed ring/ray sampling pattern with per-slot weights
#[derive(Debug, Clone)]
pub struct Topology {
    rings: usize,
    rays: usize,
    offsets: Vec<Offset>,
}

impl Topology {
    /// Build the topology for `rings` blocks of `rays` samples
    ///
    /// `ring_gaps[c - 1]` is the radius of circle `c`; circle `c` is
    /// twisted by `ring_twist * c` turns.
    pub fn new(rings: usize, rays: usize, ring_gaps: &[f32], ring_twist: f32, powk: f32) -> Self {
        let mut offsets = Vec::with_capacity(1 + rings * rays);
        offsets.push(Offset {
            dx: 0.0,
            dy: 0.0,
            weight: 1.0,
        });

        for circle in 1..rings {
            let mag = ring_gaps.get(circle - 1).copied().unwrap_or(0.0);
            for ray in 0..rays {
                let turn = ray as f32 / rays as f32 + ring_twist * circle as f32;
                let dx = (turn * TAU).cos() * mag;
                let dy = (turn * TAU).sin() * mag;
                let dist_sq = dx * dx + dy * dy;
                let weight = if dist_sq > 0.0 {
                    (1.0 / dist_sq).powf(powk)
                } else {
                    0.0
                };
                offsets.push(Offset { dx, dy, weight });
            }
        }

        offsets.resize(
            1 + rings * rays,
            Offset {
                dx: 0.0,
                dy: 0.0,
                weight: 0.0,
            },
        );

        Self {
            rings,
            rays,
            offsets,
        }
    }

    /// Build the topology described by `options`
    pub fn from_options(options: &InpaintOptions) -> Self {
        Self::new(
            options.rings as usize,
            options.rays as usize,
            &options.ring_gaps,
            options.ring_twist,
            options.metric_dist_powk,
        )
    }

    /// Number of slots, `1 + rings * rays`
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the topology has no slots (never true for a built topology)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Number of ring blocks
    #[inline]
    pub fn rings(&self) -> usize {
        self.rings
    }

    /// Number of sampled circles, `rings - 1`
    #[inline]
    pub fn circles(&self) -> usize {
        self.rings.saturating_sub(1)
    }

    /// Number of rays per ring
    #[inline]
    pub fn rays(&self) -> usize {
        self.rays
    }

    /// All offsets in slot order
    #[inline]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Weight of slot `i`
    #[inline]
    pub fn weight(&self, i: usize) -> f32 {
        self.offsets[i].weight
    }

    /// Slot index of `ray` on block `block`
    #[inline]
    pub fn slot(&self, block: usize, ray: usize) -> usize {
        1 + block * self.rays + ray
    }
}
