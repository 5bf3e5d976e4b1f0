//! Candidate scoring
//!
//! A candidate source is scored by comparing the needle (the site around
//! the target in the output being filled) with the hay (the site around
//! the candidate in the reference). Lower is better.

use crate::probe::{Coord, INITIAL_SCORE, Neighbors};
use crate::site::Site;
use crate::topology::Topology;
use alphafill_core::color;

/// Hay center alpha below which a candidate is rejected outright
const HAY_CENTER_MIN_ALPHA: f32 = 0.5;

/// Hay center alpha below which a site is treated as empty
const HAY_EMPTY_ALPHA: f32 = 0.001;

/// Penalty weights applied while comparing sites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    /// Penalty for a sample whose hay is empty
    pub empty_hay: f32,
    /// Penalty for a sample whose needle is already opaque
    pub empty_needle: f32,
    /// Weight of the cohesion term
    pub cohesion: f32,
}

/// Cohesion term for a candidate at `candidate`
///
/// Squared distance from the candidate to the mean source of the seeded
/// 4-connected neighbors, scaled by `cohesion / 1000`. Zero when no such
/// neighbor exists.
pub fn cohesion(candidate: Coord, neighbors: &Neighbors, cohesion: f32) -> f32 {
    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    let mut count = 0;
    for source in neighbors.axis_aligned() {
        sum_x += source.x as f32;
        sum_y += source.y as f32;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }

    let dx = candidate.x as f32 - sum_x / count as f32;
    let dy = candidate.y as f32 - sum_y / count as f32;
    (dx * dx + dy * dy) * cohesion / 1000.0
}

/// Score one needle against one hay site
///
/// Slot 0 only gates: an empty hay center rejects the candidate. The
/// remaining slots add weighted penalties until the running total reaches
/// `bail`, at which point the partial sum is returned.
pub fn score_site(
    topology: &Topology,
    metric: &Metric,
    needle: &Site,
    hay: &Site,
    cohesion_term: f32,
    bail: f32,
) -> f32 {
    if hay.center_alpha() < HAY_EMPTY_ALPHA {
        return INITIAL_SCORE;
    }

    let mut score = cohesion_term;
    for i in 1..needle.len() {
        if score >= bail {
            break;
        }
        let n = needle.sample(i);
        let h = hay.sample(i);
        let term = if n[color::ALPHA] < 1.0 {
            if h[color::ALPHA] > HAY_EMPTY_ALPHA {
                color::rgb_distance_sq(n, h)
            } else {
                metric.empty_hay
            }
        } else {
            metric.empty_needle
        };
        score += term * topology.weight(i);
    }
    score
}

/// Best score of a candidate over all needle scales
///
/// Candidates whose hay center is less than half opaque are rejected.
pub fn probe_score(
    topology: &Topology,
    metric: &Metric,
    needles: &[Site],
    hay: &Site,
    cohesion_term: f32,
    bail: f32,
) -> f32 {
    if hay.center_alpha() < HAY_CENTER_MIN_ALPHA {
        return INITIAL_SCORE;
    }

    needles.iter().fold(INITIAL_SCORE, |best, needle| {
        best.min(score_site(
            topology,
            metric,
            needle,
            hay,
            cohesion_term,
            bail,
        ))
    })
}
