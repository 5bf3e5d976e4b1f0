//! Probes and the probe store
//!
//! A probe is a pending fill target: it remembers where in the reference
//! its best match so far comes from and how good that match is. The
//! store owns every probe of a run, keyed by target coordinate. Active
//! probes are visited in raster order. A probe that used up its attempt
//! budget leaves the search: neighbor lookups no longer see it, and its
//! final state is only kept for reporting.

use std::collections::BTreeMap;

/// Score of a probe that has no accepted source yet
///
/// Also returned by the scorer to reject a candidate. Exactly
/// representable as `f32` and far above any real score.
pub const INITIAL_SCORE: f32 = 1_200_000_000.0;

/// Integer pixel coordinate
///
/// Ordered by row then column, so iteration over coordinates is raster
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row
    pub y: i32,
    /// Column
    pub x: i32,
}

impl Coord {
    /// Create a coordinate
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by (dx, dy)
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A fill target and its best known source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// Pixel to fill; fixed for the probe's lifetime
    pub target: Coord,
    /// Best source coordinate in the reference so far
    pub source: Coord,
    /// Score of `source`, lower is better
    pub score: f32,
    /// Number of improvement attempts made
    pub age: u32,
}

impl Probe {
    /// New probe at `target` with no source yet
    pub fn new(target: Coord) -> Self {
        Self {
            target,
            source: target,
            score: INITIAL_SCORE,
            age: 0,
        }
    }

    /// Whether a real candidate has been accepted
    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.score != INITIAL_SCORE
    }
}

/// Offsets of the probes consulted around a target
///
/// The first four are the 4-connected neighbors used for cohesion, the
/// first twelve are consulted for inspiration.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 16] = [
    // 4 connected
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    // 8 connected
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    // jump of 3
    (-3, 0),
    (3, 0),
    (0, 3),
    (0, -3),
    // jump of 8
    (-8, 0),
    (8, 0),
    (0, 8),
    (0, -8),
];

/// Number of neighbors that take part in cohesion
pub const COHESION_NEIGHBORS: usize = 4;

/// Number of neighbors consulted for inspiration
pub const INSPIRATION_NEIGHBORS: usize = 12;

/// Sources of the seeded probes around a target, by [`NEIGHBOR_OFFSETS`] slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Neighbors {
    sources: [Option<Coord>; 16],
}

impl Neighbors {
    /// Neighborhood with the given sources
    pub fn from_sources(sources: [Option<Coord>; 16]) -> Self {
        Self { sources }
    }

    /// Sources of the 4-connected neighbors that have one
    pub fn axis_aligned(&self) -> impl Iterator<Item = Coord> + '_ {
        self.sources[..COHESION_NEIGHBORS].iter().flatten().copied()
    }

    /// Sources of the neighbors consulted for inspiration
    pub fn inspiration(&self) -> impl Iterator<Item = Coord> + '_ {
        self.sources[..INSPIRATION_NEIGHBORS].iter().flatten().copied()
    }

    /// Number of neighbors with a source
    pub fn count(&self) -> usize {
        self.sources.iter().flatten().count()
    }
}

/// Owner of all probes of a run
#[derive(Debug, Default)]
pub struct ProbeStore {
    active: BTreeMap<Coord, Probe>,
    retired: BTreeMap<Coord, Probe>,
}

impl ProbeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh probe at `target`
    ///
    /// Returns `false` if a probe already exists there.
    pub fn add(&mut self, target: Coord) -> bool {
        if self.active.contains_key(&target) || self.retired.contains_key(&target) {
            return false;
        }
        self.active.insert(target, Probe::new(target));
        true
    }

    /// Active probe at `target`
    pub fn get(&self, target: Coord) -> Option<&Probe> {
        self.active.get(&target)
    }

    /// Store an updated probe, retiring it once `age >= max_age`
    ///
    /// Returns `true` if the probe was retired.
    pub fn update(&mut self, probe: Probe, max_age: u32) -> bool {
        if probe.age >= max_age {
            self.active.remove(&probe.target);
            self.retired.insert(probe.target, probe);
            true
        } else {
            self.active.insert(probe.target, probe);
            false
        }
    }

    /// Targets of the active probes in raster order
    pub fn active_targets(&self) -> Vec<Coord> {
        self.active.keys().copied().collect()
    }

    /// Active probes in raster order
    pub fn active(&self) -> impl Iterator<Item = &Probe> {
        self.active.values()
    }

    /// Retired probes in raster order
    pub fn retired(&self) -> impl Iterator<Item = &Probe> {
        self.retired.values()
    }

    /// Every probe, active and retired, in raster order
    pub fn all(&self) -> Vec<Probe> {
        let mut probes: Vec<Probe> = self
            .active
            .values()
            .chain(self.retired.values())
            .copied()
            .collect();
        probes.sort_by_key(|p| p.target);
        probes
    }

    /// Number of active probes
    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no probe is active
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of retired probes
    #[inline]
    pub fn retired_len(&self) -> usize {
        self.retired.len()
    }

    /// Number of active probes without a source
    pub fn missing(&self) -> usize {
        self.active.values().filter(|p| !p.is_seeded()).count()
    }

    /// Sources of the seeded active probes around `target`
    pub fn neighbors(&self, target: Coord) -> Neighbors {
        let mut sources = [None; 16];
        for (slot, (dx, dy)) in sources.iter_mut().zip(NEIGHBOR_OFFSETS) {
            *slot = self
                .get(target.offset(dx, dy))
                .filter(|p| p.is_seeded())
                .map(|p| p.source);
        }
        Neighbors::from_sources(sources)
    }
}
