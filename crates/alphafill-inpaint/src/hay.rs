//! Hay cache
//!
//! Features of the reference image ("hay") are extracted lazily at
//! integer coordinates and memoized. The reference never changes during a
//! run, so entries are never invalidated. Memory is bounded by a byte
//! budget: inserts always succeed and [`HayCache::trim`] later evicts a
//! uniform random selection of entries until the cache fits again.

use crate::probe::Coord;
use crate::site::{FeatureExtractor, Site};
use crate::{InpaintError, InpaintResult};
use alphafill_core::RgbaImage;
use rand::Rng;
use std::collections::HashMap;

/// Per-entry bookkeeping estimate on top of the samples, in bytes
pub const HAY_ENTRY_OVERHEAD: usize = 32;

/// Point at which the shared out-of-bounds site is sampled
const OUT_OF_BOUNDS_POINT: (f32, f32) = (-100.0, -100.0);

/// Cache key for a hay entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HayKey {
    /// Integer coordinate inside the reference bounds
    At(Coord),
    /// Every coordinate outside the reference bounds
    OutOfBounds,
}

impl HayKey {
    /// Key for (x, y) in a reference of `width` x `height`
    ///
    /// Bounds are inclusive of `width` and `height`.
    pub fn for_coord(x: i32, y: i32, width: u32, height: u32) -> Self {
        if x < 0 || y < 0 || x as u32 > width || y as u32 > height {
            HayKey::OutOfBounds
        } else {
            HayKey::At(Coord::new(x, y))
        }
    }
}

/// Memoized reference features with random eviction
pub struct HayCache<'a> {
    reference: &'a RgbaImage,
    entries: HashMap<HayKey, Site>,
    /// Cached keys in insertion order, for O(1) random eviction
    keys: Vec<HayKey>,
    max_entries: usize,
}

impl<'a> HayCache<'a> {
    /// Create an empty cache over `reference`
    ///
    /// `budget_bytes` bounds the total size of entries with `slots`
    /// samples each.
    pub fn new(reference: &'a RgbaImage, slots: usize, budget_bytes: usize) -> Self {
        Self {
            reference,
            entries: HashMap::new(),
            keys: Vec::new(),
            max_entries: max_entries(slots, budget_bytes),
        }
    }

    /// Site of the reference at (x, y), extracted on first use
    pub fn get(&mut self, extractor: &FeatureExtractor, x: i32, y: i32) -> InpaintResult<&Site> {
        let key = HayKey::for_coord(x, y, self.reference.width(), self.reference.height());

        if !self.entries.contains_key(&key) {
            let (sx, sy) = match key {
                HayKey::At(c) => (c.x as f32, c.y as f32),
                HayKey::OutOfBounds => OUT_OF_BOUNDS_POINT,
            };
            let site = extractor.extract(self.reference, sx, sy, 1.0);
            self.entries
                .try_reserve(1)
                .map_err(|_| InpaintError::AllocationFailed { what: "hay cache" })?;
            self.keys
                .try_reserve(1)
                .map_err(|_| InpaintError::AllocationFailed { what: "hay cache" })?;
            self.entries.insert(key, site);
            self.keys.push(key);
        }

        self.entries
            .get(&key)
            .ok_or(InpaintError::AllocationFailed { what: "hay cache" })
    }

    /// Evict random entries until the cache fits its budget
    ///
    /// Returns the number of evicted entries.
    pub fn trim<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let len = self.entries.len();
        if len <= self.max_entries {
            return 0;
        }

        let to_remove = len - self.max_entries;
        for _ in 0..to_remove {
            let index = rng.random_range(0..self.keys.len());
            let key = self.keys.swap_remove(index);
            self.entries.remove(&key);
        }

        log::debug!(
            "hay cache trimmed by {} to {} entries",
            to_remove,
            self.entries.len()
        );
        to_remove
    }

    /// Number of cached entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry count that fits the byte budget
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Whether `key` is cached
    pub fn contains(&self, key: &HayKey) -> bool {
        self.entries.contains_key(key)
    }
}

/// Entries of `slots` samples that fit in `budget_bytes`
pub fn max_entries(slots: usize, budget_bytes: usize) -> usize {
    budget_bytes / (Site::byte_size(slots) + HAY_ENTRY_OVERHEAD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InpaintOptions;
    use crate::topology::Topology;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn extractor() -> FeatureExtractor {
        let options = InpaintOptions::default();
        FeatureExtractor::new(Topology::from_options(&options), options.sampler(), true)
    }

    #[test]
    fn test_key_out_of_bounds_is_shared() {
        assert_eq!(HayKey::for_coord(-1, 0, 4, 4), HayKey::OutOfBounds);
        assert_eq!(HayKey::for_coord(-1000, 5000, 4, 4), HayKey::OutOfBounds);
        assert_eq!(HayKey::for_coord(5, 0, 4, 4), HayKey::OutOfBounds);
        assert_eq!(HayKey::for_coord(0, 5, 4, 4), HayKey::OutOfBounds);
        // The bound itself is still inside
        assert_eq!(HayKey::for_coord(4, 4, 4, 4), HayKey::At(Coord::new(4, 4)));
    }

    #[test]
    fn test_get_memoizes() {
        let reference = RgbaImage::new_with_value(8, 8, [0.5, 0.5, 0.5, 1.0]).unwrap();
        let ex = extractor();
        let mut cache = HayCache::new(&reference, ex.topology().len(), 1 << 20);
        let first = cache.get(&ex, 3, 3).unwrap().clone();
        let second = cache.get(&ex, 3, 3).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        cache.get(&ex, -10, 2).unwrap();
        cache.get(&ex, 2, 99).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&HayKey::OutOfBounds));
    }

    #[test]
    fn test_out_of_bounds_site_is_transparent() {
        let reference = RgbaImage::new_with_value(8, 8, [0.5, 0.5, 0.5, 1.0]).unwrap();
        let ex = extractor();
        let mut cache = HayCache::new(&reference, ex.topology().len(), 1 << 20);
        let site = cache.get(&ex, -1, -1).unwrap();
        assert_eq!(site.center_alpha(), 0.0);
    }

    #[test]
    fn test_max_entries() {
        // 37 slots of 16 bytes plus overhead
        assert_eq!(max_entries(37, 37 * 16 + 32), 1);
        assert_eq!(max_entries(37, 10 * (37 * 16 + 32) + 5), 10);
        assert_eq!(max_entries(37, 100), 0);
    }

    #[test]
    fn test_trim_enforces_budget() {
        let reference = RgbaImage::new_with_value(16, 16, [0.2, 0.4, 0.6, 1.0]).unwrap();
        let ex = extractor();
        let slots = ex.topology().len();
        let budget = 5 * (Site::byte_size(slots) + HAY_ENTRY_OVERHEAD);
        let mut cache = HayCache::new(&reference, slots, budget);
        let mut rng = StdRng::seed_from_u64(1);

        for i in 0..12 {
            cache.get(&ex, i, i).unwrap();
        }
        assert_eq!(cache.len(), 12);

        let removed = cache.trim(&mut rng);
        assert_eq!(removed, 7);
        assert_eq!(cache.len(), cache.max_entries());
        assert_eq!(cache.trim(&mut rng), 0);
    }

    #[test]
    fn test_trim_same_seed_same_survivors() {
        let reference = RgbaImage::new_with_value(16, 16, [0.2, 0.4, 0.6, 1.0]).unwrap();
        let ex = extractor();
        let slots = ex.topology().len();
        let budget = 4 * (Site::byte_size(slots) + HAY_ENTRY_OVERHEAD);

        let survivors = |seed: u64| {
            let mut cache = HayCache::new(&reference, slots, budget);
            let mut rng = StdRng::seed_from_u64(seed);
            for i in 0..10 {
                cache.get(&ex, i, 15 - i).unwrap();
                cache.trim(&mut rng);
            }
            assert_eq!(cache.len(), 4);
            (0..10)
                .filter(|&i| cache.contains(&HayKey::At(Coord::new(i, 15 - i))))
                .collect::<Vec<i32>>()
        };
        assert_eq!(survivors(9), survivors(9));
    }
}
