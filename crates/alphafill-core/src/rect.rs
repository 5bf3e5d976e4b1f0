//! Rect - Rectangular regions and tile traversal
//!
//! A `Rect` describes a region of interest in pixel coordinates. The
//! linear passes of the fill stage walk a region tile by tile; within a
//! tile pixels are visited in raster order.
//!
//! # Examples
//!
//! ```
//! use alphafill_core::Rect;
//!
//! let roi = Rect::new(0, 0, 5, 3);
//! let tiles: Vec<Rect> = roi.tiles(4, 4).collect();
//! assert_eq!(tiles, vec![Rect::new(0, 0, 4, 3), Rect::new(4, 0, 1, 3)]);
//! assert_eq!(roi.points().count(), 15);
//! ```

/// Axis-aligned rectangle with unsigned origin and extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the right edge
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// One past the bottom edge
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Number of pixels covered
    #[inline]
    pub fn area(&self) -> usize {
        self.w as usize * self.h as usize
    }

    /// Whether the rectangle covers no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Whether (x, y) lies inside the rectangle
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    ///
    /// Edges are compared in 64 bits, so a rectangle reaching past
    /// `u32::MAX` is never inside.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let far = |r: &Rect| (r.x as u64 + r.w as u64, r.y as u64 + r.h as u64);
        let (right, bottom) = far(self);
        let (other_right, other_bottom) = far(other);
        other.x >= self.x && other.y >= self.y && other_right <= right && other_bottom <= bottom
    }

    /// Iterate all pixel coordinates in raster order
    pub fn points(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let Rect { x, y, w, h } = *self;
        (y..y + h).flat_map(move |py| (x..x + w).map(move |px| (px, py)))
    }

    /// Split into tiles of at most `tile_w` x `tile_h`
    ///
    /// Tiles are produced row of tiles by row of tiles; edge tiles are
    /// clipped to the rectangle. A zero tile size is treated as 1.
    pub fn tiles(&self, tile_w: u32, tile_h: u32) -> Tiles {
        Tiles {
            area: *self,
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            next_x: self.x,
            next_y: self.y,
        }
    }
}

/// Iterator over the tiles of a [`Rect`]
#[derive(Debug, Clone)]
pub struct Tiles {
    area: Rect,
    tile_w: u32,
    tile_h: u32,
    next_x: u32,
    next_y: u32,
}

impl Iterator for Tiles {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        if self.area.is_empty() || self.next_y >= self.area.bottom() {
            return None;
        }

        let w = self.tile_w.min(self.area.right() - self.next_x);
        let h = self.tile_h.min(self.area.bottom() - self.next_y);
        let tile = Rect::new(self.next_x, self.next_y, w, h);

        self.next_x += w;
        if self.next_x >= self.area.right() {
            self.next_x = self.area.x;
            self.next_y += h;
        }

        Some(tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_cover_every_pixel_once() {
        let roi = Rect::new(3, 2, 10, 7);
        let mut seen = vec![0u32; roi.area()];
        for tile in roi.tiles(4, 3) {
            assert!(roi.contains_rect(&tile));
            for (x, y) in tile.points() {
                let idx = ((y - roi.y) * roi.w + (x - roi.x)) as usize;
                seen[idx] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_tiles_empty_rect() {
        assert_eq!(Rect::new(0, 0, 0, 5).tiles(4, 4).count(), 0);
    }

    #[test]
    fn test_tiles_zero_size_treated_as_one() {
        assert_eq!(Rect::new(0, 0, 2, 2).tiles(0, 0).count(), 4);
    }

    #[test]
    fn test_points_raster_order() {
        let points: Vec<_> = Rect::new(1, 1, 2, 2).points().collect();
        assert_eq!(points, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_contains_rect_far_edges() {
        let bounds = Rect::new(0, 0, 8, 8);
        assert!(bounds.contains_rect(&Rect::new(4, 4, 4, 4)));
        assert!(!bounds.contains_rect(&Rect::new(4, 4, 5, 4)));
        assert!(!bounds.contains_rect(&Rect::new(u32::MAX - 1, 0, 4, 1)));
        assert!(!bounds.contains_rect(&Rect::new(0, 1, 1, u32::MAX)));
        let huge = Rect::new(1, 1, u32::MAX, u32::MAX);
        assert!(huge.contains_rect(&Rect::new(2, 2, 3, 3)));
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(r.contains(2, 2));
        assert!(r.contains(4, 4));
        assert!(!r.contains(5, 4));
        assert!(!r.contains(1, 3));
    }
}
