//! Image buffer and tile traversal regression test
//!
//! Tests:
//!   (1) packed 0xRRGGBBAA conversion keeps 8-bit values
//!   (2) tiles cover a region exactly once
//!   (3) bounds and missing-pixel counting

use alphafill_core::{Rect, RgbaImage};
use alphafill_test::{RegParams, fixtures};
use std::collections::HashSet;

#[test]
fn image_reg_packed() {
    let mut rp = RegParams::new("image_packed");

    let packed: Vec<u32> = (0..12u32).map(|i| 0x1020_3000 | (i * 21)).collect();
    let image = RgbaImage::from_packed(4, 3, &packed).unwrap();
    rp.compare_values(4.0, image.width() as f64, 0.0);
    rp.compare_values(3.0, image.height() as f64, 0.0);
    rp.check(image.to_packed() == packed, "packed values survive");

    rp.check(RgbaImage::from_packed(4, 4, &packed).is_err(), "length checked");

    assert!(rp.cleanup(), "image_packed regression test failed");
}

#[test]
fn image_reg_tiles() {
    let mut rp = RegParams::new("image_tiles");

    let region = Rect::new(3, 5, 17, 11);
    for (tw, th) in [(1, 1), (4, 4), (5, 3), (64, 64)] {
        let mut seen = HashSet::new();
        let mut visits = 0usize;
        for tile in region.tiles(tw, th) {
            rp.check(region.contains_rect(&tile), "tile inside region");
            for p in tile.points() {
                seen.insert(p);
                visits += 1;
            }
        }
        rp.compare_values(region.area() as f64, visits as f64, 0.0);
        rp.compare_values(region.area() as f64, seen.len() as f64, 0.0);
    }

    assert!(rp.cleanup(), "image_tiles regression test failed");
}

#[test]
fn image_reg_missing() {
    let mut rp = RegParams::new("image_missing");

    let image = fixtures::solid(10, 10, fixtures::WHITE).unwrap();
    rp.compare_values(0.0, image.count_missing() as f64, 0.0);
    let holed = fixtures::set_alpha(&image, Rect::new(2, 3, 4, 2), 0.5).unwrap();
    rp.compare_values(8.0, holed.count_missing() as f64, 0.0);
    rp.check(holed.check_same_size(&image).is_ok(), "same size");
    rp.check(
        holed
            .check_same_size(&fixtures::solid(10, 9, fixtures::WHITE).unwrap())
            .is_err(),
        "size mismatch detected",
    );
    rp.check(image.bounds() == Rect::new(0, 0, 10, 10), "bounds");

    assert!(rp.cleanup(), "image_missing regression test failed");
}
