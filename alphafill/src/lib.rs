//! alphafill - Content-aware filling of transparent image regions
//!
//! Pixels whose alpha is below 1 are treated as missing and filled with
//! colors copied from similar neighborhoods of a reference image, using a
//! randomized patch search in the manner of PatchMatch.
//!
//! # Overview
//!
//! - [`RgbaImage`], [`Rect`] and [`Sampler`] from the core crate
//! - [`inpaint`] with the search, its options and the fill entry points
//!
//! # Example
//!
//! ```
//! use alphafill::{Rect, RgbaImage};
//! use alphafill::inpaint::{InpaintOptions, alpha_inpaint};
//!
//! // Host pixels as packed 0xRRGGBBAA, with a transparent 3x3 hole
//! let mut pixels = vec![0x3399_33ffu32; 16 * 16];
//! for (x, y) in Rect::new(6, 6, 3, 3).points() {
//!     pixels[(y * 16 + x) as usize] = 0;
//! }
//!
//! let image = RgbaImage::from_packed(16, 16, &pixels).unwrap();
//! let filled = alpha_inpaint(&image, &InpaintOptions::default().with_seed(1)).unwrap();
//! assert_eq!(filled.count_missing(), 0);
//! assert!(filled.to_packed().iter().all(|&p| p == 0x3399_33ff));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use alphafill_core::*;

// Re-export the search crate as a module to avoid name conflicts
pub use alphafill_inpaint as inpaint;
