//! alphafill-inpaint - Patch search inpainting of transparent pixels
//!
//! This crate fills pixels whose alpha is below 1 with colors copied from
//! similar neighborhoods of a reference image:
//!
//! - Ring/ray neighborhood topology with distance weights
//! - Direction and scale invariant feature extraction
//! - Memoized reference features with a memory budget
//! - Randomized neighbor-inspired search with cohesion
//! - Fill and alpha composite over a region of interest
//!
//! # Example
//!
//! ```
//! use alphafill_core::RgbaImage;
//! use alphafill_inpaint::{InpaintOptions, alpha_inpaint};
//!
//! let mut image = RgbaImage::new_with_value(4, 4, [1.0, 0.0, 0.0, 1.0]).unwrap();
//! image.set_pixel(2, 2, [0.0, 0.0, 0.0, 0.0]).unwrap();
//!
//! let options = InpaintOptions::default().with_seed(42);
//! let filled = alpha_inpaint(&image, &options).unwrap();
//! assert_eq!(filled.get_pixel(2, 2).unwrap(), [1.0, 0.0, 0.0, 1.0]);
//! ```

pub mod driver;
mod error;
pub mod fill;
pub mod hay;
pub mod options;
pub mod probe;
pub mod progress;
pub mod score;
pub mod site;
pub mod topology;

pub use error::{InpaintError, InpaintResult};
pub use options::InpaintOptions;
pub use progress::{NoProgress, Progress};

// Re-export commonly used items
pub use driver::{RunSummary, SearchDriver};
pub use fill::{FillStats, InpaintOutcome, PLACEHOLDER, alpha_inpaint, inpaint};
pub use hay::{HayCache, HayKey};
pub use probe::{Coord, INITIAL_SCORE, Neighbors, Probe, ProbeStore};
pub use site::{FeatureExtractor, Site};
pub use topology::{Offset, Topology};
