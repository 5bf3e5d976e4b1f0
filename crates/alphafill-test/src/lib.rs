//! alphafill-test - Regression test framework for alphafill
//!
//! This crate provides a small regression test harness in the style of
//! numbered checks: every comparison advances an index, failures are
//! collected and reported together by [`RegParams::cleanup`].
//!
//! It also provides synthetic fixture images (see [`fixtures`]) so that
//! tests do not depend on image files on disk.
//!
//! # Usage
//!
//! ```ignore
//! use alphafill_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("inpaint");
//! rp.compare_values(1.0, filled_alpha as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;
