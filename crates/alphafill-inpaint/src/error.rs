//! Error types for alphafill-inpaint
//!
//! Inpainting itself cannot fail on valid input: probe count, cache size
//! and round count are bounded by policy. What remains is invalid
//! configuration and allocation failure of the working sets, which is
//! fatal for the run.

use thiserror::Error;

/// Errors that can occur during inpainting
#[derive(Debug, Error)]
pub enum InpaintError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] alphafill_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A working set could not grow
    #[error("allocation failed for {what}")]
    AllocationFailed {
        /// Which working set failed to grow
        what: &'static str,
    },
}

/// Result type for inpainting operations
pub type InpaintResult<T> = Result<T, InpaintError>;
