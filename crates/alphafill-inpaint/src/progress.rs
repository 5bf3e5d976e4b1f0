//! Progress reporting and cancellation
//!
//! The fill reports its progress once per search round. A sink returning
//! `false` asks the search to stop after the current round; the output is
//! left partially filled but valid.

/// Receiver of progress updates
pub trait Progress {
    /// Report `fraction` in `[0.0, 1.0]` with a short status message.
    ///
    /// Returns `false` to request cancellation.
    fn report(&mut self, fraction: f32, message: &str) -> bool;
}

/// Progress sink that ignores every update and never cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _fraction: f32, _message: &str) -> bool {
        true
    }
}

impl<F> Progress for F
where
    F: FnMut(f32, &str) -> bool,
{
    fn report(&mut self, fraction: f32, message: &str) -> bool {
        self(fraction, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_progress() {
        let mut seen = Vec::new();
        let mut sink = |fraction: f32, message: &str| {
            seen.push((fraction, message.to_string()));
            fraction < 0.5
        };
        assert!(sink.report(0.25, "a"));
        assert!(!sink.report(0.75, "b"));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_no_progress_never_cancels() {
        assert!(NoProgress.report(1.0, "done"));
    }
}
