//! Regression test parameters and operations

use alphafill_core::{Rgba, RgbaImage};

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "inpaint")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "inpaint")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never compares within delta
        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two pixels channel by channel
    ///
    /// # Returns
    ///
    /// `true` if every channel matches within delta, `false` otherwise.
    pub fn compare_pixels(&mut self, expected: Rgba, actual: Rgba, delta: f32) -> bool {
        self.index += 1;

        if !pixels_match(&expected, &actual, delta) {
            let msg = format!(
                "Failure in {}_reg: pixel comparison for index {}\n\
                 expected = {:?}, actual = {:?}, allowed delta = {}",
                self.test_name, self.index, expected, actual, delta
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two images pixel by pixel
    ///
    /// # Returns
    ///
    /// `true` if the images have the same size and every channel of every
    /// pixel matches within delta, `false` otherwise.
    pub fn compare_images(&mut self, expected: &RgbaImage, actual: &RgbaImage, delta: f32) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            );
            self.fail(msg);
            return false;
        }

        for (x, y) in expected.bounds().points() {
            let p1 = expected.get_pixel_unchecked(x, y);
            let p2 = actual.get_pixel_unchecked(x, y);
            if !pixels_match(&p1, &p2, delta) {
                let msg = format!(
                    "Failure in {}_reg: image comparison for index {} - pixel mismatch at ({}, {}): {:?} vs {:?}",
                    self.test_name, self.index, x, y, p1, p2
                );
                self.fail(msg);
                return false;
            }
        }

        true
    }

    /// Record a boolean check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        condition
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }
}

fn pixels_match(a: &Rgba, b: &Rgba, delta: f32) -> bool {
    a.iter().zip(b.iter()).all(|(p, q)| (p - q).abs() <= delta)
}
