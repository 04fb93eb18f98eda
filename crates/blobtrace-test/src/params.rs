//! Regression test parameters and operations

use blobtrace_core::{GrayImage, Point2D};
use std::fmt::Debug;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results and report failures (default)
    #[default]
    Compare,
    /// Compare, and also print intermediate images to stderr
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status. Every
/// `compare_*` call advances the index so failures can be located in the
/// test body.
pub struct RegParams {
    /// Name of the test (e.g., "contour")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
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
    /// * `test_name` - Name of the test (e.g., "contour")
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
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

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two images for exact equality of size and pixels
    ///
    /// Row stride and buffer offset are ignored, so an owned image can be
    /// compared with a view.
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_gray<A, B>(&mut self, expected: &A, actual: &B) -> bool
    where
        A: GrayImage,
        B: GrayImage<Pixel = A::Pixel>,
        A::Pixel: PartialEq + Debug,
    {
        self.index += 1;

        if expected.width() != actual.width() || expected.height() != actual.height() {
            let msg = format!(
                "Failure in {}_reg: gray comparison for index {} - dimension mismatch\n\
                 expected = {}x{}, actual = {}x{}",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            );
            return self.fail(msg);
        }

        for y in 0..expected.height() {
            let (row1, row2) = (expected.row(y), actual.row(y));
            if let Some(x) = (0..row1.len()).find(|&x| row1[x] != row2[x]) {
                let msg = format!(
                    "Failure in {}_reg: gray comparison for index {} - pixel mismatch at ({}, {})\n\
                     expected = {:?}, actual = {:?}",
                    self.test_name, self.index, x, y, row1[x], row2[x]
                );
                return self.fail(msg);
            }
        }

        true
    }

    /// Compare two point lists for exact equality, order included
    ///
    /// # Returns
    ///
    /// `true` if the lists are identical, `false` otherwise.
    pub fn compare_points(&mut self, expected: &[Point2D], actual: &[Point2D]) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            let msg = format!(
                "Failure in {}_reg: point comparison for index {}\n\
                 sizes: {} vs {}\n\
                 expected = {:?}\n\
                 actual   = {:?}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len(),
                expected,
                actual
            );
            return self.fail(msg);
        }

        if let Some(i) = (0..expected.len()).find(|&i| expected[i] != actual[i]) {
            let msg = format!(
                "Failure in {}_reg: point comparison for index {} - mismatch at position {}\n\
                 expected = {:?}, actual = {:?}",
                self.test_name, self.index, i, expected[i], actual[i]
            );
            return self.fail(msg);
        }

        true
    }

    /// Print an image to stderr when in display mode
    pub fn show_gray<I>(&self, title: &str, image: &I)
    where
        I: GrayImage,
        I::Pixel: Debug,
    {
        if !self.display() {
            return;
        }
        eprintln!("{} ({}x{}):", title, image.width(), image.height());
        for y in 0..image.height() {
            let row: Vec<String> = image.row(y).iter().map(|p| format!("{:?}", p)).collect();
            eprintln!("  {}", row.join(" "));
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
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

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
