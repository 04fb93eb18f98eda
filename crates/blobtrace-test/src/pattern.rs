//! Binary test image builders

use crate::error::{TestError, TestResult};
use blobtrace_core::Gray;

/// Build a binary image from ASCII art.
///
/// `1` and `#` are foreground, `0` and `.` are background. All rows must
/// have the same length.
///
/// # Errors
///
/// Returns [`TestError::InvalidPattern`] for any other character and
/// [`TestError::RaggedPattern`] for rows of different length.
pub fn parse_binary_pattern(rows: &[&str]) -> TestResult<Gray<u8>> {
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut data = Vec::with_capacity(width * rows.len());
    for (row, line) in rows.iter().enumerate() {
        let start = data.len();
        for (col, ch) in line.chars().enumerate() {
            let value = match ch {
                '1' | '#' => 1,
                '0' | '.' => 0,
                _ => return Err(TestError::InvalidPattern { row, col, ch }),
            };
            data.push(value);
        }
        if data.len() - start != width {
            return Err(TestError::RaggedPattern {
                row,
                expected: width,
                actual: data.len() - start,
            });
        }
    }
    Ok(Gray::from_vec(width, rows.len(), data)?)
}

/// Simple linear congruential generator for reproducible test images
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit state
    pub fn next_u64(&mut self) -> u64 {
        // Knuth's MMIX LCG constants
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform value in `0..bound`, taken from the high bits
    pub fn next_below(&mut self, bound: u64) -> u64 {
        (self.next_u64() >> 33) % bound
    }
}

/// Build a reproducible random binary image.
///
/// Each pixel is foreground with probability `fill_percent / 100`.
///
/// # Errors
///
/// Returns [`TestError::InvalidParameter`] if `fill_percent > 100`.
pub fn random_binary(
    width: usize,
    height: usize,
    seed: u64,
    fill_percent: u32,
) -> TestResult<Gray<u8>> {
    if fill_percent > 100 {
        return Err(TestError::InvalidParameter(format!(
            "fill percentage {fill_percent} exceeds 100"
        )));
    }
    let mut rng = SimpleRng::new(seed);
    let data = (0..width * height)
        .map(|_| u8::from(rng.next_below(100) < u64::from(fill_percent)))
        .collect();
    Ok(Gray::from_vec(width, height, data)?)
}
