//! blobtrace-test - Regression test framework for blobtrace
//!
//! This crate provides a small regression test harness plus helpers for
//! building binary test images:
//!
//! - [`RegParams`] records numbered comparisons and reports all failures
//!   at the end of a test
//! - [`parse_binary_pattern`] builds an image from ASCII art
//! - [`random_binary`] builds a reproducible random image
//!
//! # Usage
//!
//! ```
//! use blobtrace_core::GrayImage;
//! use blobtrace_test::{RegParams, parse_binary_pattern};
//!
//! let img = parse_binary_pattern(&["..#", ".##"]).unwrap();
//! let mut rp = RegParams::new("pattern");
//! rp.compare_values(3.0, img.data().iter().filter(|&&v| v == 1).count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print intermediate images

mod error;
mod params;
mod pattern;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use pattern::{SimpleRng, parse_binary_pattern, random_binary};
