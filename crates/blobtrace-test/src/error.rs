//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// A pattern row contains a character other than `0`, `1`, `.` or `#`
    #[error("invalid pattern character {ch:?} at row {row}, column {col}")]
    InvalidPattern { row: usize, col: usize, ch: char },

    /// Pattern rows have different lengths
    #[error("pattern row {row} has length {actual}, expected {expected}")]
    RaggedPattern {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Invalid generator parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the core image containers
    #[error("core error: {0}")]
    Core(#[from] blobtrace_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
