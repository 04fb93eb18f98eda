//! Error types for blobtrace-core
//!
//! Provides a unified error type for the image containers and the packed
//! set storage. Each variant carries the offending indices or sizes so a
//! caller can tell which precondition was violated.

use thiserror::Error;

/// blobtrace core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pixel coordinate outside the image
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    PixelOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Set index out of range in a packed set
    #[error("set out of range: {index} >= {len}")]
    SetOutOfRange { index: usize, len: usize },

    /// Element index out of range inside a set
    #[error("element out of range in set {set}: {index} >= {len}")]
    ElementOutOfRange { set: usize, index: usize, len: usize },

    /// Sizes of two sequences do not match
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Backing buffer cannot hold the described image
    #[error("buffer too small: need {required} elements, have {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for blobtrace core operations
pub type Result<T> = std::result::Result<T, Error>;
