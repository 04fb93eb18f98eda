//! Error types for blobtrace-region

use thiserror::Error;

/// Errors that can occur during contour tracing and labeling
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobtrace_core::Error),

    /// Connectivity other than 4 or 8
    #[error("invalid connectivity: {0} (expected 4 or 8)")]
    InvalidConnectivity(u32),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// No component with this id exists
    #[error("unknown component id {id} ({count} components)")]
    UnknownComponent { id: usize, count: usize },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
