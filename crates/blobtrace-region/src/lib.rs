//! blobtrace-region - Contour tracing and component labeling
//!
//! This crate provides:
//!
//! - **Contour tracing** - Following outer and hole borders with 4- or
//!   8-connectivity ([`ContourTracer`])
//! - **Component labeling** - Single pass labeling with contour extraction
//!   ([`LinearContourLabeler`])
//! - **Convenience functions** - One-shot labeling with owned results
//!
//! # Examples
//!
//! ## Labeling and contours
//!
//! ```
//! use blobtrace_core::Gray;
//! use blobtrace_region::{ConnectivityType, LinearContourLabeler};
//!
//! // 3x3 ring with a one pixel hole
//! let binary = Gray::from_rows(&[[1u8, 1, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
//! let mut labeled = Gray::new(0, 0);
//!
//! let mut labeler = LinearContourLabeler::new(ConnectivityType::EightWay);
//! labeler.process(&binary, &mut labeled).unwrap();
//!
//! let component = &labeler.contours()[0];
//! assert_eq!(component.internal_indexes.len(), 1);
//!
//! let mut points = Vec::new();
//! labeler.load_contour(component.external_index, &mut points).unwrap();
//! assert_eq!(points.len(), 8);
//! ```
//!
//! ## Counting components
//!
//! ```
//! use blobtrace_core::Gray;
//! use blobtrace_region::{ConnectivityType, count_components};
//!
//! let binary = Gray::from_rows(&[[1u8, 0], [0, 1]]).unwrap();
//! assert_eq!(count_components(&binary, ConnectivityType::FourWay).unwrap(), 2);
//! assert_eq!(count_components(&binary, ConnectivityType::EightWay).unwrap(), 1);
//! ```

pub mod ccbord;
pub mod conncomp;
pub mod error;
pub mod label;

// Re-export core types
pub use blobtrace_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export ccbord types
pub use ccbord::{ContourTracer, MARKED, TraceTarget};

// Re-export conncomp types
pub use conncomp::{
    ComponentContours, ConnectivityType, ContourOptions, ContourPacked, LinearContourLabeler,
};

// Re-export label types and functions
pub use label::{ImageContours, component_sizes, count_components, find_contours};
