//! Blobtrace - Binary image contour tracing and blob labeling
//!
//! Labels the connected components of a binary image in a single raster
//! scan and extracts the outer border and hole borders of every component
//! along the way.
//!
//! # Overview
//!
//! - Strided gray images and borrowed sub-image views
//! - Block allocated storage for many point lists
//! - Contour tracing with 4- or 8-connectivity
//! - Linear-time component labeling with contour size filters
//!
//! # Example
//!
//! ```
//! use blobtrace::Gray;
//! use blobtrace::region::{ConnectivityType, ContourOptions, find_contours};
//!
//! let binary = Gray::from_rows(&[
//!     [0u8, 0, 0, 0],
//!     [0, 1, 1, 0],
//!     [0, 1, 1, 0],
//! ])
//! .unwrap();
//!
//! let result = find_contours(&binary, &ContourOptions::new(ConnectivityType::EightWay)).unwrap();
//! assert_eq!(result.num_components(), 1);
//! assert_eq!(result.components[0].external.len(), 4);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use blobtrace_core::*;

// Re-export the region crate as a module to avoid name conflicts
pub use blobtrace_region as region;
