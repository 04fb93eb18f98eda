//! Blobtrace Core - Basic data structures for contour extraction
//!
//! This crate provides the containers shared by the tracing and labeling
//! code in `blobtrace-region`:
//!
//! - [`Gray`] / [`GrayView`] - Strided single band images (owned / borrowed)
//! - [`GrayImage`] - Read-only interface implemented by both image types
//! - [`PackedSets`] - Many variable length sets stored in fixed-size blocks
//! - [`Point2D`] - Integer pixel coordinates
//!
//! Binary images use `Gray<u8>` with foreground `1` and background `0`.
//! Label images use `Gray<i32>`.

pub mod error;
pub mod gray;
pub mod packed;
pub mod point;

pub use error::{Error, Result};
pub use gray::{Gray, GrayImage, GrayView};
pub use packed::{DEFAULT_BLOCK_SIZE, PackedSetInfo, PackedSets};
pub use point::Point2D;
