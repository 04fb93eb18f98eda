//! Pixel labeling functions
//!
//! This module provides high-level functions that run a
//! [`LinearContourLabeler`] once and hand back owned results.

use crate::conncomp::{ComponentContours, ConnectivityType, ContourOptions, LinearContourLabeler};
use crate::error::{RegionError, RegionResult};
use blobtrace_core::{Gray, GrayImage};

/// Label image and contours of every component of a binary image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageContours {
    /// Label image; component `i` is labeled `i`, background `0`
    pub labeled: Gray<i32>,
    /// Component contours, ordered by id
    pub components: Vec<ComponentContours>,
}

impl ImageContours {
    /// Number of components.
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Contours of the component with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnknownComponent`] if no component has `id`.
    pub fn component(&self, id: usize) -> RegionResult<&ComponentContours> {
        id.checked_sub(1)
            .and_then(|i| self.components.get(i))
            .ok_or(RegionError::UnknownComponent {
                id,
                count: self.components.len(),
            })
    }
}

/// Label a binary image and extract the contours of all components
///
/// # Arguments
///
/// * `binary` - Input image, foreground `1` and background `0`
/// * `options` - Connectivity and contour storage options
///
/// # Errors
///
/// Returns an error if the options are inconsistent.
pub fn find_contours<I>(binary: &I, options: &ContourOptions) -> RegionResult<ImageContours>
where
    I: GrayImage<Pixel = u8>,
{
    let mut labeler = LinearContourLabeler::with_options(*options)?;
    let mut labeled = Gray::new(0, 0);
    labeler.process(binary, &mut labeled)?;
    Ok(ImageContours {
        labeled,
        components: labeler.component_contours()?,
    })
}

/// Count the number of connected components
///
/// No contour points are stored.
///
/// # Arguments
///
/// * `binary` - Input image, foreground `1` and background `0`
/// * `connectivity` - Connectivity type
pub fn count_components<I>(binary: &I, connectivity: ConnectivityType) -> RegionResult<usize>
where
    I: GrayImage<Pixel = u8>,
{
    let options = ContourOptions::new(connectivity)
        .with_max_contour_size(0)
        .with_save_internal_contours(false);
    let mut labeler = LinearContourLabeler::with_options(options)?;
    let mut labeled = Gray::new(0, 0);
    labeler.process(binary, &mut labeled)?;
    Ok(labeler.contours().len())
}

/// Pixel count of each component in a label image
///
/// # Returns
///
/// A vector whose entry `i` is the size of the component labeled `i + 1`.
/// Its length is the largest label found.
pub fn component_sizes<I>(labeled: &I) -> Vec<usize>
where
    I: GrayImage<Pixel = i32>,
{
    let mut sizes = Vec::new();
    for y in 0..labeled.height() {
        for &label in labeled.row(y) {
            if label <= 0 {
                continue;
            }
            let index = label as usize - 1;
            if index >= sizes.len() {
                sizes.resize(index + 1, 0);
            }
            sizes[index] += 1;
        }
    }
    sizes
}
