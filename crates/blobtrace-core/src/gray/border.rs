//! Border operations for images
//!
//! Contour tracing walks the 8-neighbourhood of every boundary pixel
//! without bounds checks, so the input is first copied into an image with
//! a frame of background pixels around it:
//!
//! - [`Gray::fill_border`] overwrites the outer frame of an image
//! - [`Gray::add_border`] creates an enlarged copy with a uniform frame
//! - [`Gray::copy_from_at`] copies another image into a sub-region

use super::{Gray, GrayImage};
use crate::error::{Error, Result};

impl<T: Copy + Default> Gray<T> {
    /// Set the outer `radius` rows and columns to `value`.
    ///
    /// A radius covering half the image or more fills the whole image.
    pub fn fill_border(&mut self, value: T, radius: usize) {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return;
        }
        let cols = radius.min(width);
        for y in 0..height {
            let row = self.row_mut(y);
            if y < radius || y + radius >= height {
                row.fill(value);
            } else {
                row[..cols].fill(value);
                row[width - cols..].fill(value);
            }
        }
    }

    /// Create a copy enlarged by `radius` pixels on every side, with the new
    /// frame set to `value`.
    ///
    /// The result is `(width + 2 * radius) x (height + 2 * radius)` and its
    /// pixel `(x + radius, y + radius)` equals pixel `(x, y)` of `self`.
    pub fn add_border(&self, radius: usize, value: T) -> Gray<T> {
        let mut out = Gray::new(self.width + 2 * radius, self.height + 2 * radius);
        out.fill_border(value, radius);
        for y in 0..self.height {
            let start = out.index_of(radius, y + radius);
            out.data[start..start + self.width].copy_from_slice(self.row(y));
        }
        out
    }

    /// Copy `src` into the region whose top-left corner is `(x0, y0)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `src` does not fit.
    pub fn copy_from_at<I>(&mut self, x0: usize, y0: usize, src: &I) -> Result<()>
    where
        I: GrayImage<Pixel = T>,
    {
        if x0 + src.width() > self.width || y0 + src.height() > self.height {
            return Err(Error::InvalidParameter(format!(
                "{}x{} region at ({x0}, {y0}) does not fit in {}x{} image",
                src.width(),
                src.height(),
                self.width,
                self.height
            )));
        }
        let width = src.width();
        for y in 0..src.height() {
            let start = self.index_of(x0, y0 + y);
            self.data[start..start + width].copy_from_slice(src.row(y));
        }
        Ok(())
    }

    /// Reshape to the size of `src` and copy its pixels.
    pub fn copy_from<I>(&mut self, src: &I)
    where
        I: GrayImage<Pixel = T>,
    {
        self.reshape(src.width(), src.height());
        for y in 0..src.height() {
            self.row_mut(y).copy_from_slice(src.row(y));
        }
    }
}
