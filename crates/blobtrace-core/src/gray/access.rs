//! Mutable pixel access for `Gray`
//!
//! Read access lives on the [`GrayImage`] trait so it works for views too.
//! Writes are only possible on owned images.

use super::{Gray, GrayImage};
use crate::error::{Error, Result};

impl<T: Copy + Default> Gray<T> {
    /// Mutable access to the whole backing buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Set a pixel value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if `(x, y)` is outside the image.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        if !self.is_in_bounds(x, y) {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let index = self.index_of(x, y);
        self.data[index] = value;
        Ok(())
    }

    /// Mutable pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row {y} out of range");
        let start = self.index_of(0, y);
        let width = self.width;
        &mut self.data[start..start + width]
    }

    /// Set every pixel of the image to `value`.
    ///
    /// Buffer elements outside the image (row padding) are left untouched.
    pub fn fill(&mut self, value: T) {
        if self.offset == 0 && self.stride == self.width {
            let n = self.width * self.height;
            self.data[..n].fill(value);
            return;
        }
        for y in 0..self.height {
            self.row_mut(y).fill(value);
        }
    }
}
