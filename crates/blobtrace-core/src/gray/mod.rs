//! Gray - Single band image container
//!
//! `Gray<T>` is the image type consumed and produced by the contour code.
//! A binary image is a `Gray<u8>` holding 0 and 1, a label image is a
//! `Gray<i32>`.
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major in a flat buffer
//! - Pixel `(x, y)` lives at `offset + y * stride + x`
//! - `stride >= width`; the gap at the end of a row is not part of the image
//!
//! A freshly created image has `offset == 0` and `stride == width`. Images
//! wrapping an external buffer (for example a row-padded frame handed over
//! by a host application) may use any offset and stride.
//!
//! # Views
//!
//! [`GrayView`] borrows a rectangular sub-region of any image without
//! copying. Both `Gray<T>` and `GrayView<'_, T>` implement [`GrayImage`],
//! the read-only interface used by algorithms that accept either.

mod access;
mod border;
mod view;

pub use view::GrayView;

use crate::error::{Error, Result};

/// Read-only access to a strided single band image.
///
/// Implementors only describe their layout; pixel lookup, row slicing and
/// sub-image creation are provided on top of it.
pub trait GrayImage {
    /// Pixel value type
    type Pixel: Copy;

    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Number of buffer elements between the starts of two rows.
    fn stride(&self) -> usize;

    /// Buffer index of pixel `(0, 0)`.
    fn offset(&self) -> usize;

    /// The backing buffer, including any padding around the image.
    fn data(&self) -> &[Self::Pixel];

    /// Total number of pixels in the image.
    #[inline]
    fn total_pixels(&self) -> usize {
        self.width() * self.height()
    }

    /// Check whether `(x, y)` lies inside the image.
    #[inline]
    fn is_in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Buffer index of pixel `(x, y)`. No bounds check is performed.
    #[inline]
    fn index_of(&self, x: usize, y: usize) -> usize {
        self.offset() + y * self.stride() + x
    }

    /// Get a pixel value, or `None` when `(x, y)` is outside the image.
    #[inline]
    fn get(&self, x: usize, y: usize) -> Option<Self::Pixel> {
        if !self.is_in_bounds(x, y) {
            return None;
        }
        self.data().get(self.index_of(x, y)).copied()
    }

    /// Pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    fn row(&self, y: usize) -> &[Self::Pixel] {
        assert!(y < self.height(), "row {y} out of range");
        let start = self.index_of(0, y);
        &self.data()[start..start + self.width()]
    }

    /// Copy the pixels into one vector per row.
    fn to_rows(&self) -> Vec<Vec<Self::Pixel>> {
        (0..self.height()).map(|y| self.row(y).to_vec()).collect()
    }

    /// Borrow the region `[x0, x1) x [y0, y1)` as a view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the bounds are reversed or
    /// extend past the image.
    fn sub_image(
        &self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Result<GrayView<'_, Self::Pixel>> {
        if x1 > self.width() || y1 > self.height() || x1 < x0 || y1 < y0 {
            return Err(Error::InvalidParameter(format!(
                "sub-image [{x0}, {x1}) x [{y0}, {y1}) illegal for {}x{} image",
                self.width(),
                self.height()
            )));
        }
        GrayView::new(
            self.data(),
            x1 - x0,
            y1 - y0,
            self.index_of(x0, y0),
            self.stride(),
        )
    }
}

/// Validate that a buffer of `len` elements can hold the described layout.
pub(crate) fn check_layout(
    len: usize,
    width: usize,
    height: usize,
    offset: usize,
    stride: usize,
) -> Result<()> {
    if stride < width {
        return Err(Error::InvalidParameter(format!(
            "stride {stride} smaller than width {width}"
        )));
    }
    let required = if width == 0 || height == 0 {
        offset
    } else {
        offset + (height - 1) * stride + width
    };
    if required > len {
        return Err(Error::BufferTooSmall {
            required,
            actual: len,
        });
    }
    Ok(())
}

/// Single band image with an owned buffer.
///
/// # Examples
///
/// ```
/// use blobtrace_core::{Gray, GrayImage};
///
/// let mut img = Gray::<u8>::new(4, 3);
/// img.set(1, 2, 1).unwrap();
/// assert_eq!(img.get(1, 2), Some(1));
/// assert_eq!(img.get(4, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gray<T> {
    /// Pixel buffer; may be longer than the image needs after a reshape
    data: Vec<T>,
    width: usize,
    height: usize,
    offset: usize,
    stride: usize,
}

impl<T: Copy + Default> Gray<T> {
    /// Create a new image filled with `T::default()`.
    ///
    /// Zero sized images are allowed; they are typically reshaped later.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![T::default(); width * height],
            width,
            height,
            offset: 0,
            stride: width,
        }
    }

    /// Create an image from a row-major buffer of exactly `width * height`
    /// pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the buffer length is wrong.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::LengthMismatch {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            offset: 0,
            stride: width,
        })
    }

    /// Create an image from a list of equally long rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if a row differs in length from the
    /// first one.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::LengthMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            width,
            height,
            offset: 0,
            stride: width,
        })
    }

    /// Wrap an existing buffer with an arbitrary offset and stride.
    ///
    /// # Errors
    ///
    /// Returns an error if `stride < width` or the buffer is too short for
    /// the described layout.
    pub fn from_raw_parts(
        data: Vec<T>,
        width: usize,
        height: usize,
        offset: usize,
        stride: usize,
    ) -> Result<Self> {
        check_layout(data.len(), width, height, offset, stride)?;
        Ok(Self {
            data,
            width,
            height,
            offset,
            stride,
        })
    }

    /// Change the image shape.
    ///
    /// Nothing happens when the shape is unchanged. Otherwise the layout is
    /// reset to `offset == 0` and `stride == width`, the buffer only grows,
    /// and pixel values are unspecified afterwards.
    pub fn reshape(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        let required = width * height;
        if self.data.len() < required {
            self.data.resize(required, T::default());
        }
        self.width = width;
        self.height = height;
        self.offset = 0;
        self.stride = width;
    }

    /// Consume the image and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Copy> GrayImage for Gray<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    fn data(&self) -> &[T] {
        &self.data
    }
}
