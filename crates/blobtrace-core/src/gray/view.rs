//! Borrowed sub-image views

use super::{GrayImage, check_layout};
use crate::error::Result;

/// Read-only view of a strided region inside a borrowed buffer.
///
/// Created with [`GrayImage::sub_image`] or directly over a host buffer
/// with [`GrayView::new`]. No pixels are copied.
#[derive(Debug, Clone, Copy)]
pub struct GrayView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    offset: usize,
    stride: usize,
}

impl<'a, T: Copy> GrayView<'a, T> {
    /// Describe an image living inside `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if `stride < width` or `data` is too short.
    pub fn new(
        data: &'a [T],
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
}

impl<T: Copy> GrayImage for GrayView<'_, T> {
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
        self.data
    }
}
