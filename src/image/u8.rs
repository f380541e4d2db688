//! Owned single-channel 8-bit image in row-major layout (stride == width).
//!
//! Holds gradient magnitudes and binarized edge maps. Line-oriented stages
//! access it through [`ImageView`]/[`ImageViewMut`] rows or the flat slice.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageU8 {
    /// Image width in samples
    pub w: usize,
    /// Image height in samples
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl ImageU8 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Wrap an existing buffer. Panics when `data.len() != w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), w * h, "buffer does not match {w}x{h}");
        Self { w, h, data }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Mutable row iterator; empty when the image has zero width.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let w = self.w.max(1);
        let take = if self.w == 0 { 0 } else { self.h };
        self.data.chunks_exact_mut(w).take(take)
    }

    /// Copy out column `x` top to bottom.
    pub fn column(&self, x: usize) -> Vec<u8> {
        (0..self.h).map(|y| self.data[y * self.w + x]).collect()
    }

    /// Count of non-zero samples in row `y`.
    pub fn row_on_count(&self, y: usize) -> usize {
        self.row(y).iter().filter(|&&v| v != 0).count()
    }
}

impl ImageView for ImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
