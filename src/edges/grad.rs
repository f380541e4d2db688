//! Color-difference gradients between adjacent samples.
//!
//! - [`GradientDirection::Horizontal`] compares each sample with its right
//!   neighbour. Vertical boundaries (track edges) light up; the output is one
//!   column shorter than the region.
//! - [`GradientDirection::Vertical`] compares each sample with the one below.
//!   Horizontal boundaries (the horizon) light up; the output is one row
//!   shorter than the region.
//!
//! Magnitudes come from [`crate::color`] and are unsigned. The color model is
//! matched once per pass and the inner loop is monomorphized per model.
//!
//! Complexity: O(W·H) per pass, one output byte per sample pair.
use crate::color::{luma_delta, triplet_delta};
use crate::image::{Frame, ImageU8, ImageViewMut, SampleGrid, SamplerVisitor};
use serde::Serialize;
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientDirection {
    /// Neighbour one step right.
    Horizontal,
    /// Neighbour one step down.
    Vertical,
}

/// Axis-aligned region in frame pixel coordinates, half-open on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Roi {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Roi {
    pub fn full(frame: &Frame) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: frame.width(),
            y1: frame.height(),
        }
    }

    /// Full-height band between two columns.
    pub fn columns(x0: usize, x1: usize, height: usize) -> Self {
        Self {
            x0,
            y0: 0,
            x1,
            y1: height,
        }
    }

    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    /// Sample-grid ranges covered by this region, clamped to the grid.
    pub fn to_grid(&self, grid: &SampleGrid) -> (Range<usize>, Range<usize>) {
        let clamp = |start: usize, end: usize, step: usize, len: usize| {
            let s = (start / step).min(len);
            let e = end.div_ceil(step).min(len).max(s);
            s..e
        };
        (
            clamp(self.x0, self.x1, grid.step_x, grid.width),
            clamp(self.y0, self.y1, grid.step_y, grid.height),
        )
    }
}

/// Gradient over the whole frame.
pub fn gradient(frame: &Frame, direction: GradientDirection) -> ImageU8 {
    gradient_roi(frame, direction, Roi::full(frame))
}

/// Gradient restricted to `roi`; output covers the region's sample grid.
pub fn gradient_roi(frame: &Frame, direction: GradientDirection, roi: Roi) -> ImageU8 {
    let (xs, ys) = roi.to_grid(&frame.sample_grid());
    frame.with_sampler(GradientPass { direction, xs, ys })
}

struct GradientPass {
    direction: GradientDirection,
    xs: Range<usize>,
    ys: Range<usize>,
}

impl SamplerVisitor for GradientPass {
    type Output = ImageU8;

    fn visit_triplets<F: Fn(usize, usize) -> [u8; 3]>(self, fetch: F) -> ImageU8 {
        self.run(fetch, triplet_delta)
    }

    fn visit_luma<F: Fn(usize, usize) -> u8>(self, fetch: F) -> ImageU8 {
        self.run(fetch, luma_delta)
    }
}

impl GradientPass {
    fn run<T, F, D>(self, fetch: F, delta: D) -> ImageU8
    where
        T: Copy,
        F: Fn(usize, usize) -> T,
        D: Fn(T, T) -> u8,
    {
        let (w, h) = (self.xs.len(), self.ys.len());
        let (ow, oh) = match self.direction {
            GradientDirection::Horizontal => (w.saturating_sub(1), h),
            GradientDirection::Vertical => (w, h.saturating_sub(1)),
        };
        let mut out = ImageU8::new(ow, oh);
        if ow == 0 || oh == 0 {
            return out;
        }

        let x0 = self.xs.start;
        for oy in 0..oh {
            let sy = self.ys.start + oy;
            let dst = out.row_mut(oy);
            match self.direction {
                GradientDirection::Horizontal => {
                    let mut prev = fetch(x0, sy);
                    for (ox, px) in dst.iter_mut().enumerate() {
                        let next = fetch(x0 + ox + 1, sy);
                        *px = delta(prev, next);
                        prev = next;
                    }
                }
                GradientDirection::Vertical => {
                    for (ox, px) in dst.iter_mut().enumerate() {
                        let x = x0 + ox;
                        *px = delta(fetch(x, sy), fetch(x, sy + 1));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ChromaSubsampling, ImageView};

    fn luma_step_x(w: usize, h: usize, split: usize) -> Frame {
        let mut data = vec![10u8; w * h];
        for y in 0..h {
            for x in split..w {
                data[y * w + x] = 90;
            }
        }
        Frame::luma(w, h, data).unwrap()
    }

    #[test]
    fn horizontal_gradient_marks_vertical_edge() {
        let frame = luma_step_x(8, 3, 5);
        let g = gradient(&frame, GradientDirection::Horizontal);
        assert_eq!((g.w, g.h), (7, 3));
        for row in g.rows() {
            assert_eq!(row, &[0, 0, 0, 0, 80, 0, 0]);
        }
    }

    #[test]
    fn vertical_gradient_is_one_row_shorter() {
        let frame = luma_step_x(8, 3, 5);
        let g = gradient(&frame, GradientDirection::Vertical);
        assert_eq!((g.w, g.h), (8, 2));
        assert!(g.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn roi_restricts_columns() {
        let mut data = vec![0u8; 6 * 4];
        for x in 0..6 {
            data[2 * 6 + x] = 50;
            data[3 * 6 + x] = 50;
        }
        let frame = Frame::luma(6, 4, data).unwrap();
        let g = gradient_roi(&frame, GradientDirection::Vertical, Roi::columns(2, 5, 4));
        assert_eq!((g.w, g.h), (3, 3));
        assert_eq!(g.row(1), &[50, 50, 50]);
        assert_eq!(g.row(0), &[0, 0, 0]);
    }

    #[test]
    fn subsampled_frames_step_by_chroma_ratio() {
        let (w, h) = (8, 4);
        let y: Vec<u8> = (0..w * h).map(|i| if i % w >= 4 { 200 } else { 0 }).collect();
        let frame = Frame::ycbcr(
            w,
            h,
            ChromaSubsampling::Yuv420,
            y,
            vec![128; 8],
            vec![128; 8],
        )
        .unwrap();
        let g = gradient(&frame, GradientDirection::Horizontal);
        assert_eq!((g.w, g.h), (3, 2));
        // luma jumps between pixel 2 and pixel 4, i.e. samples 1 and 2
        assert_eq!(g.row(0)[0], 0);
        assert!(g.row(0)[1] > 0);
        assert_eq!(g.row(0)[2], 0);
    }

    #[test]
    fn single_column_frame_yields_empty_gradient() {
        let frame = Frame::luma(1, 5, vec![3; 5]).unwrap();
        let g = gradient(&frame, GradientDirection::Horizontal);
        assert!(g.is_empty());
    }
}
