//! Perceptual color distance between two pixels of the same color model.
//!
//! Three-channel pixels use a weighted metric that favours green and adds a
//! red-dependent correction term:
//!
//! `sqrt(2·ΔR² + 4·ΔG² + 3·ΔB² + ΔR·(ΔR² − ΔB²)/256)`
//!
//! The result saturates to `u8`. Luma-chroma triplets run through the same
//! formula channel by channel; single-channel pixels use the absolute
//! difference.
use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// One pixel tagged with its color model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "model", content = "value", rename_all = "camelCase")]
pub enum Pixel {
    /// Straight (non-premultiplied) red, green, blue.
    Rgb([u8; 3]),
    /// Luma and the two chroma channels, in that order.
    YCbCr([u8; 3]),
    Luma(u8),
}

impl Pixel {
    pub fn model_name(&self) -> &'static str {
        match self {
            Pixel::Rgb(_) => "rgb",
            Pixel::YCbCr(_) => "ycbcr",
            Pixel::Luma(_) => "luma",
        }
    }
}

/// Distance between two pixels; pixels of different models are rejected.
pub fn color_delta(a: Pixel, b: Pixel) -> Result<u8> {
    match (a, b) {
        (Pixel::Rgb(a), Pixel::Rgb(b)) | (Pixel::YCbCr(a), Pixel::YCbCr(b)) => {
            Ok(triplet_delta(a, b))
        }
        (Pixel::Luma(a), Pixel::Luma(b)) => Ok(luma_delta(a, b)),
        (a, b) => Err(AnalysisError::ColorModelMismatch {
            left: a.model_name(),
            right: b.model_name(),
        }),
    }
}

/// Weighted distance between two three-channel samples.
#[inline]
pub fn triplet_delta(a: [u8; 3], b: [u8; 3]) -> u8 {
    let dr = a[0].abs_diff(b[0]) as i64;
    let dg = a[1].abs_diff(b[1]) as i64;
    let db = a[2].abs_diff(b[2]) as i64;
    let sum = 2 * dr * dr + 4 * dg * dg + 3 * db * db + dr * (dr * dr - db * db) / 256;
    if sum <= 0 {
        return 0;
    }
    ((sum as f64).sqrt() as u32).min(u8::MAX as u32) as u8
}

#[inline]
pub fn luma_delta(a: u8, b: u8) -> u8 {
    a.abs_diff(b)
}

/// Recover straight color from a premultiplied RGBA sample.
#[inline]
pub fn unpremultiply(rgba: [u8; 4]) -> [u8; 3] {
    let a = rgba[3] as u32;
    if a == 0 {
        return [0, 0, 0];
    }
    let un = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
    [un(rgba[0]), un(rgba[1]), un(rgba[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [[u8; 3]; 6] = [
        [0, 0, 0],
        [255, 255, 255],
        [200, 30, 30],
        [30, 200, 30],
        [30, 30, 200],
        [17, 128, 250],
    ];

    #[test]
    fn identical_pixels_have_zero_distance() {
        for &s in &SAMPLES {
            assert_eq!(color_delta(Pixel::Rgb(s), Pixel::Rgb(s)), Ok(0));
            assert_eq!(color_delta(Pixel::YCbCr(s), Pixel::YCbCr(s)), Ok(0));
            assert_eq!(color_delta(Pixel::Luma(s[1]), Pixel::Luma(s[1])), Ok(0));
        }
    }

    #[test]
    fn distance_is_symmetric() {
        for &a in &SAMPLES {
            for &b in &SAMPLES {
                assert_eq!(triplet_delta(a, b), triplet_delta(b, a), "{a:?} vs {b:?}");
                assert_eq!(luma_delta(a[0], b[0]), luma_delta(b[0], a[0]));
            }
        }
    }

    #[test]
    fn green_weighs_more_than_red_and_blue() {
        let base = [100, 100, 100];
        let red = triplet_delta(base, [140, 100, 100]);
        let green = triplet_delta(base, [100, 140, 100]);
        let blue = triplet_delta(base, [100, 100, 140]);
        assert!(green > blue && blue > red, "r={red} g={green} b={blue}");
        // sqrt(4 * 40^2) = 80
        assert_eq!(green, 80);
    }

    #[test]
    fn large_differences_saturate() {
        assert_eq!(triplet_delta([0, 0, 0], [255, 255, 255]), 255);
        assert_eq!(luma_delta(0, 255), 255);
    }

    #[test]
    fn mixed_models_are_rejected() {
        let err = color_delta(Pixel::Rgb([1, 2, 3]), Pixel::Luma(4)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ColorModelMismatch {
                left: "rgb",
                right: "luma"
            }
        );
    }

    #[test]
    fn unpremultiply_restores_straight_color() {
        assert_eq!(unpremultiply([64, 32, 0, 128]), [128, 64, 0]);
        assert_eq!(unpremultiply([10, 10, 10, 0]), [0, 0, 0]);
        assert_eq!(unpremultiply([12, 34, 56, 255]), [12, 34, 56]);
    }
}
