//! Decoded camera frames and the sample grid the pipeline walks.
//!
//! A [`Frame`] is immutable once built. Buffer sizes are validated at
//! construction so the analysis stages can index without further checks.
//!
//! Subsampled luma-chroma frames are analysed on the chroma lattice: every
//! sample point pairs the luma at `(sx·step_x, sy·step_y)` with the chroma
//! sample at plane position `(sx, sy)`. Chroma is never upsampled.
use crate::color::{unpremultiply, Pixel};
use crate::error::{AnalysisError, Result};
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

/// How the fourth channel of a packed RGBA frame is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlphaMode {
    /// Three channels per pixel, no alpha.
    Opaque,
    /// Four channels, color not scaled by alpha.
    Straight,
    /// Four channels, color already multiplied by alpha.
    Premultiplied,
}

impl AlphaMode {
    fn channels(self) -> usize {
        match self {
            AlphaMode::Opaque => 3,
            AlphaMode::Straight | AlphaMode::Premultiplied => 4,
        }
    }
}

/// Chroma plane subsampling of a luma-chroma frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChromaSubsampling {
    #[serde(rename = "4:4:4")]
    Yuv444,
    #[serde(rename = "4:2:2")]
    Yuv422,
    #[serde(rename = "4:2:0")]
    Yuv420,
}

impl ChromaSubsampling {
    /// Horizontal and vertical pixel step between chroma samples.
    pub fn steps(self) -> (usize, usize) {
        match self {
            ChromaSubsampling::Yuv444 => (1, 1),
            ChromaSubsampling::Yuv422 => (2, 1),
            ChromaSubsampling::Yuv420 => (2, 2),
        }
    }

    /// Chroma plane dimensions for a `width × height` frame.
    pub fn chroma_dims(self, width: usize, height: usize) -> (usize, usize) {
        let (sx, sy) = self.steps();
        (width.div_ceil(sx), height.div_ceil(sy))
    }
}

/// Lattice of sample points analysed by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleGrid {
    pub width: usize,
    pub height: usize,
    /// Frame pixels between horizontally adjacent samples.
    pub step_x: usize,
    /// Frame pixels between vertically adjacent samples.
    pub step_y: usize,
}

#[derive(Clone, Debug)]
pub struct PackedFrame {
    width: usize,
    height: usize,
    alpha: AlphaMode,
    data: Vec<u8>,
}

impl PackedFrame {
    #[inline]
    fn rgb_at(&self, x: usize, y: usize) -> [u8; 3] {
        let ch = self.alpha.channels();
        let i = (y * self.width + x) * ch;
        let px = &self.data[i..i + ch];
        match self.alpha {
            AlphaMode::Premultiplied => unpremultiply([px[0], px[1], px[2], px[3]]),
            AlphaMode::Opaque | AlphaMode::Straight => [px[0], px[1], px[2]],
        }
    }
}

#[derive(Clone, Debug)]
pub struct YCbCrFrame {
    width: usize,
    height: usize,
    subsampling: ChromaSubsampling,
    chroma_w: usize,
    y: Vec<u8>,
    cb: Vec<u8>,
    cr: Vec<u8>,
}

impl YCbCrFrame {
    /// Sample at chroma-lattice position `(sx, sy)`.
    #[inline]
    fn sample(&self, sx: usize, sy: usize) -> [u8; 3] {
        let (step_x, step_y) = self.subsampling.steps();
        let luma = self.y[sy * step_y * self.width + sx * step_x];
        let c = sy * self.chroma_w + sx;
        [luma, self.cb[c], self.cr[c]]
    }

    /// Luma at `(x, y)` with the chroma of the block containing it.
    #[inline]
    fn pixel_at(&self, x: usize, y: usize) -> [u8; 3] {
        let (step_x, step_y) = self.subsampling.steps();
        let c = (y / step_y) * self.chroma_w + x / step_x;
        [self.y[y * self.width + x], self.cb[c], self.cr[c]]
    }
}

#[derive(Clone, Debug)]
pub struct LumaFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// One decoded frame in one of the supported color models.
#[derive(Clone, Debug)]
pub enum Frame {
    Packed(PackedFrame),
    YCbCr(YCbCrFrame),
    Luma(LumaFrame),
}

fn check_dims(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(AnalysisError::EmptyFrame { width, height });
    }
    Ok(())
}

fn check_len(plane: &'static str, expected: usize, data: &[u8]) -> Result<()> {
    if data.len() != expected {
        return Err(AnalysisError::BufferSize {
            plane,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

impl Frame {
    /// Packed 8-bit RGB, three bytes per pixel.
    pub fn rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::packed(width, height, AlphaMode::Opaque, data)
    }

    /// Packed 8-bit RGBA with the given alpha interpretation.
    pub fn rgba(width: usize, height: usize, data: Vec<u8>, alpha: AlphaMode) -> Result<Self> {
        if alpha == AlphaMode::Opaque {
            return Err(AnalysisError::UnsupportedColorModel(
                "four-channel buffer declared without alpha".to_string(),
            ));
        }
        Self::packed(width, height, alpha, data)
    }

    fn packed(width: usize, height: usize, alpha: AlphaMode, data: Vec<u8>) -> Result<Self> {
        check_dims(width, height)?;
        check_len("packed", width * height * alpha.channels(), &data)?;
        Ok(Frame::Packed(PackedFrame {
            width,
            height,
            alpha,
            data,
        }))
    }

    /// Planar luma-chroma frame. Chroma planes must match
    /// [`ChromaSubsampling::chroma_dims`].
    pub fn ycbcr(
        width: usize,
        height: usize,
        subsampling: ChromaSubsampling,
        y: Vec<u8>,
        cb: Vec<u8>,
        cr: Vec<u8>,
    ) -> Result<Self> {
        check_dims(width, height)?;
        check_len("luma", width * height, &y)?;
        let (chroma_w, chroma_h) = subsampling.chroma_dims(width, height);
        check_len("cb", chroma_w * chroma_h, &cb)?;
        check_len("cr", chroma_w * chroma_h, &cr)?;
        Ok(Frame::YCbCr(YCbCrFrame {
            width,
            height,
            subsampling,
            chroma_w,
            y,
            cb,
            cr,
        }))
    }

    /// Single-channel 8-bit intensity.
    pub fn luma(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_dims(width, height)?;
        check_len("luma", width * height, &data)?;
        Ok(Frame::Luma(LumaFrame {
            width,
            height,
            data,
        }))
    }

    /// Adopt a decoded image. Only 8-bit gray, RGB and RGBA are accepted.
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        let (w, h) = (img.width() as usize, img.height() as usize);
        match img {
            DynamicImage::ImageLuma8(buf) => Self::luma(w, h, buf.as_raw().clone()),
            DynamicImage::ImageRgb8(buf) => Self::rgb(w, h, buf.as_raw().clone()),
            DynamicImage::ImageRgba8(buf) => {
                Self::rgba(w, h, buf.as_raw().clone(), AlphaMode::Straight)
            }
            other => Err(AnalysisError::UnsupportedColorModel(format!(
                "{:?}",
                other.color()
            ))),
        }
    }

    /// Reinterpret RGB data as luma-chroma: R→Y, G→Cb, B→Cr in a 4:2:0
    /// frame. The height is truncated to an even number of rows and each
    /// chroma sample comes from the bottom-right pixel of its 2×2 block (the
    /// last column of the block for odd widths).
    pub fn pack_as_ycbcr420(rgb: &RgbImage) -> Result<Self> {
        let width = rgb.width() as usize;
        let height = rgb.height() as usize & !1;
        check_dims(width, height)?;
        let (chroma_w, chroma_h) = ChromaSubsampling::Yuv420.chroma_dims(width, height);
        let mut y = vec![0u8; width * height];
        let mut cb = vec![0u8; chroma_w * chroma_h];
        let mut cr = vec![0u8; chroma_w * chroma_h];
        for py in 0..height {
            for px in 0..width {
                let [r, g, b] = rgb.get_pixel(px as u32, py as u32).0;
                y[py * width + px] = r;
                // scan order: the last pixel of each block owns its chroma
                let c = (py / 2) * chroma_w + px / 2;
                cb[c] = g;
                cr[c] = b;
            }
        }
        Self::ycbcr(width, height, ChromaSubsampling::Yuv420, y, cb, cr)
    }

    pub fn width(&self) -> usize {
        match self {
            Frame::Packed(f) => f.width,
            Frame::YCbCr(f) => f.width,
            Frame::Luma(f) => f.width,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Frame::Packed(f) => f.height,
            Frame::YCbCr(f) => f.height,
            Frame::Luma(f) => f.height,
        }
    }

    pub fn model_name(&self) -> &'static str {
        match self {
            Frame::Packed(f) if f.alpha == AlphaMode::Opaque => "rgb",
            Frame::Packed(_) => "rgba",
            Frame::YCbCr(_) => "ycbcr",
            Frame::Luma(_) => "luma",
        }
    }

    pub fn sample_grid(&self) -> SampleGrid {
        match self {
            Frame::YCbCr(f) => {
                let (step_x, step_y) = f.subsampling.steps();
                let (width, height) = f.subsampling.chroma_dims(f.width, f.height);
                SampleGrid {
                    width,
                    height,
                    step_x,
                    step_y,
                }
            }
            _ => SampleGrid {
                width: self.width(),
                height: self.height(),
                step_x: 1,
                step_y: 1,
            },
        }
    }

    /// Pixel at sample-grid position `(sx, sy)`.
    pub fn sample(&self, sx: usize, sy: usize) -> Pixel {
        match self {
            Frame::Packed(f) => Pixel::Rgb(f.rgb_at(sx, sy)),
            Frame::YCbCr(f) => Pixel::YCbCr(f.sample(sx, sy)),
            Frame::Luma(f) => Pixel::Luma(f.data[sy * f.width + sx]),
        }
    }

    /// Pixel at frame coordinates `(x, y)`.
    pub fn pixel_at(&self, x: usize, y: usize) -> Pixel {
        match self {
            Frame::Packed(f) => Pixel::Rgb(f.rgb_at(x, y)),
            Frame::YCbCr(f) => Pixel::YCbCr(f.pixel_at(x, y)),
            Frame::Luma(f) => Pixel::Luma(f.data[y * f.width + x]),
        }
    }

    /// Visit every sample of the grid with a typed accessor. The color model
    /// is matched once; `visit` is monomorphized per model.
    pub fn with_sampler<V: SamplerVisitor>(&self, visit: V) -> V::Output {
        match self {
            Frame::Packed(f) => visit.visit_triplets(|x, y| f.rgb_at(x, y)),
            Frame::YCbCr(f) => visit.visit_triplets(|x, y| f.sample(x, y)),
            Frame::Luma(f) => visit.visit_luma(|x, y| f.data[y * f.width + x]),
        }
    }
}

/// Receives a per-model sample accessor from [`Frame::with_sampler`].
pub trait SamplerVisitor {
    type Output;

    fn visit_triplets<F: Fn(usize, usize) -> [u8; 3]>(self, fetch: F) -> Self::Output;
    fn visit_luma<F: Fn(usize, usize) -> u8>(self, fetch: F) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, Rgb};

    #[test]
    fn raw_buffers_are_validated() {
        assert!(Frame::rgb(2, 2, vec![0; 12]).is_ok());
        assert_eq!(
            Frame::rgb(2, 2, vec![0; 11]).unwrap_err(),
            AnalysisError::BufferSize {
                plane: "packed",
                expected: 12,
                actual: 11
            }
        );
        assert_eq!(
            Frame::luma(0, 3, Vec::new()).unwrap_err(),
            AnalysisError::EmptyFrame {
                width: 0,
                height: 3
            }
        );
        let chroma_err = Frame::ycbcr(
            5,
            3,
            ChromaSubsampling::Yuv420,
            vec![0; 15],
            vec![0; 6],
            vec![0; 5],
        )
        .unwrap_err();
        assert!(matches!(chroma_err, AnalysisError::BufferSize { plane: "cr", .. }));
    }

    #[test]
    fn unsupported_dynamic_models_are_rejected() {
        let img = DynamicImage::ImageLumaA8(GrayAlphaImage::new(4, 4));
        let err = Frame::from_dynamic(&img).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedColorModel(_)));
    }

    #[test]
    fn subsampled_grid_uses_chroma_resolution() {
        let frame = Frame::ycbcr(
            6,
            4,
            ChromaSubsampling::Yuv422,
            (0..24).collect(),
            vec![7; 12],
            vec![9; 12],
        )
        .unwrap();
        let grid = frame.sample_grid();
        assert_eq!((grid.width, grid.height, grid.step_x, grid.step_y), (3, 4, 2, 1));
        // sample (2, 1) reads luma at pixel (4, 1)
        assert_eq!(frame.sample(2, 1), Pixel::YCbCr([10, 7, 9]));
        assert_eq!(frame.pixel_at(5, 1), Pixel::YCbCr([11, 7, 9]));
    }

    #[test]
    fn premultiplied_rgba_is_unpremultiplied() {
        let frame = Frame::rgba(1, 1, vec![64, 32, 0, 128], AlphaMode::Premultiplied).unwrap();
        assert_eq!(frame.sample(0, 0), Pixel::Rgb([128, 64, 0]));
        let straight = Frame::rgba(1, 1, vec![64, 32, 0, 128], AlphaMode::Straight).unwrap();
        assert_eq!(straight.sample(0, 0), Pixel::Rgb([64, 32, 0]));
    }

    #[test]
    fn rgb_packs_into_420_with_even_height() {
        let mut rgb = RgbImage::new(4, 3);
        rgb.put_pixel(0, 0, Rgb([10, 20, 30]));
        rgb.put_pixel(1, 0, Rgb([11, 21, 31]));
        rgb.put_pixel(0, 1, Rgb([12, 22, 32]));
        rgb.put_pixel(1, 1, Rgb([13, 23, 33]));
        // row 2 is dropped and cannot leak into the chroma planes
        rgb.put_pixel(1, 2, Rgb([99, 99, 99]));
        let frame = Frame::pack_as_ycbcr420(&rgb).unwrap();
        assert_eq!((frame.width(), frame.height()), (4, 2));
        assert_eq!(frame.pixel_at(0, 0), Pixel::YCbCr([10, 23, 33]));
        assert_eq!(frame.pixel_at(1, 0), Pixel::YCbCr([11, 23, 33]));
        assert_eq!(frame.pixel_at(0, 1), Pixel::YCbCr([12, 23, 33]));
        assert_eq!(frame.model_name(), "ycbcr");
    }

    #[test]
    fn odd_width_chroma_comes_from_last_column() {
        let mut rgb = RgbImage::new(3, 2);
        rgb.put_pixel(2, 0, Rgb([1, 2, 3]));
        rgb.put_pixel(2, 1, Rgb([4, 5, 6]));
        let frame = Frame::pack_as_ycbcr420(&rgb).unwrap();
        assert_eq!(frame.sample_grid().width, 2);
        assert_eq!(frame.pixel_at(2, 0), Pixel::YCbCr([1, 5, 6]));
        assert_eq!(frame.sample(1, 0), Pixel::YCbCr([1, 5, 6]));
    }
}
