//! I/O helpers for frames, debug images and JSON.
//!
//! - `load_frame`: decode a PNG/JPEG/etc. into a [`Frame`], optionally
//!   reinterpreting the RGB data as 4:2:0 luma-chroma.
//! - `save_gray_u8`: write an [`ImageU8`] (gradient or binary map) to a PNG.
//! - `save_rgba`: write an overlay canvas to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Frame, ImageU8};
use image::{GrayImage, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decoded input: the frame under analysis plus an RGBA copy for drawing.
pub struct LoadedFrame {
    pub frame: Frame,
    pub canvas: RgbaImage,
}

/// Load an image from disk and wrap it as a [`Frame`].
///
/// 16-bit and float images are narrowed to 8 bits first; with
/// `treat_as_ycbcr` the RGB channels are packed into Y, Cb and Cr planes.
pub fn load_frame(path: &Path, treat_as_ycbcr: bool) -> Result<LoadedFrame, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let canvas = img.to_rgba8();
    let converted = if treat_as_ycbcr {
        Frame::pack_as_ycbcr420(&img.to_rgb8())
    } else {
        match img.color() {
            image::ColorType::L8 | image::ColorType::Rgb8 | image::ColorType::Rgba8 => {
                Frame::from_dynamic(&img)
            }
            image::ColorType::L16 => Frame::from_dynamic(&img.to_luma8().into()),
            image::ColorType::Rgba16 | image::ColorType::Rgba32F => {
                Frame::from_dynamic(&img.to_rgba8().into())
            }
            _ => Frame::from_dynamic(&img.to_rgb8().into()),
        }
    };
    let frame = converted.map_err(|e| format!("Cannot analyse {}: {e}", path.display()))?;
    Ok(LoadedFrame { frame, canvas })
}

/// Save an 8-bit single-channel buffer to a grayscale PNG.
pub fn save_gray_u8(image: &ImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let out = GrayImage::from_raw(image.w as u32, image.h as u32, image.data.clone())
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an RGBA canvas (e.g. with the track overlay drawn) to disk.
pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
