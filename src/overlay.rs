//! Translucent overlay marking the detected track band.
//!
//! The band spans the two track edges horizontally and runs from the top of
//! the canvas down to the horizon row, or the full height when the horizon is
//! undetermined. Nothing is drawn when the edges are unresolved.
use crate::types::TrackResult;
use image::{Pixel as _, Rgba, RgbaImage};

/// Half-transparent dark red.
pub const OVERLAY_COLOR: Rgba<u8> = Rgba([0x80, 0x00, 0x00, 0x80]);

/// Blend the overlay band into `canvas`. Returns `false` when there was
/// nothing to draw.
pub fn draw_track_overlay(canvas: &mut RgbaImage, result: &TrackResult) -> bool {
    let Some(target) = result.target else {
        return false;
    };
    let (w, h) = (canvas.width() as usize, canvas.height() as usize);
    let x0 = target.left.min(w);
    let x1 = target.right.min(w);
    let y1 = result.horizon.map_or(h, |hz| hz.row(h));

    for y in 0..y1 {
        for x in x0..x1 {
            canvas.get_pixel_mut(x as u32, y as u32).blend(&OVERLAY_COLOR);
        }
    }
    x0 < x1 && y1 > 0
}
