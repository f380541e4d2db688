//! Horizon estimation inside the track band.
//!
//! The band between the two track edges is scanned for horizontal
//! boundaries. Several candidates are common (tape joints, shadows, the far
//! wall); the winner is the one whose midpoint row is closest in color to
//! the target surface color. Ties keep the first candidate in scan order.
use super::params::TrackParams;
use crate::color::{color_delta, Pixel};
use crate::diagnostics::{HorizonCandidate, HorizonStage};
use crate::edges::{
    gradient_roi, normalize_lines, normalize_profile, threshold, GradientDirection, LineAxis, Roi,
};
use crate::error::Result;
use crate::image::{Frame, ImageU8};
use crate::runs::find_runs;
use crate::stripes::{find_horizontal_lines, Profile};
use crate::types::{Horizon, Target};
use log::debug;
use std::ops::Range;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct HorizonEstimate {
    /// `None` when no candidate survived (undetermined).
    pub horizon: Option<Horizon>,
    pub stage: HorizonStage,
}

/// Binary horizontal-edge map of the band, stretched per column.
pub fn horizon_map(frame: &Frame, roi: Roi, params: &TrackParams) -> ImageU8 {
    let mut image = gradient_roi(frame, GradientDirection::Vertical, roi);
    normalize_lines(&mut image, LineAxis::Columns);
    threshold(image.as_mut_slice(), params.binary_threshold);
    image
}

/// Per-row profile of [`horizon_map`], stretched and binarized.
pub fn horizon_profile(map: &ImageU8, params: &TrackParams) -> Profile {
    let mut profile = find_horizontal_lines(map, params.stripe_divisor);
    normalize_profile(profile.as_mut_slice());
    threshold(profile.as_mut_slice(), params.binary_threshold);
    profile
}

pub fn estimate_horizon(
    frame: &Frame,
    target: &Target,
    params: &TrackParams,
) -> Result<HorizonEstimate> {
    let start = Instant::now();
    let roi = Roi::columns(target.left, target.right, frame.height());
    let (xs, ys) = roi.to_grid(&frame.sample_grid());

    let map = horizon_map(frame, roi, params);
    let profile = horizon_profile(&map, params);
    let runs = find_runs(profile.as_slice());

    let mut candidates = Vec::with_capacity(runs.len());
    for run in runs {
        let row = ys.start + run.midpoint();
        let mean_delta = mean_row_delta(frame, target.color, row, xs.clone())?;
        candidates.push(HorizonCandidate {
            run,
            row,
            mean_delta,
        });
    }

    // first minimum wins
    let chosen = candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| c.mean_delta)
        .map(|(i, _)| i);

    let horizon = chosen.map(|i| {
        let c = &candidates[i];
        Horizon {
            fraction: ((c.run.span_sum() + 1) / 2) as f32 / profile.len() as f32,
            run: c.run,
            mean_delta: c.mean_delta,
        }
    });
    debug!(
        "horizon: roi=[{}, {}) profile_len={} candidates={:?} chosen={:?}",
        roi.x0,
        roi.x1,
        profile.len(),
        candidates.iter().map(|c| c.mean_delta).collect::<Vec<_>>(),
        chosen
    );

    Ok(HorizonEstimate {
        horizon,
        stage: HorizonStage {
            roi,
            profile: profile.values,
            candidates,
            chosen,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    })
}

/// Mean color distance between `reference` and sample-grid row `row`
/// over the given columns.
fn mean_row_delta(frame: &Frame, reference: Pixel, row: usize, cols: Range<usize>) -> Result<u8> {
    let count = cols.len();
    if count == 0 {
        return Ok(u8::MAX);
    }
    let mut sum = 0u32;
    for x in cols {
        sum += color_delta(reference, frame.sample(x, row))? as u32;
    }
    Ok((sum / count as u32) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKY: u8 = 30;
    const WALL: u8 = 120;
    const FLOOR: u8 = 220;

    /// Luma frame with horizontal bands: `(first_row, value)` pairs.
    fn banded(w: usize, h: usize, bands: &[(usize, u8)]) -> Frame {
        let mut data = vec![0u8; w * h];
        for y in 0..h {
            let v = bands
                .iter()
                .rev()
                .find(|(start, _)| y >= *start)
                .map(|&(_, v)| v)
                .unwrap_or(0);
            data[y * w..(y + 1) * w].fill(v);
        }
        Frame::luma(w, h, data).unwrap()
    }

    fn target_for(frame: &Frame, left: usize, right: usize) -> Target {
        Target {
            left,
            right,
            color: frame.pixel_at((left + right) / 2, frame.height() / 2),
        }
    }

    #[test]
    fn single_boundary_is_found() {
        let frame = banded(100, 120, &[(0, SKY), (40, FLOOR)]);
        let target = target_for(&frame, 20, 80);
        let est = estimate_horizon(&frame, &target, &TrackParams::default()).unwrap();
        let horizon = est.horizon.expect("horizon");
        let truth = 40.0 / 120.0;
        let stripe = (119 / 16) as f32 / 119.0;
        assert!(
            (horizon.fraction - truth).abs() <= stripe,
            "fraction={} truth={truth}",
            horizon.fraction
        );
        assert_eq!(est.stage.candidates.len(), 1);
    }

    #[test]
    fn closest_color_candidate_wins() {
        // reference color at half height is WALL; the WALL/FLOOR boundary
        // has a WALL-colored midpoint row, the SKY/WALL one does not
        let frame = banded(100, 120, &[(0, SKY), (30, WALL), (70, FLOOR)]);
        let target = target_for(&frame, 20, 80);
        assert_eq!(target.color, Pixel::Luma(WALL));
        let est = estimate_horizon(&frame, &target, &TrackParams::default()).unwrap();
        assert_eq!(est.stage.candidates.len(), 2);
        assert_eq!(est.stage.chosen, Some(1));
        let horizon = est.horizon.unwrap();
        assert_eq!(horizon.mean_delta, 0);
        assert!((horizon.fraction - 69.0 / 119.0).abs() < 1e-6);
    }

    #[test]
    fn equal_deltas_keep_first_candidate() {
        let frame = banded(100, 120, &[(0, 100), (30, 30), (60, 100), (90, 30)]);
        let target = target_for(&frame, 20, 80);
        assert_eq!(target.color, Pixel::Luma(100));
        let est = estimate_horizon(&frame, &target, &TrackParams::default()).unwrap();
        let deltas: Vec<u8> = est.stage.candidates.iter().map(|c| c.mean_delta).collect();
        assert_eq!(deltas, vec![0, 70, 0]);
        assert_eq!(est.stage.chosen, Some(0));
        assert!((est.horizon.unwrap().fraction - 29.0 / 119.0).abs() < 1e-6);
    }

    #[test]
    fn flat_band_is_undetermined() {
        let frame = banded(64, 64, &[(0, FLOOR)]);
        let target = target_for(&frame, 10, 50);
        let est = estimate_horizon(&frame, &target, &TrackParams::default()).unwrap();
        assert!(est.horizon.is_none());
        assert!(est.stage.candidates.is_empty());
        assert_eq!(est.stage.chosen, None);
    }

    #[test]
    fn empty_roi_is_undetermined() {
        let frame = banded(64, 64, &[(0, SKY), (20, FLOOR)]);
        let target = target_for(&frame, 30, 30);
        let est = estimate_horizon(&frame, &target, &TrackParams::default()).unwrap();
        assert!(est.horizon.is_none());
    }
}
