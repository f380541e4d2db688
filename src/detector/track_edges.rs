//! Track edge estimation: two vertical boundaries bounding the track.
//!
//! Stages
//! - Horizontal-neighbour gradient over the full frame.
//! - Per-row contrast stretch and binarization.
//! - Noise filter: rows that do not show exactly two runs are zeroed. Rows
//!   above or below the track tend to produce zero, one or many runs.
//! - Per-column stripe profile, stretched and binarized again.
//! - Exactly two profile runs give the edges; anything else is unresolved.
use super::params::TrackParams;
use crate::diagnostics::TrackEdgeStage;
use crate::edges::{
    gradient, normalize_lines, normalize_profile, threshold, GradientDirection, LineAxis,
};
use crate::image::{Frame, ImageU8};
use crate::runs::{find_runs, Run};
use crate::stripes::find_vertical_lines;
use log::debug;
use std::time::Instant;

/// Cleaned binary edge map: the input of the column aggregation.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub image: ImageU8,
    pub rows_kept: usize,
    pub rows_rejected: usize,
}

/// Outcome of the track-edge stage.
#[derive(Clone, Debug)]
pub struct TrackEdgeEstimate {
    /// `(left, right)` frame columns when exactly two edges were found.
    pub edges: Option<(usize, usize)>,
    pub stage: TrackEdgeStage,
}

/// Round up to the next even value.
#[inline]
pub fn round_up_even(v: usize) -> usize {
    (v + 1) & !1
}

/// Gradient → row stretch → threshold → two-run row filter.
pub fn edge_map(frame: &Frame, params: &TrackParams) -> EdgeMap {
    let mut image = gradient(frame, GradientDirection::Horizontal);
    normalize_lines(&mut image, LineAxis::Rows);
    threshold(image.as_mut_slice(), params.binary_threshold);

    let mut rows_kept = 0;
    let mut rows_rejected = 0;
    for row in image.rows_mut() {
        if find_runs(row).len() == 2 {
            rows_kept += 1;
        } else {
            row.fill(0);
            rows_rejected += 1;
        }
    }
    EdgeMap {
        image,
        rows_kept,
        rows_rejected,
    }
}

pub fn estimate_track_edges(frame: &Frame, params: &TrackParams) -> TrackEdgeEstimate {
    let start = Instant::now();
    let map = edge_map(frame, params);

    let mut profile = find_vertical_lines(&map.image, params.stripe_divisor);
    normalize_profile(profile.as_mut_slice());
    threshold(profile.as_mut_slice(), params.binary_threshold);
    let runs = find_runs(profile.as_slice());

    let step_x = frame.sample_grid().step_x;
    let edges = match runs.as_slice() {
        [a, b] => Some((
            edge_column(a, step_x, frame.width()),
            edge_column(b, step_x, frame.width()),
        )),
        _ => None,
    };
    debug!(
        "track edges: gradient {}x{} rows kept={} rejected={} runs={} edges={:?}",
        map.image.w,
        map.image.h,
        map.rows_kept,
        map.rows_rejected,
        runs.len(),
        edges
    );

    TrackEdgeEstimate {
        edges,
        stage: TrackEdgeStage {
            gradient_width: map.image.w,
            gradient_height: map.image.h,
            rows_kept: map.rows_kept,
            rows_rejected: map.rows_rejected,
            profile: profile.values,
            resolved: edges.is_some(),
            runs,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    }
}

/// Run midpoint mapped back to frame columns, rounded up to an even pixel.
fn edge_column(run: &Run, step_x: usize, width: usize) -> usize {
    round_up_even(run.span_sum() * step_x / 2).min(width)
}
