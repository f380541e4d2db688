//! Detector pipeline driving track analysis end-to-end.
//!
//! The [`TrackDetector`] exposes a simple API: feed a [`Frame`] and get the
//! track band plus, when it can be determined, the horizon height.
//!
//! Typical usage:
//! ```no_run
//! use track_finder::{Frame, TrackDetector, TrackParams};
//!
//! # fn example(frame: Frame) -> track_finder::Result<()> {
//! let detector = TrackDetector::new(TrackParams::default());
//! let report = detector.process_with_diagnostics(&frame)?;
//! if let Some(target) = report.result.target {
//!     println!("track [{}, {})", target.left, target.right);
//! }
//! # Ok(())
//! # }
//! ```
use super::horizon::estimate_horizon;
use super::params::TrackParams;
use super::track_edges::estimate_track_edges;
use crate::diagnostics::{DetectionReport, InputDescriptor, PipelineTrace, TimingBreakdown};
use crate::error::Result;
use crate::image::Frame;
use crate::types::{Target, TrackResult};
use image::DynamicImage;
use log::debug;
use std::time::Instant;

/// Stage label of the track-edge pass in [`TimingBreakdown`].
pub const TRACK_EDGES_STAGE: &str = "trackEdges";
/// Stage label of the horizon pass in [`TimingBreakdown`].
pub const HORIZON_STAGE: &str = "horizon";

/// Track detector chaining edge estimation into horizon estimation.
///
/// Holds only immutable parameters; a shared reference can analyse frames
/// from several threads.
#[derive(Clone, Debug, Default)]
pub struct TrackDetector {
    params: TrackParams,
}

impl TrackDetector {
    pub fn new(params: TrackParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TrackParams {
        &self.params
    }

    /// Analyse a frame, returning a compact result.
    pub fn process(&self, frame: &Frame) -> Result<TrackResult> {
        Ok(self.process_with_diagnostics(frame)?.result)
    }

    /// Convert a decoded image and analyse it.
    pub fn process_image(&self, img: &DynamicImage) -> Result<TrackResult> {
        let frame = Frame::from_dynamic(img)?;
        self.process(&frame)
    }

    /// Analyse a frame and return both the result and a detailed report.
    pub fn process_with_diagnostics(&self, frame: &Frame) -> Result<DetectionReport> {
        debug!(
            "TrackDetector::process start w={} h={} model={}",
            frame.width(),
            frame.height(),
            frame.model_name()
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let edges = estimate_track_edges(frame, &self.params);
        timings.push(TRACK_EDGES_STAGE, edges.stage.elapsed_ms);

        let target = edges.edges.map(|(left, right)| Target {
            left,
            right,
            color: frame.pixel_at(
                ((left + right) / 2).min(frame.width() - 1),
                frame.height() / 2,
            ),
        });

        let mut horizon = None;
        let mut horizon_stage = None;
        if let Some(target) = &target {
            let estimate = estimate_horizon(frame, target, &self.params)?;
            timings.push(HORIZON_STAGE, estimate.stage.elapsed_ms);
            horizon = estimate.horizon;
            horizon_stage = Some(estimate.stage);
        }

        let latency_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        timings.total_ms = latency_ms;
        debug!(
            "TrackDetector::process done target={:?} horizon={:?} latency_ms={:.3}",
            target.map(|t| (t.left, t.right)),
            horizon.map(|h| h.fraction),
            latency_ms
        );

        Ok(DetectionReport {
            result: TrackResult {
                target,
                horizon,
                latency_ms,
            },
            trace: PipelineTrace {
                input: InputDescriptor::of(frame),
                timings,
                track_edges: edges.stage,
                horizon: horizon_stage,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Pixel;

    fn track_frame(w: usize, h: usize, x0: usize, x1: usize, horizon_y: usize) -> Frame {
        let mut data = vec![0u8; w * h];
        for y in 0..h {
            for x in 0..w {
                data[y * w + x] = match (y >= horizon_y, (x0..x1).contains(&x)) {
                    (true, true) => 200,
                    (true, false) => 40,
                    (false, _) => 90,
                };
            }
        }
        Frame::luma(w, h, data).unwrap()
    }

    #[test]
    fn uniform_frame_is_unresolved() {
        let frame = Frame::luma(64, 48, vec![77; 64 * 48]).unwrap();
        let report = TrackDetector::default()
            .process_with_diagnostics(&frame)
            .unwrap();
        assert_eq!(report.result.target, None);
        assert_eq!(report.result.horizon, None);
        assert!(report.trace.horizon.is_none());
        assert_eq!(report.trace.timings.stage_ms(HORIZON_STAGE), None);
    }

    #[test]
    fn track_and_horizon_are_found() {
        let (w, h) = (160, 120);
        let frame = track_frame(w, h, 50, 110, 40);
        let report = TrackDetector::default()
            .process_with_diagnostics(&frame)
            .unwrap();
        let target = report.result.target.expect("target");
        assert!(target.left.abs_diff(50) <= 2, "left={}", target.left);
        assert!(target.right.abs_diff(110) <= 2, "right={}", target.right);
        assert_eq!(target.color, Pixel::Luma(200));
        assert!(report.trace.timings.stage_ms(TRACK_EDGES_STAGE).is_some());
        assert!(report.trace.timings.stage_ms(HORIZON_STAGE).is_some());
        assert_eq!(report.trace.input.color_model, "luma");
    }

    #[test]
    fn process_matches_diagnostics_result() {
        let frame = track_frame(160, 120, 50, 110, 40);
        let det = TrackDetector::new(TrackParams::default());
        let plain = det.process(&frame).unwrap();
        let full = det.process_with_diagnostics(&frame).unwrap().result;
        assert_eq!(plain.target, full.target);
        assert_eq!(plain.horizon, full.horizon);
    }
}
