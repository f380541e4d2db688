use crate::color::Pixel;
use crate::runs::Run;
use serde::Serialize;

/// Track band found in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Left track edge, frame column.
    pub left: usize,
    /// Right track edge, frame column.
    pub right: usize,
    /// Reference surface color sampled between the edges at half height.
    pub color: Pixel,
}

impl Target {
    pub fn center_x(&self) -> usize {
        (self.left + self.right) / 2
    }
}

/// Horizon candidate selected by color similarity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Horizon {
    /// Horizon height as a fraction of the frame, in `[0, 1)`.
    pub fraction: f32,
    /// Winning run in profile coordinates.
    pub run: Run,
    /// Mean color distance between the run's midpoint row and the target.
    pub mean_delta: u8,
}

impl Horizon {
    /// Horizon row in a canvas of `height` pixels.
    pub fn row(&self, height: usize) -> usize {
        ((self.fraction * height as f32) as usize).min(height)
    }
}

/// Per-frame analysis result.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResult {
    /// `None` when the edges are unresolved (not exactly two).
    pub target: Option<Target>,
    /// `None` when there is no target or no horizon candidate.
    pub horizon: Option<Horizon>,
    pub latency_ms: f64,
}

impl TrackResult {
    pub fn found(&self) -> bool {
        self.target.is_some()
    }
}
