use crate::edges::Roi;
use crate::runs::Run;
use serde::Serialize;

/// What the track-edge stage saw on its way to the x-range.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEdgeStage {
    pub gradient_width: usize,
    pub gradient_height: usize,
    /// Rows with exactly two runs after thresholding.
    pub rows_kept: usize,
    /// Rows zeroed by the noise filter.
    pub rows_rejected: usize,
    /// Normalized and thresholded per-column profile.
    pub profile: Vec<u8>,
    pub runs: Vec<Run>,
    pub resolved: bool,
    pub elapsed_ms: f64,
}

/// One horizon candidate and its color distance to the target.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonCandidate {
    pub run: Run,
    /// Sample-grid row the color comparison ran along.
    pub row: usize,
    pub mean_delta: u8,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonStage {
    pub roi: Roi,
    /// Normalized and thresholded per-row profile.
    pub profile: Vec<u8>,
    pub candidates: Vec<HorizonCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen: Option<usize>,
    pub elapsed_ms: f64,
}
