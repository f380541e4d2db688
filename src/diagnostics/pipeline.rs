use crate::diagnostics::{HorizonStage, TimingBreakdown, TrackEdgeStage};
use crate::image::{Frame, SampleGrid};
use crate::types::TrackResult;
use serde::Serialize;

/// Result produced by [`TrackDetector::process_with_diagnostics`](crate::TrackDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub result: TrackResult,
    pub trace: PipelineTrace,
}

/// End-to-end trace describing the internal execution of the detector.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub track_edges: TrackEdgeStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizon: Option<HorizonStage>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub color_model: &'static str,
    pub sample_grid: SampleGrid,
}

impl InputDescriptor {
    pub fn of(frame: &Frame) -> Self {
        Self {
            width: frame.width(),
            height: frame.height(),
            color_model: frame.model_name(),
            sample_grid: frame.sample_grid(),
        }
    }
}
