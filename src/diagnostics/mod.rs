//! Diagnostics data model exposed by the detector and the demo tool.
//!
//! `DetectionReport` is the entry point returned by
//! `TrackDetector::process_with_diagnostics`, bundling the plain
//! [`TrackResult`](crate::types::TrackResult) with a `PipelineTrace` that
//! records what every stage saw.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{DetectionReport, InputDescriptor, PipelineTrace};
pub use stages::{HorizonCandidate, HorizonStage, TrackEdgeStage};
pub use timing::{BenchSummary, StageTiming, TimingBreakdown};
