#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod overlay;
pub mod types;

// Analysis primitives; public for tools and tests.
pub mod color;
pub mod edges;
pub mod runs;
pub mod stripes;

// Demo tool configuration.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{TrackDetector, TrackParams};
pub use crate::error::{AnalysisError, Result};
pub use crate::image::Frame;
pub use crate::types::{Horizon, Target, TrackResult};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use track_finder::prelude::*;
///
/// # fn main() -> Result<(), AnalysisError> {
/// let (w, h) = (320usize, 240usize);
/// let frame = Frame::luma(w, h, vec![0u8; w * h])?;
///
/// let det = TrackDetector::new(TrackParams::default());
/// let res = det.process(&frame)?;
/// println!("found={} latency_ms={:.3}", res.found(), res.latency_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::color::Pixel;
    pub use crate::image::{ChromaSubsampling, Frame};
    pub use crate::{AnalysisError, TrackDetector, TrackParams, TrackResult};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::detector::{
        edge_map, estimate_horizon, estimate_track_edges, horizon_map, EdgeMap, HorizonEstimate,
        TrackEdgeEstimate,
    };

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        BenchSummary, HorizonCandidate, HorizonStage, InputDescriptor, StageTiming,
        TimingBreakdown, TrackEdgeStage,
    };
}
