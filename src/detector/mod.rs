//! Track detector: edge estimation followed by horizon estimation.
//!
//! Overview
//! - Builds a horizontal-neighbour color-difference image over the whole
//!   frame, stretches each row and binarizes it. Rows that do not show exactly
//!   two edge runs are treated as noise and cleared.
//! - Aggregates the cleaned map per column through a sliding stripe window;
//!   two surviving runs are the left and right track edges.
//! - Within the band between the edges, repeats the procedure row-wise with a
//!   vertical-neighbour difference to list horizon candidates, then keeps the
//!   candidate whose midpoint row best matches the track surface color.
//!
//! Modules
//! - [`params`] – thresholds and stripe divisor, loadable from JSON.
//! - [`track_edges`] – the column-wise pass.
//! - [`horizon`] – the row-wise pass and candidate selection.
//! - `pipeline` – the [`TrackDetector`] entry point.
//!
//! Both passes report through [`crate::diagnostics`]; unresolved edges and an
//! undetermined horizon surface as `None`, never as errors.

pub mod horizon;
pub mod params;
mod pipeline;
pub mod track_edges;

pub use horizon::{estimate_horizon, horizon_map, HorizonEstimate};
pub use params::TrackParams;
pub use pipeline::{TrackDetector, HORIZON_STAGE, TRACK_EDGES_STAGE};
pub use track_edges::{edge_map, estimate_track_edges, EdgeMap, TrackEdgeEstimate};
