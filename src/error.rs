//! Error type shared by frame construction and the analysis pipeline.

/// Errors surfaced while building a [`Frame`](crate::image::Frame) or
/// comparing pixels.
///
/// Unresolved track edges and an undetermined horizon are not errors; they are
/// reported as `None` in [`TrackResult`](crate::types::TrackResult).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("unsupported color model: {0}")]
    UnsupportedColorModel(String),
    #[error("cannot compare a {left} pixel with a {right} pixel")]
    ColorModelMismatch {
        left: &'static str,
        right: &'static str,
    },
    #[error("{plane} buffer holds {actual} bytes, expected {expected}")]
    BufferSize {
        plane: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("frame dimensions must be non-zero (got {width}x{height})")]
    EmptyFrame { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
