//! Edge enhancement primitives: color-difference gradients, per-line
//! contrast stretch and binarization.
//!
//! The detector chains them as gradient → stretch → threshold, first across
//! columns (track edges) and then across rows inside the track band (horizon).
//! All stages allocate fresh buffers or work in place on buffers the caller
//! owns; the input frame is never touched.

pub mod contrast;
pub mod grad;
pub mod threshold;

pub use contrast::{
    expand_contrast, min_max_table, normalize_lines, normalize_profile, LineAxis, LineRange,
    MinMaxTable,
};
pub use grad::{gradient, gradient_roi, GradientDirection, Roi};
pub use threshold::{threshold, BINARY_THRESHOLD};
