//! Parameter types configuring the detector stages.
//!
//! The defaults are the fixed values the pipeline was tuned with; they are
//! exposed so tools can experiment without patching the constants.

use crate::edges::BINARY_THRESHOLD;
use crate::stripes::STRIPE_DIVISOR;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackParams {
    /// Cutoff used for every binarization step.
    pub binary_threshold: u8,
    /// Line count divisor giving the stripe height of the aggregation window.
    pub stripe_divisor: usize,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            binary_threshold: BINARY_THRESHOLD,
            stripe_divisor: STRIPE_DIVISOR,
        }
    }
}
