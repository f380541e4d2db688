//! Fixed-cutoff binarization.

/// Samples at or above the cutoff become "on".
pub const BINARY_THRESHOLD: u8 = 128;

pub const ON: u8 = 255;
pub const OFF: u8 = 0;

/// Binarize in place: `v >= cutoff` → 255, else 0.
pub fn threshold(values: &mut [u8], cutoff: u8) {
    for v in values.iter_mut() {
        *v = if *v >= cutoff { ON } else { OFF };
    }
}
