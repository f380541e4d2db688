//! Stripe aggregation of binary edge maps into 1-D line profiles.
//!
//! A stripe is a sliding window of `lines / divisor` consecutive rows (or
//! columns). Entry `i` of the profile is the fraction of "on" samples inside
//! the stripe centred on line `i`, scaled to 0..=255:
//!
//! `255 · on_count(stripe) / (cross_len · stripe)`
//!
//! Bands that are mostly on across their whole stripe (a real boundary)
//! score high; isolated noise averages out. Lines closer than half a stripe
//! to either end have no full window and stay 0.
//!
//! Per-line counts are taken once and the window slides over them, so the
//! cost is one pass over the image plus O(lines).
use crate::image::{ImageU8, ImageView};
use serde::Serialize;

/// Divides the line count to obtain the stripe height.
pub const STRIPE_DIVISOR: usize = 16;

/// One 8-bit score per line of the source image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub values: Vec<u8>,
}

impl Profile {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.values
    }
}

/// Per-row profile: how much of each horizontal band is on.
pub fn find_horizontal_lines(img: &ImageU8, divisor: usize) -> Profile {
    let counts: Vec<usize> = (0..img.h).map(|y| img.row_on_count(y)).collect();
    aggregate(&counts, img.w, divisor)
}

/// Per-column profile: the transposed [`find_horizontal_lines`].
pub fn find_vertical_lines(img: &ImageU8, divisor: usize) -> Profile {
    let mut counts = vec![0usize; img.w];
    for row in img.rows() {
        for (c, &v) in counts.iter_mut().zip(row) {
            if v != 0 {
                *c += 1;
            }
        }
    }
    aggregate(&counts, img.h, divisor)
}

fn aggregate(counts: &[usize], cross_len: usize, divisor: usize) -> Profile {
    let n = counts.len();
    let mut values = vec![0u8; n];
    let stripe = n.checked_div(divisor).unwrap_or(0);
    if stripe == 0 || cross_len == 0 {
        return Profile { values };
    }

    let half = stripe / 2;
    let denom = cross_len * stripe;
    let mut sum: usize = counts[..stripe].iter().sum();
    for y in half..n - half {
        values[y] = (255 * sum / denom) as u8;
        let start = y - half;
        sum -= counts[start];
        if let Some(&incoming) = counts.get(start + stripe) {
            sum += incoming;
        }
    }
    Profile { values }
}
