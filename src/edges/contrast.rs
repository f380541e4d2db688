//! Per-line contrast stretch.
//!
//! Every row (or column) is remapped independently so that its minimum maps
//! to 0 and its maximum to 255: `new = (old − min) · 255 / (max − min)`.
//! Lines without contrast (`max == min`) carry no edge information and are
//! set to 0.
use crate::image::{ImageU8, ImageView, ImageViewMut};
use serde::Serialize;

/// Which lines of an image are normalized independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineAxis {
    Rows,
    Columns,
}

/// Extremes of one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub max: u8,
    pub min: u8,
}

impl LineRange {
    fn of(values: impl IntoIterator<Item = u8>) -> Self {
        values.into_iter().fold(
            LineRange {
                max: u8::MIN,
                min: u8::MAX,
            },
            |acc, v| LineRange {
                max: acc.max.max(v),
                min: acc.min.min(v),
            },
        )
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    #[inline]
    fn stretch(&self, v: u8) -> u8 {
        let span = (self.max - self.min) as u32;
        ((v.clamp(self.min, self.max) - self.min) as u32 * 255 / span) as u8
    }
}

/// One [`LineRange`] per row or column, in line order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinMaxTable {
    axis: LineAxis,
    lines: Vec<LineRange>,
}

impl MinMaxTable {
    pub fn axis(&self) -> LineAxis {
        self.axis
    }

    pub fn lines(&self) -> &[LineRange] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub fn min_max_table(img: &ImageU8, axis: LineAxis) -> MinMaxTable {
    let lines = match axis {
        LineAxis::Rows => img.rows().map(|row| LineRange::of(row.iter().copied())).collect(),
        LineAxis::Columns => (0..img.w)
            .map(|x| LineRange::of((0..img.h).map(|y| img.get(x, y))))
            .collect(),
    };
    MinMaxTable { axis, lines }
}

/// Apply a table produced by [`min_max_table`] on the same image.
///
/// With a table from another image, samples outside a line's range are
/// clamped to it before stretching.
pub fn expand_contrast(img: &mut ImageU8, table: &MinMaxTable) {
    match table.axis {
        LineAxis::Rows => {
            for (row, range) in img.rows_mut().zip(table.lines.iter()) {
                stretch_line(row.iter_mut(), range);
            }
        }
        LineAxis::Columns => {
            let w = img.w;
            for (x, range) in table.lines.iter().enumerate().take(w) {
                stretch_line(img.data.iter_mut().skip(x).step_by(w), range);
            }
        }
    }
}

fn stretch_line<'a>(samples: impl Iterator<Item = &'a mut u8>, range: &LineRange) {
    if range.is_degenerate() {
        samples.for_each(|v| *v = 0);
    } else {
        samples.for_each(|v| *v = range.stretch(*v));
    }
}

/// Compute the table and stretch in one call.
pub fn normalize_lines(img: &mut ImageU8, axis: LineAxis) {
    let table = min_max_table(img, axis);
    expand_contrast(img, &table);
}

/// Stretch a 1-D profile as a single line.
pub fn normalize_profile(values: &mut [u8]) {
    let range = LineRange::of(values.iter().copied());
    stretch_line(values.iter_mut(), &range);
}
