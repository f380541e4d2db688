//! Contiguous "on" runs ("blobs") in a 1-D binary sequence.
use serde::Serialize;

/// Inclusive span `[first, last]` of non-zero samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Run {
    pub first: usize,
    pub last: usize,
}

impl Run {
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// `first + last`, i.e. twice the midpoint.
    #[inline]
    pub fn span_sum(&self) -> usize {
        self.first + self.last
    }

    /// Midpoint rounded down.
    #[inline]
    pub fn midpoint(&self) -> usize {
        self.span_sum() / 2
    }
}

/// Maximal runs of non-zero samples in ascending order, in one pass.
pub fn find_runs(values: &[u8]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match (v != 0, start) {
            (true, None) => start = Some(i),
            (false, Some(first)) => {
                runs.push(Run { first, last: i - 1 });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(first) = start {
        runs.push(Run {
            first,
            last: values.len() - 1,
        });
    }
    runs
}
