//! Sampled solution returned by [`evolve`](super::evolve::evolve).

use serde::Serialize;

use crate::{Float, core::status::Status, error::{Error, Result}};

/// One state vector per time-grid point, `y[0]` being the initial state,
/// plus integrator statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub t: Vec<Float>,
    pub y: Vec<Vec<Float>>,
    pub nfev: usize,
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
    pub status: Status,
}

impl Trajectory {
    /// Number of recorded rows.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Number of compartments per row.
    pub fn width(&self) -> usize {
        self.y.first().map_or(0, Vec::len)
    }

    /// Final state.
    pub fn last(&self) -> Option<&[Float]> {
        self.y.last().map(Vec::as_slice)
    }

    /// Time series of a single compartment.
    pub fn column(&self, index: usize) -> Result<Vec<Float>> {
        if index >= self.width() {
            return Err(Error::InvalidArgument(format!(
                "column {index} out of range for {} compartments",
                self.width()
            )));
        }
        Ok(self.y.iter().map(|row| row[index]).collect())
    }

    /// Row range selected by `first..last`, where negative bounds count from
    /// the end and out-of-range bounds are clamped, as in Python slicing.
    /// `window(0, -1)` therefore drops the final row.
    pub fn window(&self, first: isize, last: isize) -> std::ops::Range<usize> {
        let start = resolve(first, self.len());
        let end = resolve(last, self.len());
        start..end.max(start)
    }

    /// Iterate over `(t, y)` pairs.
    pub fn iter(&self) -> TrajectoryIter<'_> {
        TrajectoryIter {
            t_iter: self.t.iter(),
            y_iter: self.y.iter(),
        }
    }
}

fn resolve(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs().min(len)
    }
}

/// Iterator over `(t, y)` pairs of a [`Trajectory`].
pub struct TrajectoryIter<'a> {
    t_iter: std::slice::Iter<'a, Float>,
    y_iter: std::slice::Iter<'a, Vec<Float>>,
}

impl<'a> Iterator for TrajectoryIter<'a> {
    type Item = (Float, &'a [Float]);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.t_iter.next(), self.y_iter.next()) {
            (Some(&t), Some(y)) => Some((t, y.as_slice())),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = (Float, &'a [Float]);
    type IntoIter = TrajectoryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
