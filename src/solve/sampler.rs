//! Observer recording the solution on a fixed time grid.

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        observer::{ControlFlag, Observer},
    },
};

/// Records `y` at every point of an increasing time grid. Integration is
/// never interrupted; check [`is_complete`](Self::is_complete) afterwards.
///
/// Grid points that coincide with the integrator's current abscissa (up to
/// a small tolerance) are copied from `y` directly; the rest are
/// interpolated with the step's dense output.
pub struct GridSampler<'a> {
    grid: &'a [Float],
    next: usize,
    tol: Float,
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
}

impl<'a> GridSampler<'a> {
    pub fn new(grid: &'a [Float]) -> Self {
        Self {
            grid,
            next: 0,
            tol: 1e-9,
            t: Vec::with_capacity(grid.len()),
            y: Vec::with_capacity(grid.len()),
        }
    }

    /// `true` once every grid point has been recorded.
    pub fn is_complete(&self) -> bool {
        self.next == self.grid.len()
    }

    pub fn into_data(self) -> (Vec<Float>, Vec<Vec<Float>>) {
        (self.t, self.y)
    }
}

impl Observer for GridSampler<'_> {
    fn observe<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: &I,
    ) -> ControlFlag {
        while let Some(&ti) = self.grid.get(self.next) {
            if (ti - x).abs() <= self.tol {
                self.y.push(y.to_vec());
            } else if xold < x && ti > xold && ti < x {
                let mut yi = vec![0.0; y.len()];
                interpolator.interpolate(ti, &mut yi);
                self.y.push(yi);
            } else {
                break;
            }
            self.t.push(ti);
            self.next += 1;
        }
        ControlFlag::Continue
    }
}

/// Records the integrator's state at the start and after every step.
#[derive(Debug, Default)]
pub struct StepRecorder {
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
}

impl StepRecorder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            t: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    pub fn into_data(self) -> (Vec<Float>, Vec<Vec<Float>>) {
        (self.t, self.y)
    }
}

impl Observer for StepRecorder {
    fn observe<I: Interpolate>(&mut self, _: Float, x: Float, y: &[Float], _: &I) -> ControlFlag {
        self.t.push(x);
        self.y.push(y.to_vec());
        ControlFlag::Continue
    }
}
