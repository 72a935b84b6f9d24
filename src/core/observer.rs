//! Hook executed before the first step and after each accepted step.

use crate::{Float, core::interpolate::Interpolate};

/// Return flags for [`Observer`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Callback hook executed by the integrators.
///
/// The hook is invoked once before the main loop (with `xold == x`) and
/// after every accepted step. The arguments are:
/// - `xold`: left end of the last accepted step,
/// - `x`: the new abscissa after the accepted step,
/// - `y`: the integrator's current solution at `x`,
/// - `interpolator`: dense output valid on `[xold, x]`. On the initial
///   call there is no step yet, so `interpolator` must not be queried;
///   use `y` instead.
///
/// [`GridSampler`](crate::solve::sampler::GridSampler) is the observer used
/// by [`evolve`](crate::solve::evolve::evolve) to record a trajectory on a
/// fixed time grid.
pub trait Observer {
    fn observe<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: &I,
    ) -> ControlFlag;
}

/// Observer that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoObserver;

impl Observer for NoObserver {
    fn observe<I: Interpolate>(&mut self, _: Float, _: Float, _: &[Float], _: &I) -> ControlFlag {
        ControlFlag::Continue
    }
}
