//! Status codes for integrators

use serde::Serialize;

/// Final state of an integration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// Reached the end of the requested interval.
    Success,
    /// An [`Observer`](crate::core::observer::Observer) asked to stop.
    Interrupted,
    /// The step budget `nmax` was exhausted.
    NeedLargerNmax,
    /// The step size underflowed relative to the abscissa.
    StepSizeTooSmall,
    /// Repeated stiffness detection; an explicit method is a poor fit.
    ProbablyStiff,
    /// The implicit solver's iteration matrix stayed singular as the step shrank.
    SingularMatrix,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}
