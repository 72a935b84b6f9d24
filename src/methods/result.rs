//! A struct representing the outputted result of a numerical integrator.

use crate::{Float, core::status::Status};

/// The output of a numerical integrator
#[derive(Clone, Debug, PartialEq)]
pub struct IntegrationResult {
    /// The final value of the independent variable
    pub x: Float,
    /// The step size of the next integration step
    pub h: Float,
    /// The number of function evaluations
    pub nfev: usize,
    /// The number of steps taken
    pub nstep: usize,
    /// The number of accepted steps
    pub naccpt: usize,
    /// The number of rejected steps
    pub nrejct: usize,
    /// The status of the integration process
    pub status: Status,
}

impl IntegrationResult {
    /// Statistics of `self` followed by a continuation run `next` that
    /// started where `self` stopped.
    pub fn chain(self, next: IntegrationResult) -> IntegrationResult {
        IntegrationResult {
            x: next.x,
            h: next.h,
            nfev: self.nfev + next.nfev,
            nstep: self.nstep + next.nstep,
            naccpt: self.naccpt + next.naccpt,
            nrejct: self.nrejct + next.nrejct,
            status: next.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_sums_counts_and_keeps_the_later_end() {
        let first = IntegrationResult {
            x: 3.0,
            h: 0.01,
            nfev: 100,
            nstep: 16,
            naccpt: 15,
            nrejct: 1,
            status: Status::ProbablyStiff,
        };
        let second = IntegrationResult {
            x: 10.0,
            h: 2.0,
            nfev: 40,
            nstep: 9,
            naccpt: 8,
            nrejct: 0,
            status: Status::Success,
        };
        let merged = first.chain(second);
        assert_eq!(merged.x, 10.0);
        assert_eq!(merged.h, 2.0);
        assert_eq!(merged.nfev, 140);
        assert_eq!(merged.nstep, 25);
        assert_eq!(merged.naccpt, 23);
        assert_eq!(merged.nrejct, 1);
        assert_eq!(merged.status, Status::Success);
    }
}
