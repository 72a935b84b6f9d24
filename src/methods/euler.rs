//! Explicit forward Euler fixed-step integrator.

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        observer::{ControlFlag, Observer},
        ode::ODE,
        status::Status,
    },
    error::{Error, Result},
    methods::result::IntegrationResult,
};

/// Forward Euler: `y <- y + h * f(x, y)`, repeated `nsteps` times.
///
/// Values are never clamped or renormalized. With `check_non_negative` a
/// compartment dropping below zero aborts with [`Error::InvalidArgument`];
/// otherwise the first occurrence is only logged.
///
/// The observer sees the initial point and every step, with a linear
/// interpolant between consecutive points.
pub fn euler<F, O>(
    f: &F,
    mut x: Float,
    y: &mut [Float],
    h: Float,
    nsteps: usize,
    check_non_negative: bool,
    observer: &mut O,
) -> Result<IntegrationResult>
where
    F: ODE,
    O: Observer,
{
    if h == 0.0 || !h.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "euler step size must be finite and non-zero (got {h})"
        )));
    }

    let n = y.len();
    let mut k = vec![0.0; n];
    let mut yold = y.to_vec();
    let mut nfev = 0;
    let mut nstep = 0;
    let mut warned = false;
    let mut status = Status::Success;

    let interpolator = Linear::new(x, h, &yold, y);
    if observer.observe(x, x, y, &interpolator) == ControlFlag::Interrupt {
        status = Status::Interrupted;
    }

    while status == Status::Success && nstep < nsteps {
        f.ode(x, y, &mut k);
        nfev += 1;

        yold.copy_from_slice(y);
        for i in 0..n {
            y[i] += h * k[i];
        }
        let xold = x;
        x += h;
        nstep += 1;

        if let Some(i) = y.iter().position(|v| *v < 0.0) {
            if check_non_negative {
                return Err(Error::InvalidArgument(format!(
                    "compartment {i} became negative ({}) at t = {x}",
                    y[i]
                )));
            }
            if !warned {
                log::warn!(
                    "euler: compartment {i} became negative ({}) at t = {x}, consider a smaller step",
                    y[i]
                );
                warned = true;
            }
        }

        let interpolator = Linear::new(xold, h, &yold, y);
        if observer.observe(xold, x, y, &interpolator) == ControlFlag::Interrupt {
            status = Status::Interrupted;
        }
    }

    Ok(IntegrationResult {
        x,
        h,
        nfev,
        nstep,
        naccpt: nstep,
        nrejct: 0,
        status,
    })
}

/// Straight line between the two ends of an Euler step.
struct Linear<'a> {
    xold: Float,
    h: Float,
    yold: &'a [Float],
    y: &'a [Float],
}

impl<'a> Linear<'a> {
    fn new(xold: Float, h: Float, yold: &'a [Float], y: &'a [Float]) -> Self {
        Self { xold, h, yold, y }
    }
}

impl Interpolate for Linear<'_> {
    fn interpolate(&self, xi: Float, yi: &mut [Float]) {
        let theta = (xi - self.xold) / self.h;
        for i in 0..yi.len() {
            yi[i] = self.yold[i] + theta * (self.y[i] - self.yold[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::NoObserver;

    struct Growth;

    impl ODE for Growth {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = 0.5 * y[0];
        }
    }

    struct Drain;

    impl ODE for Drain {
        fn ode(&self, _x: Float, _y: &[Float], dydx: &mut [Float]) {
            dydx[0] = -0.6;
        }
    }

    struct Counter(usize);

    impl Observer for Counter {
        fn observe<I: Interpolate>(
            &mut self,
            _xold: Float,
            _x: Float,
            _y: &[Float],
            _interpolator: &I,
        ) -> ControlFlag {
            self.0 += 1;
            if self.0 == 3 {
                ControlFlag::Interrupt
            } else {
                ControlFlag::Continue
            }
        }
    }

    #[test]
    fn unit_step_adds_the_derivative() {
        let mut y = [2.0];
        let res = euler(&Growth, 0.0, &mut y, 1.0, 3, false, &mut NoObserver).unwrap();
        assert_eq!(y[0], 2.0 * 1.5 * 1.5 * 1.5);
        assert_eq!(res.x, 3.0);
        assert_eq!(res.nfev, 3);
        assert_eq!(res.status, Status::Success);
    }

    #[test]
    fn zero_steps_leave_state_untouched() {
        let mut y = [2.0];
        let res = euler(&Growth, 0.0, &mut y, 1.0, 0, false, &mut NoObserver).unwrap();
        assert_eq!(y[0], 2.0);
        assert_eq!(res.nstep, 0);
    }

    #[test]
    fn negative_values_pass_through_unless_checked() {
        let mut y = [1.0];
        euler(&Drain, 0.0, &mut y, 1.0, 2, false, &mut NoObserver).unwrap();
        approx::assert_abs_diff_eq!(y[0], -0.2, epsilon = 1e-12);

        let mut y = [1.0];
        let err = euler(&Drain, 0.0, &mut y, 1.0, 2, true, &mut NoObserver).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn observer_can_interrupt() {
        let mut y = [1.0];
        let mut counter = Counter(0);
        let res = euler(&Growth, 0.0, &mut y, 1.0, 10, false, &mut counter).unwrap();
        assert_eq!(res.status, Status::Interrupted);
        assert_eq!(res.nstep, 2);
    }

    #[test]
    fn zero_step_size_is_rejected() {
        let mut y = [1.0];
        let err = euler(&Growth, 0.0, &mut y, 0.0, 1, false, &mut NoObserver).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
