//! Right-hand side of an ODE system.

use crate::{Float, matrix::Matrix};

/// Right-hand side of a first order system `y' = f(x, y)`.
///
/// The integrators call `ode` with the current abscissa `x` and state `y`
/// and expect `dydx` to be filled with the derivative values. `dydx` always
/// has the same length as `y`.
///
/// Epidemic models implement this through [`crate::models::ModelParams`],
/// but any closure-like system can be evolved:
///
/// ```
/// use epimodels::prelude::*;
///
/// struct Decay;
///
/// impl ODE for Decay {
///     fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
///         dydx[0] = -0.5 * y[0];
///     }
/// }
///
/// let trajectory = evolve(&Decay, &[1.0], 4, &Strategy::euler()).unwrap();
/// assert_eq!(trajectory.y[1], vec![0.5]);
/// ```
pub trait ODE {
    fn ode(&self, x: Float, y: &[Float], dydx: &mut [Float]);

    /// Jacobian `dfdy[(i, j)] = d f_i / d y_j`, used by the implicit solver.
    ///
    /// The default approximates it with forward differences, one extra
    /// `ode` call per component.
    fn jac(&self, x: Float, y: &[Float], dfdy: &mut Matrix) {
        let n = y.len();
        let mut y1 = y.to_vec();
        let mut f0 = vec![0.0; n];
        let mut f1 = vec![0.0; n];
        self.ode(x, y, &mut f0);
        for j in 0..n {
            let yj = y1[j];
            let delt = (Float::EPSILON * (1e-5 as Float).max(yj.abs())).sqrt();
            y1[j] = yj + delt;
            self.ode(x, &y1, &mut f1);
            for i in 0..n {
                dfdy[(i, j)] = (f1[i] - f0[i]) / delt;
            }
            y1[j] = yj;
        }
    }
}

impl<T: ODE + ?Sized> ODE for &T {
    fn ode(&self, x: Float, y: &[Float], dydx: &mut [Float]) {
        (**self).ode(x, y, dydx)
    }

    fn jac(&self, x: Float, y: &[Float], dfdy: &mut Matrix) {
        (**self).jac(x, y, dfdy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Coupled;

    impl ODE for Coupled {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = -2.0 * y[0] + y[1] * y[1];
            dydx[1] = 3.0 * y[0];
        }
    }

    #[test]
    fn numerical_jacobian_matches_analytic() {
        let mut dfdy = Matrix::zeros(2, 2);
        Coupled.jac(0.0, &[1.0, 2.0], &mut dfdy);
        approx::assert_abs_diff_eq!(dfdy[(0, 0)], -2.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(dfdy[(0, 1)], 4.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(dfdy[(1, 0)], 3.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(dfdy[(1, 1)], 0.0, epsilon = 1e-6);
    }
}
