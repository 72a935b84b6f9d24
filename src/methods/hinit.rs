//! Compute an initial step size guess

use crate::{Float, core::ode::ODE, methods::settings::Tolerance};

/// Compute an initial step size guess for an explicit method of order `iord`.
///
/// Follows Hairer, Nørsett & Wanner: an explicit Euler step of size `h`
/// estimates the second derivative, and the final guess satisfies
/// `h^iord * max(|f0|, |f''|) = 0.01`.
pub fn hinit<F>(
    f: &F,
    x: Float,
    y: &[Float],
    posneg: Float,
    f0: &[Float],
    f1: &mut [Float],
    y1: &mut [Float],
    iord: usize,
    hmax: Float,
    atol: &Tolerance,
    rtol: &Tolerance,
) -> Float
where
    F: ODE,
{
    let n = y.len();
    let mut dnf: Float = 0.0;
    let mut dny: Float = 0.0;

    for i in 0..n {
        let sk = atol[i] + rtol[i] * y[i].abs();
        dnf += (f0[i] / sk) * (f0[i] / sk);
        dny += (y[i] / sk) * (y[i] / sk);
    }

    let mut h: Float = if dnf <= 1e-10 || dny <= 1e-10 {
        1.0e-6
    } else {
        (dny / dnf).sqrt() * 0.01
    };
    h = h.min(hmax.abs()) * posneg;

    // Explicit Euler step: y1 = y + h * f0
    for i in 0..n {
        y1[i] = y[i] + h * f0[i];
    }
    f.ode(x + h, y1, f1);

    // Estimate second derivative
    let mut der2: Float = 0.0;
    for i in 0..n {
        let sk = atol[i] + rtol[i] * y[i].abs();
        let df = (f1[i] - f0[i]) / sk;
        der2 += df * df;
    }
    der2 = der2.sqrt() / h.abs();

    let der12 = der2.abs().max(dnf.sqrt());
    let h1: Float = if der12 <= 1.0e-15 {
        (1.0e-6 as Float).max(h.abs() * 1.0e-3)
    } else {
        (0.01 / der12).powf(1.0 / iord as Float)
    };

    (100.0 * h.abs()).min(h1).min(hmax.abs()) * posneg
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Decay;

    impl ODE for Decay {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = -y[0];
        }
    }

    #[test]
    fn guess_is_bounded_by_hmax_and_signed() {
        let y = [1.0];
        let f0 = [-1.0];
        let (mut f1, mut y1) = ([0.0], [0.0]);
        let tol = Tolerance::from(1e-6);
        let h = hinit(&Decay, 0.0, &y, 1.0, &f0, &mut f1, &mut y1, 5, 0.5, &tol, &tol);
        assert!(h > 0.0 && h <= 0.5);
        let h = hinit(&Decay, 0.0, &y, -1.0, &f0, &mut f1, &mut y1, 5, 0.5, &tol, &tol);
        assert!(h < 0.0 && h >= -0.5);
    }

    #[test]
    fn flat_system_falls_back_to_small_step() {
        let y = [0.0];
        let f0 = [0.0];
        let (mut f1, mut y1) = ([0.0], [0.0]);
        let tol = Tolerance::from(1e-6);
        let h = hinit(&Decay, 0.0, &y, 1.0, &f0, &mut f1, &mut y1, 5, 10.0, &tol, &tol);
        assert!(h > 0.0 && h <= 1e-4);
    }
}
