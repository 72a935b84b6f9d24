//! Radau5 - 3-stage, order-5 Radau IIA implicit Runge–Kutta solver.
//!
//! Solves stiff systems `y' = f(x, y)` with adaptive step-size, simplified
//! Newton iterations (numerical Jacobian by default) and dense output.
//!
//! Reference
//! - E. Hairer and G. Wanner, "Solving Ordinary Differential Equations II.
//!   Stiff and Differential-Algebraic Problems", 2nd ed., Springer (1996).

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        observer::{ControlFlag, Observer},
        ode::ODE,
        status::Status,
    },
    error::SettingError,
    matrix::{Lu, Matrix},
    methods::{
        result::IntegrationResult,
        settings::{Settings, Tolerance},
    },
};

/// Consecutive singular iteration matrices tolerated before giving up.
const MAX_SINGULAR: usize = 5;

/// Radau IIA(5) implicit Runge–Kutta with adaptive steps and dense output.
///
/// Same calling convention as [`dopri5`](crate::methods::dp::dopri5): `y`
/// is advanced in place and the observer sees the start point and every
/// accepted step.
///
/// # Optional settings
///
/// - `uround` (default `2.3e-16`)
/// - `safety_factor` (default `0.9`)
/// - `scale_min` / `scale_max` (default `0.2` / `8.0`)
/// - `hmax` (default `|xend - x|`)
/// - `h0` (default `1e-6`)
/// - `nmax` (default `100_000`)
/// - `newton_maxiter` (default `7`)
pub fn radau5<F, O>(
    f: &F,
    mut x: Float,
    xend: Float,
    y: &mut [Float],
    rtol: &Tolerance,
    atol: &Tolerance,
    observer: &mut O,
    settings: &Settings,
) -> Result<IntegrationResult, Vec<SettingError>>
where
    F: ODE,
    O: Observer,
{
    // --- Input Validation ---
    let mut errors: Vec<SettingError> = Vec::new();

    let uround = match settings.uround {
        Some(u) if (1e-35..1.0).contains(&u) => u,
        Some(u) => {
            errors.push(SettingError::URoundOutOfRange(u));
            u
        }
        None => 2.3e-16,
    };
    let safety_factor = match settings.safety_factor {
        Some(s) if s > 1e-4 && s < 1.0 => s,
        Some(s) => {
            errors.push(SettingError::SafetyFactorOutOfRange(s));
            s
        }
        None => 0.9,
    };
    // Step-size scaling bounds: clamp factor quot in [facc2, facc1]
    let facc1 = 1.0 / settings.scale_min.unwrap_or(0.2);
    let facc2 = 1.0 / settings.scale_max.unwrap_or(8.0);

    let nmax = match settings.nmax {
        Some(0) => {
            errors.push(SettingError::NMaxMustBePositive(0));
            0
        }
        Some(n) => n,
        None => 100_000,
    };
    let max_newton = match settings.newton_maxiter {
        Some(0) => {
            errors.push(SettingError::NewtonMaxIterMustBePositive(0));
            0
        }
        Some(n) => n,
        None => 7,
    };
    let newton_tol: Float = 0.003_162_277_660_168_379_4;

    let hmax = match settings.hmax {
        Some(h) => h.abs(),
        None => (xend - x).abs(),
    };
    if let Some(h0) = settings.h0 {
        if h0 == 0.0 || !h0.is_finite() {
            errors.push(SettingError::InvalidStepSize(h0));
        }
    }
    for tol in [rtol.min(), atol.min()] {
        if tol.is_nan() || tol <= 0.0 {
            errors.push(SettingError::InvalidTolerance(tol));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // --- Initialization ---
    let n = y.len();
    let posneg = if xend >= x { 1.0 } else { -1.0 };
    let mut f0 = vec![0.0; n];
    f.ode(x, y, &mut f0);
    let mut nfev: usize = 1;

    let mut h = posneg * settings.h0.map_or(1.0e-6, Float::abs).min(hmax.max(uround));

    // Dense output: [y_{n+1}, c1, c2, c3]
    let mut cont = vec![0.0; n * 4];

    let interpolator = DenseRadau::new(&cont, x, h);
    if observer.observe(x, x, y, &interpolator) == ControlFlag::Interrupt {
        return Ok(IntegrationResult {
            x,
            h,
            nfev,
            nstep: 0,
            naccpt: 0,
            nrejct: 0,
            status: Status::Interrupted,
        });
    }

    // Workspace
    let mut z1 = vec![0.0; n];
    let mut z2 = vec![0.0; n];
    let mut z3 = vec![0.0; n];
    let mut f1 = vec![0.0; n];
    let mut f2 = vec![0.0; n];
    let mut f3 = vec![0.0; n];
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut ys = vec![0.0; n];
    let mut df1 = vec![0.0; n];
    let mut df23 = vec![0.0; 2 * n];
    let mut scal = vec![0.0; n];
    let mut y1 = vec![0.0; n];
    let mut tmp = vec![0.0; n];
    let mut contv = vec![0.0; n];
    let mut jac = Matrix::zeros(n, n);
    let mut e1 = Matrix::zeros(n, n);
    let mut e2 = Matrix::zeros(2 * n, 2 * n);

    let mut nstep: usize = 0;
    let mut naccpt: usize = 0;
    let mut nrejct: usize = 0;
    let mut nsing: usize = 0;
    let mut status = Status::Success;
    let mut last = false;
    let mut reject = false;

    // --- Main loop ---
    while posneg * (xend - x) > 0.0 {
        if nstep > nmax {
            status = Status::NeedLargerNmax;
            break;
        }
        if 0.1 * h.abs() <= x.abs() * uround {
            status = Status::StepSizeTooSmall;
            break;
        }

        if (x + 1.01 * h - xend) * posneg > 0.0 {
            h = xend - x;
            last = true;
        }
        nstep += 1;

        // Jacobian at (x, y)
        f.jac(x, y, &mut jac);

        // E1 = (U1/h)·I − J and E2 as the real 2n×2n form of (α + iβ)·I − J
        let fac1 = U1 / h;
        let alphn = ALPH / h;
        let betan = BETA / h;
        for r in 0..n {
            for c in 0..n {
                let diag = if r == c { 1.0 } else { 0.0 };
                e1[(r, c)] = diag * fac1 - jac[(r, c)];
                let e2r = diag * alphn - jac[(r, c)];
                let e2i = diag * betan;
                e2[(r, c)] = e2r;
                e2[(r, c + n)] = -e2i;
                e2[(r + n, c)] = e2i;
                e2[(r + n, c + n)] = e2r;
            }
        }
        let (lu1, lu2) = match (Lu::factor(&e1), Lu::factor(&e2)) {
            (Ok(lu1), Ok(lu2)) => {
                nsing = 0;
                (lu1, lu2)
            }
            _ => {
                nsing += 1;
                if nsing >= MAX_SINGULAR {
                    log::warn!("radau5: iteration matrix repeatedly singular at x = {x}");
                    status = Status::SingularMatrix;
                    break;
                }
                h *= 0.5;
                reject = true;
                last = false;
                continue;
            }
        };

        for i in 0..n {
            scal[i] = atol[i] + rtol[i] * y[i].abs();
        }

        z1.fill(0.0);
        z2.fill(0.0);
        z3.fill(0.0);
        f1.fill(0.0);
        f2.fill(0.0);
        f3.fill(0.0);

        // Stage times, constant during the Newton iteration
        let t1 = x + C1 * h;
        let t2 = x + C2 * h;
        let t3 = x + h;

        // Simplified Newton iteration
        let mut newton_ok = false;
        let mut dynold: Float = 0.0;
        for it in 0..max_newton {
            for i in 0..n {
                ys[i] = y[i] + z1[i];
            }
            f.ode(t1, &ys, &mut k1);
            for i in 0..n {
                ys[i] = y[i] + z2[i];
            }
            f.ode(t2, &ys, &mut k2);
            for i in 0..n {
                ys[i] = y[i] + z3[i];
            }
            f.ode(t3, &ys, &mut k3);
            nfev += 3;

            // Right-hand sides T^{-1}·k minus the current F terms
            for i in 0..n {
                let a1 = TINV00 * k1[i] + TINV01 * k2[i] + TINV02 * k3[i];
                let a2 = TINV10 * k1[i] + TINV11 * k2[i] + TINV12 * k3[i];
                let a3 = TINV20 * k1[i] + TINV21 * k2[i] + TINV22 * k3[i];
                df1[i] = a1 - f1[i] * fac1;
                df23[i] = a2 - f2[i] * alphn + f3[i] * betan;
                df23[i + n] = a3 - f3[i] * alphn - f2[i] * betan;
            }
            lu1.solve(&mut df1);
            lu2.solve(&mut df23);

            let mut dyno: Float = 0.0;
            for i in 0..n {
                let v1 = df1[i] / scal[i];
                let v2 = df23[i] / scal[i];
                let v3 = df23[i + n] / scal[i];
                dyno += v1 * v1 + v2 * v2 + v3 * v3;
            }
            dyno = (dyno / (3 * n) as Float).sqrt();
            if !dyno.is_finite() {
                break;
            }
            // Diverging corrections
            if it > 0 && dyno >= 0.99 * dynold && dyno > newton_tol {
                break;
            }
            dynold = dyno.max(uround);

            for i in 0..n {
                f1[i] += df1[i];
                f2[i] += df23[i];
                f3[i] += df23[i + n];
                z1[i] = T00 * f1[i] + T01 * f2[i] + T02 * f3[i];
                z2[i] = T10 * f1[i] + T11 * f2[i] + T12 * f3[i];
                z3[i] = T20 * f1[i] + f2[i];
            }

            if dyno <= newton_tol {
                newton_ok = true;
                break;
            }
        }

        if !newton_ok {
            log::trace!("radau5: newton failed at x = {x} (h = {h}), halving");
            h *= 0.5;
            reject = true;
            last = false;
            if naccpt >= 1 {
                nrejct += 1;
            }
            continue;
        }

        for i in 0..n {
            y1[i] = y[i] + z3[i];
        }

        // Error estimate: solve E1·err = f(x, y) + Σ (dd_i/h)·z_i
        let hee1 = DD1 / h;
        let hee2 = DD2 / h;
        let hee3 = DD3 / h;
        for i in 0..n {
            tmp[i] = hee1 * z1[i] + hee2 * z2[i] + hee3 * z3[i];
            contv[i] = f0[i] + tmp[i];
        }
        lu1.solve(&mut contv);
        let mut err = scaled_norm(&contv, &scal);

        // Refinement on the first step and after a rejection
        if err >= 1.0 && (naccpt == 0 || reject) {
            for i in 0..n {
                ys[i] = y[i] + contv[i];
            }
            f.ode(x, &ys, &mut k1);
            nfev += 1;
            for i in 0..n {
                contv[i] = k1[i] + tmp[i];
            }
            lu1.solve(&mut contv);
            err = scaled_norm(&contv, &scal);
        }

        // hnew = h / clamp(err^(1/4) / safety, [facc2, facc1])
        let quot = facc2.max(facc1.min(err.powf(0.25) / safety_factor));
        let mut hnew = h / quot;

        if err <= 1.0 {
            naccpt += 1;

            // Dense output coefficients, cubic about the right endpoint
            for i in 0..n {
                let cont1 = (z2[i] - z3[i]) / C2M1;
                let ak = (z1[i] - z2[i]) / C1MC2;
                let acont3 = (ak - z1[i] / C1) / C2;
                let cont2 = (ak - cont1) / C1M1;
                cont[i] = y1[i];
                cont[n + i] = cont1;
                cont[2 * n + i] = cont2;
                cont[3 * n + i] = cont2 - acont3;
            }

            y.copy_from_slice(&y1);
            let xold = x;
            x += h;
            f.ode(x, y, &mut f0);
            nfev += 1;
            log::trace!("radau5: accepted step {naccpt} to x = {x} (h = {h}, err = {err:.3e})");

            let interpolator = DenseRadau::new(&cont, xold, h);
            if observer.observe(xold, x, y, &interpolator) == ControlFlag::Interrupt {
                status = Status::Interrupted;
                break;
            }

            if last {
                h = hnew;
                status = Status::Success;
                break;
            }

            if hnew.abs() > hmax {
                hnew = posneg * hmax;
            }
            if reject {
                hnew = posneg * hnew.abs().min(h.abs());
                reject = false;
            }
        } else {
            reject = true;
            last = false;
            if naccpt == 0 {
                hnew = 0.1 * h;
            } else {
                nrejct += 1;
            }
        }
        h = hnew;
    }

    Ok(IntegrationResult {
        x,
        h,
        nfev,
        nstep,
        naccpt,
        nrejct,
        status,
    })
}

fn scaled_norm(v: &[Float], scal: &[Float]) -> Float {
    let sum: Float = v.iter().zip(scal).map(|(v, s)| (v / s) * (v / s)).sum();
    (sum / v.len() as Float).sqrt().max(1e-10)
}

/// Continuous output function for Radau5
pub fn contr5(xi: Float, yi: &mut [Float], cont: &[Float], xold: Float, h: Float) {
    let n = cont.len() / 4;
    let s = (xi - (xold + h)) / h;
    for i in 0..n {
        yi[i] = cont[i]
            + s * (cont[n + i] + (s - C2M1) * (cont[2 * n + i] + (s - C1M1) * cont[3 * n + i]));
    }
}

/// Dense output interpolator for the last accepted Radau5 step
struct DenseRadau<'a> {
    cont: &'a [Float],
    xold: Float,
    h: Float,
}

impl<'a> DenseRadau<'a> {
    fn new(cont: &'a [Float], xold: Float, h: Float) -> Self {
        Self { cont, xold, h }
    }
}

impl Interpolate for DenseRadau<'_> {
    fn interpolate(&self, xi: Float, yi: &mut [Float]) {
        contr5(xi, yi, self.cont, self.xold, self.h);
    }
}

// Nodes (abscissae) in [0,1]
const C1: Float = 0.155_051_025_721_682_2;
const C2: Float = 0.644_948_974_278_317_8;
const C1M1: Float = C1 - 1.0;
const C2M1: Float = C2 - 1.0;
const C1MC2: Float = C1 - C2;

// Error estimation and splitting constants
const DD1: Float = -10.048_809_399_827_416;
const DD2: Float = 1.382_142_733_160_749;
const DD3: Float = -0.333_333_333_333_333_3;
const U1: Float = 3.637_834_252_744_496;
const ALPH: Float = 2.681_082_873_627_752_3;
const BETA: Float = 3.050_430_199_247_410_5;

// Transformation matrix T
const T00: Float = 9.123_239_487_089_295E-2;
const T01: Float = -1.412_552_950_209_542E-1;
const T02: Float = -3.002_919_410_514_742_4E-2;
const T10: Float = 2.417_179_327_071_07E-1;
const T11: Float = 2.041_293_522_937_999_4E-1;
const T12: Float = 3.829_421_127_572_619E-1;
const T20: Float = 9.660_481_826_150_93E-1;

// Inverse transformation matrix T^{-1}
const TINV00: Float = 4.325_579_890_063_155;
const TINV01: Float = 3.391_992_518_158_098_4E-1;
const TINV02: Float = 5.417_705_399_358_749E-1;
const TINV10: Float = -4.178_718_591_551_905;
const TINV11: Float = -3.276_828_207_610_623_7E-1;
const TINV12: Float = 4.766_235_545_005_504_4E-1;
const TINV20: Float = -5.028_726_349_457_868E-1;
const TINV21: Float = 2.571_926_949_855_605;
const TINV22: Float = -5.960_392_048_282_249E-1;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::NoObserver;

    struct Decay;

    impl ODE for Decay {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = -y[0];
        }
    }

    /// Fast mode with eigenvalue -1e4 slaved to a slow decay.
    struct StiffLinear;

    impl ODE for StiffLinear {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = -1.0e4 * y[0] + y[1];
            dydx[1] = -y[1];
        }
    }

    /// Flags a matrix that no step size can make regular.
    struct Degenerate;

    impl ODE for Degenerate {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = y[0];
        }

        fn jac(&self, _x: Float, _y: &[Float], dfdy: &mut Matrix) {
            dfdy[(0, 0)] = Float::NAN;
        }
    }

    #[test]
    fn exponential_decay_to_tolerance() {
        let mut y = [1.0];
        let tol = Tolerance::from(1e-8);
        let res = radau5(
            &Decay,
            0.0,
            2.0,
            &mut y,
            &tol,
            &tol,
            &mut NoObserver,
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(res.status, Status::Success);
        assert_eq!(res.x, 2.0);
        approx::assert_relative_eq!(y[0], (-2.0 as Float).exp(), max_relative = 1e-6);
        assert!(res.nstep >= res.naccpt + res.nrejct);
    }

    #[test]
    fn stiff_system_takes_large_steps() {
        let mut y = [0.0, 1.0];
        let tol = Tolerance::from(1e-8);
        let res = radau5(
            &StiffLinear,
            0.0,
            10.0,
            &mut y,
            &tol,
            &tol,
            &mut NoObserver,
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(res.status, Status::Success);
        approx::assert_abs_diff_eq!(y[1], (-10.0 as Float).exp(), epsilon = 1e-7);
        // y0 follows its slow manifold y1 / (1e4 - 1)
        approx::assert_abs_diff_eq!(y[0], y[1] / 9999.0, epsilon = 1e-8);
        // An explicit method would need thousands of steps for stability alone
        assert!(res.naccpt < 500, "{} steps", res.naccpt);
    }

    #[test]
    fn repeatedly_singular_matrix_stops_integration() {
        let mut y = [1.0];
        let tol = Tolerance::from(1e-6);
        let res = radau5(
            &Degenerate,
            0.0,
            1.0,
            &mut y,
            &tol,
            &tol,
            &mut NoObserver,
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(res.status, Status::SingularMatrix);
        assert_eq!(res.x, 0.0);
        assert_eq!(y, [1.0]);
    }

    #[test]
    fn invalid_settings_are_all_reported() {
        let mut y = [1.0];
        let tol = Tolerance::from(1e-6);
        let settings = Settings::builder().newton_maxiter(0).h0(0.0).build();
        let nan = Tolerance::from([Float::NAN]);
        let errors = radau5(&Decay, 0.0, 1.0, &mut y, &tol, &nan, &mut NoObserver, &settings)
            .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], SettingError::NewtonMaxIterMustBePositive(0));
        assert_eq!(errors[1], SettingError::InvalidStepSize(0.0));
        assert!(matches!(errors[2], SettingError::InvalidTolerance(t) if t.is_nan()));
    }

    #[test]
    fn dense_output_hits_right_endpoint() {
        let cont = [0.5, 0.1, 0.2, 0.3];
        let mut yi = [0.0];
        contr5(1.0, &mut yi, &cont, 0.0, 1.0);
        assert_eq!(yi[0], 0.5);
    }
}
