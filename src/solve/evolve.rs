//! Time stepping of an ODE right-hand side into a [`Trajectory`].

use crate::{
    Float,
    core::{ode::ODE, status::Status},
    error::{Error, Result},
    methods::{
        dp::dopri5,
        euler::euler,
        radau::radau5,
        result::IntegrationResult,
        settings::{Settings, Tolerance},
    },
};

use super::{
    options::{AdaptiveMethod, AdaptiveOptions, EulerOptions, Strategy},
    sampler::{GridSampler, StepRecorder},
    trajectory::Trajectory,
};

/// Evolves `initial_state` under `f` and returns `num_steps` rows, the first
/// one being `initial_state` itself.
///
/// - [`Strategy::Adaptive`] integrates from `0` to `num_steps` and samples
///   the solution at `num_steps` evenly spaced times (see [`time_grid`]).
/// - [`Strategy::Euler`] applies `num_steps - 1` explicit Euler updates of
///   size `dt`, recording every one.
///
/// # Errors
/// [`Error::InvalidArgument`] for `num_steps == 0` or an empty state,
/// [`Error::ShapeMismatch`] for vector tolerances of the wrong length,
/// [`Error::InvalidSettings`] for rejected solver settings and
/// [`Error::Integration`] when the adaptive solver stops early.
pub fn evolve<F>(
    f: &F,
    initial_state: &[Float],
    num_steps: usize,
    strategy: &Strategy,
) -> Result<Trajectory>
where
    F: ODE,
{
    if num_steps == 0 {
        return Err(Error::InvalidArgument(
            "num_steps must be at least 1".to_string(),
        ));
    }
    if initial_state.is_empty() {
        return Err(Error::InvalidArgument(
            "initial state must not be empty".to_string(),
        ));
    }

    log::debug!(
        "evolve: {} strategy, {num_steps} steps, {} compartments",
        strategy.name(),
        initial_state.len()
    );

    let trajectory = match strategy {
        Strategy::Adaptive(options) => adaptive(f, initial_state, num_steps, options)?,
        Strategy::Euler(options) => fixed_step(f, initial_state, num_steps, options)?,
    };

    log::debug!(
        "evolve: done with {} rows, {} function evaluations ({} accepted, {} rejected steps)",
        trajectory.len(),
        trajectory.nfev,
        trajectory.naccpt,
        trajectory.nrejct
    );
    Ok(trajectory)
}

/// `num_steps` evenly spaced times from `0` to `num_steps`, both ends
/// included. A single step yields `[0]`.
pub fn time_grid(num_steps: usize) -> Vec<Float> {
    match num_steps {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let end = num_steps as Float;
            let step = end / (num_steps - 1) as Float;
            let mut grid: Vec<Float> = (0..num_steps).map(|i| i as Float * step).collect();
            grid[num_steps - 1] = end;
            grid
        }
    }
}

fn adaptive<F: ODE>(
    f: &F,
    initial_state: &[Float],
    num_steps: usize,
    options: &AdaptiveOptions,
) -> Result<Trajectory> {
    check_tolerance("rtol", &options.rtol, initial_state.len())?;
    check_tolerance("atol", &options.atol, initial_state.len())?;

    let grid = time_grid(num_steps);
    if num_steps == 1 {
        return Ok(Trajectory {
            t: grid,
            y: vec![initial_state.to_vec()],
            nfev: 0,
            nstep: 0,
            naccpt: 0,
            nrejct: 0,
            status: Status::Success,
        });
    }

    let xend = grid[num_steps - 1];
    let mut y = initial_state.to_vec();
    let mut sampler = GridSampler::new(&grid);
    let (rtol, atol) = (&options.rtol, &options.atol);
    let res = match options.method {
        AdaptiveMethod::Radau5 => {
            radau5(f, 0.0, xend, &mut y, rtol, atol, &mut sampler, &options.settings)?
        }
        AdaptiveMethod::Dopri5 => {
            dopri5(f, 0.0, xend, &mut y, rtol, atol, &mut sampler, &options.settings)?
        }
        AdaptiveMethod::Auto => {
            let res = dopri5(f, 0.0, xend, &mut y, rtol, atol, &mut sampler, &options.settings)?;
            if res.status == Status::ProbablyStiff {
                // y and the sampler both stand at res.x, the last accepted point
                log::info!("evolve: stiffness detected at t = {}, continuing with radau5", res.x);
                let settings = Settings {
                    h0: Some(res.h.abs()),
                    ..options.settings.clone()
                };
                let rest = radau5(f, res.x, xend, &mut y, rtol, atol, &mut sampler, &settings)?;
                res.chain(rest)
            } else {
                res
            }
        }
    };

    if !res.status.is_success() || !sampler.is_complete() {
        return Err(Error::Integration {
            status: res.status,
            t: res.x,
        });
    }

    let (t, y) = sampler.into_data();
    Ok(trajectory(t, y, res))
}

fn fixed_step<F: ODE>(
    f: &F,
    initial_state: &[Float],
    num_steps: usize,
    options: &EulerOptions,
) -> Result<Trajectory> {
    let mut y = initial_state.to_vec();
    let mut recorder = StepRecorder::with_capacity(num_steps);
    let res = euler(
        f,
        0.0,
        &mut y,
        options.dt,
        num_steps - 1,
        options.check_non_negative,
        &mut recorder,
    )?;

    let (t, y) = recorder.into_data();
    Ok(trajectory(t, y, res))
}

fn trajectory(t: Vec<Float>, y: Vec<Vec<Float>>, res: IntegrationResult) -> Trajectory {
    Trajectory {
        t,
        y,
        nfev: res.nfev,
        nstep: res.nstep,
        naccpt: res.naccpt,
        nrejct: res.nrejct,
        status: res.status,
    }
}

fn check_tolerance(what: &'static str, tol: &Tolerance, n: usize) -> Result<()> {
    match tol.vector_len() {
        Some(len) if len != n => Err(Error::ShapeMismatch {
            what,
            expected: n,
            got: len,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Decay;

    impl ODE for Decay {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = -0.5 * y[0];
        }
    }

    #[test]
    fn grid_matches_evenly_spaced_points() {
        assert_eq!(time_grid(1), vec![0.0]);
        assert_eq!(time_grid(2), vec![0.0, 2.0]);
        let grid = time_grid(5);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[4], 5.0);
        approx::assert_relative_eq!(grid[1], 1.25);
    }

    #[test]
    fn zero_steps_is_an_error_for_every_strategy() {
        for strategy in [Strategy::adaptive(), Strategy::euler()] {
            let err = evolve(&Decay, &[1.0], 0, &strategy).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn empty_state_is_an_error() {
        let err = evolve(&Decay, &[], 3, &Strategy::euler()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn single_step_returns_the_initial_state() {
        for strategy in [Strategy::adaptive(), Strategy::euler()] {
            let traj = evolve(&Decay, &[0.7], 1, &strategy).unwrap();
            assert_eq!(traj.y, vec![vec![0.7]]);
            assert_eq!(traj.t, vec![0.0]);
            assert_eq!(traj.status, Status::Success);
        }
    }

    #[test]
    fn adaptive_rows_follow_the_grid() {
        let traj = evolve(&Decay, &[1.0], 11, &Strategy::adaptive()).unwrap();
        assert_eq!(traj.len(), 11);
        assert_eq!(traj.t, time_grid(11));
        assert_eq!(traj.y[0], vec![1.0]);
        for (t, y) in &traj {
            approx::assert_abs_diff_eq!(y[0], (-0.5 * t).exp(), epsilon = 1e-7);
        }
    }

    #[test]
    fn mismatched_vector_tolerance_is_a_shape_error() {
        let strategy = Strategy::from(AdaptiveOptions::builder().atol(vec![1e-8, 1e-8]).build());
        let err = evolve(&Decay, &[1.0], 3, &strategy).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                what: "atol",
                expected: 1,
                got: 2
            }
        ));
    }

    #[test]
    fn exhausted_step_budget_is_an_integration_error() {
        let options = AdaptiveOptions::builder()
            .settings(Settings::builder().nmax(2).hmax(0.01).build())
            .build();
        let err = evolve(&Decay, &[1.0], 10, &options.into()).unwrap_err();
        assert!(matches!(
            err,
            Error::Integration {
                status: Status::NeedLargerNmax,
                ..
            }
        ));
    }

    /// Slow decay driving a fast mode with eigenvalue -1e5.
    struct Stiff;

    impl ODE for Stiff {
        fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
            dydx[0] = -1.0e5 * (y[0] - y[1]);
            dydx[1] = -0.1 * y[1];
        }
    }

    fn adaptive_with(method: AdaptiveMethod) -> Strategy {
        AdaptiveOptions::builder().method(method).build().into()
    }

    #[test]
    fn stiffness_switches_to_the_implicit_method() {
        let traj = evolve(&Stiff, &[1.0, 1.0], 50, &Strategy::adaptive()).unwrap();
        assert_eq!(traj.len(), 50);
        assert_eq!(traj.t, time_grid(50));
        assert_eq!(traj.status, Status::Success);
        for (t, y) in &traj {
            approx::assert_abs_diff_eq!(y[1], (-0.1 * t).exp(), epsilon = 1e-6);
            approx::assert_abs_diff_eq!(y[0], y[1], epsilon = 1e-5);
        }
    }

    #[test]
    fn radau5_can_be_selected_up_front() {
        let traj = evolve(&Decay, &[1.0], 11, &adaptive_with(AdaptiveMethod::Radau5)).unwrap();
        assert_eq!(traj.t, time_grid(11));
        for (t, y) in &traj {
            approx::assert_abs_diff_eq!(y[0], (-0.5 * t).exp(), epsilon = 1e-7);
        }
    }

    #[test]
    fn euler_times_advance_by_dt() {
        let strategy = Strategy::from(EulerOptions::builder().dt(0.5).build());
        let traj = evolve(&Decay, &[1.0], 4, &strategy).unwrap();
        assert_eq!(traj.t, vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(traj.y[1], vec![0.75]);
        assert_eq!(traj.nfev, 3);
    }
}
