//! Compartmental epidemic models evolved as systems of ordinary differential
//! equations.
//!
//! A [`Model`](models::Model) variant (SIR, SIR with deaths, SEIR, SITR,
//! SEQIJR) fixes the compartments of the state vector and the flows between
//! them. Its parameters are bound from a named [`ParameterSet`] and the
//! resulting right-hand side is advanced by [`evolve`] with either an
//! adaptive Dormand-Prince 5(4) solver, which hands over to Radau IIA when
//! the system turns stiff, or fixed-step Euler.
//!
//! ```
//! use epimodels::prelude::*;
//!
//! let params = ParameterSet::from([("alpha", 0.1), ("beta", 0.3)]);
//! let trajectory = Model::Sir
//!     .evolve(&[0.99, 0.01, 0.0, 1.0], 50, &params, &Strategy::adaptive())
//!     .unwrap();
//! assert_eq!(trajectory.len(), 50);
//! ```

pub mod core;
pub mod error;
pub mod matrix;
pub mod methods;
pub mod models;
pub mod prelude;
pub mod render;
pub mod scenario;
pub mod solve;

pub use error::{Error, Result};
pub use models::{Model, ModelParams, ParameterSet};
pub use scenario::Scenario;
pub use solve::{Strategy, Trajectory, evolve};

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Floating point type of every state vector and parameter.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
