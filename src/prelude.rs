//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! ```rust
//! use epimodels::prelude::*;
//! ```

pub use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        observer::{ControlFlag, Observer},
        ode::ODE,
        status::Status,
    },
    error::Error,
    matrix::Matrix,
    models::{Compartmental, Model, ModelParams, ParameterSet},
    render::{PlotRequest, Render},
    scenario::Scenario,
    solve::{AdaptiveMethod, AdaptiveOptions, EulerOptions, Strategy, Trajectory, evolve},
};

#[cfg(feature = "plotting")]
pub use crate::render::SvgPlotter;
