//! Integration strategies and their options

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    Float,
    methods::settings::{Settings, Tolerance},
};

/// Default relative and absolute tolerance of the adaptive strategy, the
/// square root of the `f64` machine epsilon.
pub const DEFAULT_TOLERANCE: Float = 1.49012e-8;

/// How [`evolve`](super::evolve::evolve) advances the state.
///
/// Deserializes from an externally tagged object, e.g. `{"euler": {"dt": 0.5}}`
/// or `{"adaptive": {}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Step-size controlled integration sampled on the time grid. Starts
    /// with Dormand-Prince 5(4) and switches to Radau IIA when the problem
    /// turns stiff (see [`AdaptiveMethod`]).
    Adaptive(AdaptiveOptions),
    /// Fixed-step explicit Euler.
    Euler(EulerOptions),
}

impl Strategy {
    /// Adaptive strategy with default tolerances.
    pub fn adaptive() -> Self {
        Strategy::Adaptive(AdaptiveOptions::default())
    }

    /// Euler strategy with a unit step.
    pub fn euler() -> Self {
        Strategy::Euler(EulerOptions::default())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Adaptive(_) => "adaptive",
            Strategy::Euler(_) => "euler",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::adaptive()
    }
}

impl From<AdaptiveOptions> for Strategy {
    fn from(options: AdaptiveOptions) -> Self {
        Strategy::Adaptive(options)
    }
}

impl From<EulerOptions> for Strategy {
    fn from(options: EulerOptions) -> Self {
        Strategy::Euler(options)
    }
}

/// Integrator behind [`Strategy::Adaptive`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveMethod {
    /// DOPRI5, continued with Radau5 from the last accepted point if
    /// stiffness is detected.
    #[default]
    Auto,
    /// DOPRI5 only; stiffness is an error.
    Dopri5,
    /// Radau5 from the start.
    Radau5,
}

#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdaptiveOptions {
    #[builder(default)]
    pub method: AdaptiveMethod,
    /// Relative tolerance for error estimation.
    #[builder(default = Tolerance::Scalar(DEFAULT_TOLERANCE), into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for error estimation.
    #[builder(default = Tolerance::Scalar(DEFAULT_TOLERANCE), into)]
    pub atol: Tolerance,
    /// Step-size control settings.
    #[builder(default)]
    pub settings: Settings,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EulerOptions {
    /// Step size. One step per grid point with the default of `1.0`.
    #[builder(default = 1.0)]
    pub dt: Float,
    /// Fail on the first negative compartment instead of logging it.
    #[builder(default = false)]
    pub check_non_negative: bool,
}

impl Default for EulerOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let Strategy::Adaptive(adaptive) = Strategy::default() else {
            panic!("default strategy should be adaptive");
        };
        assert_eq!(adaptive.rtol, Tolerance::Scalar(DEFAULT_TOLERANCE));
        assert_eq!(adaptive.atol, Tolerance::Scalar(DEFAULT_TOLERANCE));
        assert_eq!(adaptive.settings, Settings::default());
        assert_eq!(adaptive.method, AdaptiveMethod::Auto);

        let euler = EulerOptions::default();
        assert_eq!(euler.dt, 1.0);
        assert!(!euler.check_non_negative);
    }

    #[test]
    fn strategies_deserialize_from_tagged_objects() {
        let s: Strategy = serde_json::from_str(r#"{"euler": {"dt": 0.5}}"#).unwrap();
        assert_eq!(s, Strategy::Euler(EulerOptions::builder().dt(0.5).build()));

        let s: Strategy =
            serde_json::from_str(r#"{"adaptive": {"rtol": 1e-6, "settings": {"nmax": 10}}}"#)
                .unwrap();
        let Strategy::Adaptive(options) = s else {
            panic!("expected adaptive");
        };
        assert_eq!(options.rtol, Tolerance::Scalar(1e-6));
        assert_eq!(options.atol, Tolerance::Scalar(DEFAULT_TOLERANCE));
        assert_eq!(options.settings.nmax, Some(10));
    }

    #[test]
    fn method_is_named_in_snake_case() {
        let s: Strategy = serde_json::from_str(r#"{"adaptive": {"method": "radau5"}}"#).unwrap();
        let Strategy::Adaptive(options) = s else {
            panic!("expected adaptive");
        };
        assert_eq!(options.method, AdaptiveMethod::Radau5);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let res: Result<Strategy, _> = serde_json::from_str(r#"{"euler": {"step": 0.5}}"#);
        assert!(res.is_err());
    }
}
