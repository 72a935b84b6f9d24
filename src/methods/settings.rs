//! Settings and tolerances for the numerical integrators

use std::ops::Index;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::Float;

/// Step-size control settings for the adaptive integrators.
///
/// Every field is optional; `None` selects the method's default, which
/// should be suitable for most problems.
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The rounding unit, typically machine epsilon
    pub uround: Option<Float>,
    /// Safety factor in step-size prediction.
    pub safety_factor: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_min: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_max: Option<Float>,
    /// Beta factor for stabilized step size control. Positive values of Beta
    /// ( <= 0.04 ) make the step size control more stable.
    pub beta: Option<Float>,
    /// Maximal step size.
    pub hmax: Option<Float>,
    /// Initial step size. None will result in an initial guess
    /// provided by the [`hinit`](crate::methods::hinit::hinit) function.
    pub h0: Option<Float>,
    /// Maximum number of allowed steps.
    pub nmax: Option<usize>,
    /// Number of accepted steps between stiffness tests.
    pub nstiff: Option<usize>,
    /// Newton iterations per implicit step before the step is halved.
    pub newton_maxiter: Option<usize>,
}

/// Tolerance enum to allow scalar or per-compartment tolerances
/// using [`Into`] for easy conversion from `Float`, `[Float; N]`, or `Vec<Float>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    /// Number of entries for a vector tolerance, `None` for a scalar.
    pub fn vector_len(&self) -> Option<usize> {
        match self {
            Tolerance::Scalar(_) => None,
            Tolerance::Vector(vs) => Some(vs.len()),
        }
    }

    /// Smallest entry, used to reject non-positive tolerances. NaN if any
    /// entry is NaN.
    pub fn min(&self) -> Float {
        match self {
            Tolerance::Scalar(v) => *v,
            Tolerance::Vector(vs) if vs.iter().any(|v| v.is_nan()) => Float::NAN,
            Tolerance::Vector(vs) => vs.iter().copied().fold(Float::INFINITY, Float::min),
        }
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tolerance_indexes_everywhere() {
        let tol = Tolerance::from(1e-6);
        assert_eq!(tol[0], 1e-6);
        assert_eq!(tol[17], 1e-6);
        assert_eq!(tol.vector_len(), None);
    }

    #[test]
    fn vector_tolerance_reports_min() {
        let tol = Tolerance::from([1e-6, 1e-9, 1e-3]);
        assert_eq!(tol.vector_len(), Some(3));
        assert_eq!(tol.min(), 1e-9);
    }

    #[test]
    fn nan_entry_poisons_min() {
        assert!(Tolerance::from([Float::NAN, 1e-6]).min().is_nan());
        assert!(Tolerance::from([1e-6, Float::NAN]).min().is_nan());
    }

    #[test]
    fn settings_deserialize_partially() {
        let settings: Settings = serde_json::from_str(r#"{"nmax": 500, "hmax": 0.5}"#).unwrap();
        assert_eq!(settings.nmax, Some(500));
        assert_eq!(settings.hmax, Some(0.5));
        assert_eq!(settings.h0, None);
    }
}
