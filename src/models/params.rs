//! Named parameter sets and the typed per-model parameter records.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Float,
    core::ode::ODE,
    error::{Error, Result},
    models::{
        Model, seir::SeirParams, seqijr::SeqijrParams, sir::SirParams,
        sir_deaths::SirDeathsParams, sitr::SitrParams,
    },
};

/// Mapping from parameter name to value, as supplied by the caller.
///
/// Lookup is by exact name (`"epsilon_E"`, `"fT"`, ...). Extra entries are
/// ignored by models that do not use them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, Float>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert.
    pub fn with(mut self, name: impl Into<String>, value: Float) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Float) -> Option<Float> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<Float> {
        self.0.get(name).copied()
    }

    /// Looks up `name`, failing with [`Error::MissingParameter`] on behalf of `model`.
    pub fn require(&self, model: Model, name: &'static str) -> Result<Float> {
        self.get(name).ok_or(Error::MissingParameter { model, name })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Float)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, Float)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (K, Float)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Float); N]> for ParameterSet {
    fn from(pairs: [(K, Float); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A typed parameter record for one model variant.
///
/// The record fixes the positional order of its parameters (`PARAM_NAMES`),
/// which is also the calling convention at the solver boundary. Fraction
/// parameters (`FRACTIONS`) must lie in `[0, 1]`; all others must be
/// non-negative.
pub trait Compartmental: Copy + Into<ModelParams> {
    const MODEL: Model;
    const VAR_NAMES: &'static [&'static str];
    const PARAM_NAMES: &'static [&'static str];
    const FRACTIONS: &'static [&'static str];

    /// Builds the record from values in `PARAM_NAMES` order.
    /// `values.len()` has already been checked.
    fn from_values(values: &[Float]) -> Self;

    /// The record's values in `PARAM_NAMES` order.
    fn values(&self) -> Vec<Float>;

    /// Writes the net flow of every compartment into `dydx`.
    fn derivative(&self, y: &[Float], dydx: &mut [Float]);

    /// Gathers the record from a named set.
    fn from_set(set: &ParameterSet) -> Result<Self> {
        let values = Self::PARAM_NAMES
            .iter()
            .map(|&name| set.require(Self::MODEL, name))
            .collect::<Result<Vec<_>>>()?;
        Self::from_positional(&values)
    }

    /// Gathers the record from positional values.
    fn from_positional(values: &[Float]) -> Result<Self> {
        if values.len() != Self::PARAM_NAMES.len() {
            return Err(Error::ShapeMismatch {
                what: "positional parameters",
                expected: Self::PARAM_NAMES.len(),
                got: values.len(),
            });
        }
        for (&name, &value) in Self::PARAM_NAMES.iter().zip(values) {
            check_range(Self::MODEL, name, value, Self::FRACTIONS.contains(&name))?;
        }
        Ok(Self::from_values(values))
    }
}

fn check_range(model: Model, name: &str, value: Float, fraction: bool) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "{model} parameter `{name}` must be finite and non-negative (got {value})"
        )));
    }
    if fraction && value > 1.0 {
        return Err(Error::InvalidArgument(format!(
            "{model} parameter `{name}` is a fraction and must lie in [0, 1] (got {value})"
        )));
    }
    Ok(())
}

/// Validated parameters bound to a model variant.
///
/// This is the right-hand side handed to the integrators: it implements
/// [`ODE`] and ignores the abscissa, since none of the models are time
/// dependent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ModelParams {
    Sir(SirParams),
    SirDeaths(SirDeathsParams),
    Seir(SeirParams),
    Sitr(SitrParams),
    Seqijr(SeqijrParams),
}

impl ModelParams {
    pub fn model(&self) -> Model {
        match self {
            ModelParams::Sir(_) => Model::Sir,
            ModelParams::SirDeaths(_) => Model::SirDeaths,
            ModelParams::Seir(_) => Model::Seir,
            ModelParams::Sitr(_) => Model::Sitr,
            ModelParams::Seqijr(_) => Model::Seqijr,
        }
    }

    /// Parameter values in the model's positional order.
    pub fn values(&self) -> Vec<Float> {
        match self {
            ModelParams::Sir(p) => p.values(),
            ModelParams::SirDeaths(p) => p.values(),
            ModelParams::Seir(p) => p.values(),
            ModelParams::Sitr(p) => p.values(),
            ModelParams::Seqijr(p) => p.values(),
        }
    }

    /// Named view of the bound values.
    pub fn to_set(&self) -> ParameterSet {
        self.model()
            .param_names()
            .iter()
            .copied()
            .zip(self.values())
            .collect()
    }

    pub fn derivative(&self, y: &[Float], dydx: &mut [Float]) {
        match self {
            ModelParams::Sir(p) => p.derivative(y, dydx),
            ModelParams::SirDeaths(p) => p.derivative(y, dydx),
            ModelParams::Seir(p) => p.derivative(y, dydx),
            ModelParams::Sitr(p) => p.derivative(y, dydx),
            ModelParams::Seqijr(p) => p.derivative(y, dydx),
        }
    }
}

impl ODE for ModelParams {
    fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
        self.derivative(y, dydx)
    }
}

impl fmt::Display for ModelParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.model())?;
        for (i, (name, value)) in self
            .model()
            .param_names()
            .iter()
            .zip(self.values())
            .enumerate()
        {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

macro_rules! impl_model_params {
    ($($variant:ident => $params:ty),* $(,)?) => {
        $(
            impl From<$params> for ModelParams {
                fn from(params: $params) -> Self {
                    ModelParams::$variant(params)
                }
            }

            impl ODE for $params {
                fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
                    self.derivative(y, dydx)
                }
            }
        )*
    };
}

impl_model_params!(
    Sir => SirParams,
    SirDeaths => SirDeathsParams,
    Seir => SeirParams,
    Sitr => SitrParams,
    Seqijr => SeqijrParams,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_set_from_pairs() {
        let set = ParameterSet::from([("alpha", 0.1), ("beta", 0.3)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("beta"), Some(0.3));
        assert_eq!(set.get("gamma"), None);
    }

    #[test]
    fn require_reports_model_and_name() {
        let set = ParameterSet::new().with("alpha", 0.1);
        match set.require(Model::Sir, "beta") {
            Err(Error::MissingParameter { model, name }) => {
                assert_eq!(model, Model::Sir);
                assert_eq!(name, "beta");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fractions_are_bounded() {
        let err = SirDeathsParams::from_positional(&[0.1, 0.3, 1.5]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        // a rate above one is fine
        assert!(SirDeathsParams::from_positional(&[1.5, 0.3, 1.0]).is_ok());
    }

    #[test]
    fn negative_rates_are_rejected() {
        let err = SirParams::from_positional(&[-0.1, 0.3]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn positional_length_is_checked() {
        let err = SeirParams::from_positional(&[0.1, 0.3]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 5,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn to_set_round_trips_names() {
        let values = [0.1, 0.3, 0.2, 0.5, 0.05, 0.9, 0.95];
        let params = ModelParams::from(SitrParams::from_positional(&values).unwrap());
        let set = params.to_set();
        assert_eq!(set.get("fT"), Some(0.95));
        assert_eq!(Model::Sitr.bind(&set).unwrap(), params);
    }

    #[test]
    fn display_lists_values_in_order() {
        let params = ModelParams::from(SirParams { alpha: 0.1, beta: 0.3 });
        assert_eq!(params.to_string(), "SIR(alpha=0.1, beta=0.3)");
    }
}
