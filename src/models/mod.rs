//! Compartmental epidemic models.
//!
//! Each variant fixes the order of its compartments, the last one always
//! being the total living population `N`. Every flow that leaves the living
//! population (deaths) is subtracted from `N`, so at every instant the
//! derivatives of the other compartments sum to `dN/dt`.
//!
//! | Variant | Compartments |
//! |---|---|
//! | [`Model::Sir`] | S, I, R, N |
//! | [`Model::SirDeaths`] | S, I, R, N |
//! | [`Model::Seir`] | S, E, I, R, N |
//! | [`Model::Sitr`] | S, I, T, R, N |
//! | [`Model::Seqijr`] | S, E, Q, I, J, R, N |

pub mod params;
pub mod seir;
pub mod seqijr;
pub mod sir;
pub mod sir_deaths;
pub mod sitr;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

pub use params::{Compartmental, ModelParams, ParameterSet};
pub use seir::SeirParams;
pub use seqijr::SeqijrParams;
pub use sir::SirParams;
pub use sir_deaths::SirDeathsParams;
pub use sitr::SitrParams;

use crate::{
    Float,
    error::{Error, Result},
    solve::{evolve::evolve, options::Strategy, trajectory::Trajectory},
};

/// The model variants. Stateless: a variant only describes layout and flow
/// topology, parameters are supplied per call.
///
/// Serializes as its [`name`](Self::name) and deserializes through
/// [`FromStr`], so either side accepts any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Model {
    #[serde(rename = "SIR")]
    Sir,
    /// SIR with deaths.
    #[serde(rename = "SIR_v2")]
    SirDeaths,
    #[serde(rename = "SEIR")]
    Seir,
    #[serde(rename = "SITR")]
    Sitr,
    #[serde(rename = "SEQIJR")]
    Seqijr,
}

impl Model {
    pub const ALL: [Model; 5] = [
        Model::Sir,
        Model::SirDeaths,
        Model::Seir,
        Model::Sitr,
        Model::Seqijr,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Model::Sir => "SIR",
            Model::SirDeaths => "SIR_v2",
            Model::Seir => "SEIR",
            Model::Sitr => "SITR",
            Model::Seqijr => "SEQIJR",
        }
    }

    /// Compartment labels in state vector order. For display only.
    pub fn var_names(&self) -> &'static [&'static str] {
        match self {
            Model::Sir => SirParams::VAR_NAMES,
            Model::SirDeaths => SirDeathsParams::VAR_NAMES,
            Model::Seir => SeirParams::VAR_NAMES,
            Model::Sitr => SitrParams::VAR_NAMES,
            Model::Seqijr => SeqijrParams::VAR_NAMES,
        }
    }

    /// Required parameters, in positional order.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            Model::Sir => SirParams::PARAM_NAMES,
            Model::SirDeaths => SirDeathsParams::PARAM_NAMES,
            Model::Seir => SeirParams::PARAM_NAMES,
            Model::Sitr => SitrParams::PARAM_NAMES,
            Model::Seqijr => SeqijrParams::PARAM_NAMES,
        }
    }

    pub fn n_compartments(&self) -> usize {
        self.var_names().len()
    }

    /// Index of the total population compartment `N`.
    pub fn population_index(&self) -> usize {
        self.n_compartments() - 1
    }

    /// Validates a named parameter set into the variant's typed record.
    pub fn bind(&self, params: &ParameterSet) -> Result<ModelParams> {
        Ok(match self {
            Model::Sir => SirParams::from_set(params)?.into(),
            Model::SirDeaths => SirDeathsParams::from_set(params)?.into(),
            Model::Seir => SeirParams::from_set(params)?.into(),
            Model::Sitr => SitrParams::from_set(params)?.into(),
            Model::Seqijr => SeqijrParams::from_set(params)?.into(),
        })
    }

    /// Same as [`bind`](Self::bind) for values given in
    /// [`param_names`](Self::param_names) order.
    pub fn bind_positional(&self, values: &[Float]) -> Result<ModelParams> {
        Ok(match self {
            Model::Sir => SirParams::from_positional(values)?.into(),
            Model::SirDeaths => SirDeathsParams::from_positional(values)?.into(),
            Model::Seir => SeirParams::from_positional(values)?.into(),
            Model::Sitr => SitrParams::from_positional(values)?.into(),
            Model::Seqijr => SeqijrParams::from_positional(values)?.into(),
        })
    }

    pub fn check_state(&self, state: &[Float]) -> Result<()> {
        if state.len() != self.n_compartments() {
            return Err(Error::ShapeMismatch {
                what: "state vector",
                expected: self.n_compartments(),
                got: state.len(),
            });
        }
        Ok(())
    }

    /// Instantaneous rate of change of every compartment.
    ///
    /// `t` is accepted for solver compatibility; none of the variants depend
    /// on it.
    pub fn deriv(&self, state: &[Float], t: Float, params: &ParameterSet) -> Result<Vec<Float>> {
        self.check_state(state)?;
        let params = self.bind(params)?;
        let mut dydt = vec![0.0; state.len()];
        crate::core::ode::ODE::ode(&params, t, state, &mut dydt);
        Ok(dydt)
    }

    /// Evolves `initial_state` for `num_steps` grid points with the given strategy.
    ///
    /// State length and parameters are validated before any integration.
    pub fn evolve(
        &self,
        initial_state: &[Float],
        num_steps: usize,
        params: &ParameterSet,
        strategy: &Strategy,
    ) -> Result<Trajectory> {
        self.check_state(initial_state)?;
        let params = self.bind(params)?;
        log::debug!("evolving {params} for {num_steps} steps");
        evolve(&params, initial_state, num_steps, strategy)
    }

    /// Sum of the non-`N` derivatives minus `dN/dt`.
    ///
    /// Zero (up to rounding) for every variant: `N` absorbs exactly the
    /// outflow that is not routed to another compartment.
    ///
    /// # Errors
    /// [`Error::ShapeMismatch`] if `dydt` is not one value per compartment.
    pub fn balance(&self, dydt: &[Float]) -> Result<Float> {
        self.check_state(dydt)?;
        let n = self.population_index();
        Ok(dydt[..n].iter().sum::<Float>() - dydt[n])
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Model::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownModel(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
