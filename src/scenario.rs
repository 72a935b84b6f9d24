//! JSON description of a single model run.
//!
//! ```json
//! {
//!   "model": "SIR",
//!   "params": {"alpha": 0.1, "beta": 0.3},
//!   "initial_state": [0.99, 0.01, 0.0, 1.0],
//!   "num_steps": 100,
//!   "strategy": {"euler": {}},
//!   "title": "baseline"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Float,
    error::Result,
    models::{Model, ParameterSet},
    render::PlotRequest,
    solve::{options::Strategy, trajectory::Trajectory},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub model: Model,
    pub params: ParameterSet,
    pub initial_state: Vec<Float>,
    pub num_steps: usize,
    /// Adaptive with default tolerances when omitted.
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub title: Option<String>,
    /// Labels for the plot; the model's compartment names when omitted.
    #[serde(default)]
    pub legend: Option<Vec<String>>,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading scenario from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn run(&self) -> Result<Trajectory> {
        log::info!(
            "running {} scenario{} for {} steps",
            self.model,
            self.title
                .as_deref()
                .map(|t| format!(" `{t}`"))
                .unwrap_or_default(),
            self.num_steps
        );
        self.model
            .evolve(&self.initial_state, self.num_steps, &self.params, &self.strategy)
    }

    /// Plot request for a trajectory produced by [`run`](Self::run).
    pub fn plot_request<'a>(&self, trajectory: &'a Trajectory) -> PlotRequest<'a> {
        let legend = self.legend.clone().unwrap_or_else(|| {
            self.model
                .var_names()
                .iter()
                .map(|s| s.to_string())
                .collect()
        });
        PlotRequest::builder(trajectory)
            .legend(legend)
            .maybe_title(self.title.clone())
            .build()
    }
}
