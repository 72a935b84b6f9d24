//! SIR: susceptible, infected, removed, with a constant total population.

use serde::{Deserialize, Serialize};

use crate::{Float, models::Model, models::params::Compartmental};

/// Parameters of the closed SIR model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SirParams {
    /// Removal rate of infected.
    pub alpha: Float,
    /// Transmission rate.
    pub beta: Float,
}

impl Compartmental for SirParams {
    const MODEL: Model = Model::Sir;
    const VAR_NAMES: &'static [&'static str] =
        &["susceptibles", "infected", "removed", "total pop"];
    const PARAM_NAMES: &'static [&'static str] = &["alpha", "beta"];
    const FRACTIONS: &'static [&'static str] = &[];

    fn from_values(values: &[Float]) -> Self {
        Self {
            alpha: values[0],
            beta: values[1],
        }
    }

    fn values(&self) -> Vec<Float> {
        vec![self.alpha, self.beta]
    }

    fn derivative(&self, y: &[Float], dydx: &mut [Float]) {
        let (s, i) = (y[0], y[1]);

        let infection = self.beta * s * i;
        let removal = self.alpha * i;

        dydx[0] = -infection;
        dydx[1] = infection - removal;
        dydx[2] = removal;
        dydx[3] = 0.0;
    }
}
