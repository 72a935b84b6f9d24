//! SITR: infected may enter treatment (rate `gamma`); the treated are
//! partially infectious (`delta`) and leave at rate `eta`, recovering with
//! probability `fT`.

use serde::{Deserialize, Serialize};

use crate::{Float, models::Model, models::params::Compartmental};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SitrParams {
    pub alpha: Float,
    pub beta: Float,
    /// Treatment rate of infected.
    pub gamma: Float,
    /// Relative infectiousness of the treated.
    pub delta: Float,
    /// Removal rate of the treated.
    pub eta: Float,
    pub f: Float,
    /// Fraction of treated removals that recover.
    #[serde(rename = "fT")]
    pub f_t: Float,
}

impl Compartmental for SitrParams {
    const MODEL: Model = Model::Sitr;
    const VAR_NAMES: &'static [&'static str] =
        &["susceptibles", "infected", "treated", "removed", "total pop"];
    const PARAM_NAMES: &'static [&'static str] =
        &["alpha", "beta", "gamma", "delta", "eta", "f", "fT"];
    const FRACTIONS: &'static [&'static str] = &["f", "fT"];

    fn from_values(values: &[Float]) -> Self {
        Self {
            alpha: values[0],
            beta: values[1],
            gamma: values[2],
            delta: values[3],
            eta: values[4],
            f: values[5],
            f_t: values[6],
        }
    }

    fn values(&self) -> Vec<Float> {
        vec![
            self.alpha, self.beta, self.gamma, self.delta, self.eta, self.f, self.f_t,
        ]
    }

    fn derivative(&self, y: &[Float], dydx: &mut [Float]) {
        let (s, i, t) = (y[0], y[1], y[2]);

        let infectious = i + self.delta * t;
        let infection = self.beta * s * infectious;
        let treatment = self.gamma * i;
        let removal = self.alpha * i;
        let treated_removal = self.eta * t;
        let recovery = self.f * removal + self.f_t * treated_removal;
        let death = self.alpha * (1.0 - self.f) * i + self.eta * (1.0 - self.f_t) * t;

        dydx[0] = -infection;
        dydx[1] = infection - (removal + treatment);
        dydx[2] = treatment - treated_removal;
        dydx[3] = recovery;
        dydx[4] = -death;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treated_only_population_drains_through_eta() {
        let p = SitrParams {
            alpha: 0.1,
            beta: 0.3,
            gamma: 0.2,
            delta: 0.0,
            eta: 0.5,
            f: 0.9,
            f_t: 0.8,
        };
        let mut dy = [0.0; 5];
        p.derivative(&[0.8, 0.0, 0.2, 0.0, 1.0], &mut dy);
        assert_eq!(dy[0], 0.0);
        assert_eq!(dy[1], 0.0);
        assert_eq!(dy[2], -0.5 * 0.2);
        assert_eq!(dy[3], 0.8 * (0.5 * 0.2));
        approx::assert_relative_eq!(dy[4], -(0.5 * (1.0 - 0.8) * 0.2), max_relative = 1e-12);
    }
}
