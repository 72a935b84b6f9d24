//! SEIR: an exposed stage that is partially infectious (`epsilon_E`) before
//! progressing to infected at rate `k`.

use serde::{Deserialize, Serialize};

use crate::{Float, models::Model, models::params::Compartmental};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeirParams {
    pub alpha: Float,
    pub beta: Float,
    /// Relative infectiousness of the exposed.
    #[serde(rename = "epsilon_E")]
    pub epsilon_e: Float,
    /// Progression rate from exposed to infected.
    pub k: Float,
    pub f: Float,
}

impl Compartmental for SeirParams {
    const MODEL: Model = Model::Seir;
    const VAR_NAMES: &'static [&'static str] =
        &["susceptibles", "exposed", "infected", "removed", "total pop"];
    const PARAM_NAMES: &'static [&'static str] = &["alpha", "beta", "epsilon_E", "k", "f"];
    const FRACTIONS: &'static [&'static str] = &["f"];

    fn from_values(values: &[Float]) -> Self {
        Self {
            alpha: values[0],
            beta: values[1],
            epsilon_e: values[2],
            k: values[3],
            f: values[4],
        }
    }

    fn values(&self) -> Vec<Float> {
        vec![self.alpha, self.beta, self.epsilon_e, self.k, self.f]
    }

    fn derivative(&self, y: &[Float], dydx: &mut [Float]) {
        let (s, e, i) = (y[0], y[1], y[2]);

        let infectious = self.epsilon_e * e + i;
        let infection = self.beta * s * infectious;
        let progression = self.k * e;
        let removal = self.alpha * i;
        let recovery = self.f * removal;
        let death = self.alpha * (1.0 - self.f) * i;

        dydx[0] = -infection;
        dydx[1] = infection - progression;
        dydx[2] = progression - removal;
        dydx[3] = recovery;
        dydx[4] = -death;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposed_contribute_to_infection() {
        let p = SeirParams {
            alpha: 0.1,
            beta: 0.4,
            epsilon_e: 0.5,
            k: 0.2,
            f: 0.9,
        };
        let mut dy = [0.0; 5];
        // no infected, only exposed
        p.derivative(&[0.9, 0.1, 0.0, 0.0, 1.0], &mut dy);
        assert_eq!(dy[0], -0.4 * 0.9 * (0.5 * 0.1));
        assert_eq!(dy[2], 0.2 * 0.1);
        assert_eq!(dy[4], 0.0);
    }
}
