//! SIR with deaths: a fraction `1 - f` of removals die and leave the total population.

use serde::{Deserialize, Serialize};

use crate::{Float, models::Model, models::params::Compartmental};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SirDeathsParams {
    pub alpha: Float,
    pub beta: Float,
    /// Fraction of removals that recover.
    pub f: Float,
}

impl Compartmental for SirDeathsParams {
    const MODEL: Model = Model::SirDeaths;
    const VAR_NAMES: &'static [&'static str] =
        &["susceptibles", "infected", "removed", "total pop"];
    const PARAM_NAMES: &'static [&'static str] = &["alpha", "beta", "f"];
    const FRACTIONS: &'static [&'static str] = &["f"];

    fn from_values(values: &[Float]) -> Self {
        Self {
            alpha: values[0],
            beta: values[1],
            f: values[2],
        }
    }

    fn values(&self) -> Vec<Float> {
        vec![self.alpha, self.beta, self.f]
    }

    fn derivative(&self, y: &[Float], dydx: &mut [Float]) {
        let (s, i) = (y[0], y[1]);

        let infection = self.beta * s * i;
        let removal = self.alpha * i;
        let recovery = self.f * removal;
        let death = self.alpha * (1.0 - self.f) * i;

        dydx[0] = -infection;
        dydx[1] = infection - removal;
        dydx[2] = recovery;
        dydx[3] = -death;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_recovers_when_f_is_one() {
        let p = SirDeathsParams {
            alpha: 0.2,
            beta: 0.5,
            f: 1.0,
        };
        let mut dy = [0.0; 4];
        p.derivative(&[0.9, 0.1, 0.0, 1.0], &mut dy);
        assert_eq!(dy[3], 0.0);
        assert_eq!(dy[2], 0.2 * 0.1);
    }

    #[test]
    fn deaths_drain_population() {
        let p = SirDeathsParams {
            alpha: 0.2,
            beta: 0.5,
            f: 0.75,
        };
        let mut dy = [0.0; 4];
        p.derivative(&[0.9, 0.1, 0.0, 1.0], &mut dy);
        assert!(dy[3] < 0.0);
        approx::assert_relative_eq!(dy[2] - dy[3], 0.2 * 0.1, max_relative = 1e-12);
    }
}
