//! SEQIJR: exposed are either quarantined (`gamma_1`) or become infected
//! (`k_1`); quarantined (`k_2`) and infected (`gamma_2`) move to isolation.
//! Infected and isolated are removed at `alpha_1` / `alpha_2` and recover
//! with probability `f_1` / `f_2`.

use serde::{Deserialize, Serialize};

use crate::{Float, models::Model, models::params::Compartmental};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeqijrParams {
    pub alpha_1: Float,
    pub alpha_2: Float,
    pub beta: Float,
    #[serde(rename = "epsilon_E")]
    pub epsilon_e: Float,
    #[serde(rename = "epsilon_Q")]
    pub epsilon_q: Float,
    #[serde(rename = "epsilon_J")]
    pub epsilon_j: Float,
    pub k_1: Float,
    pub k_2: Float,
    pub gamma_1: Float,
    pub gamma_2: Float,
    pub f_1: Float,
    pub f_2: Float,
}

impl Compartmental for SeqijrParams {
    const MODEL: Model = Model::Seqijr;
    const VAR_NAMES: &'static [&'static str] = &[
        "susceptibles",
        "exposed",
        "quarantined",
        "infected",
        "isolated",
        "removed",
        "total pop",
    ];
    const PARAM_NAMES: &'static [&'static str] = &[
        "alpha_1", "alpha_2", "beta", "epsilon_E", "epsilon_Q", "epsilon_J", "k_1", "k_2",
        "gamma_1", "gamma_2", "f_1", "f_2",
    ];
    const FRACTIONS: &'static [&'static str] = &["f_1", "f_2"];

    fn from_values(values: &[Float]) -> Self {
        Self {
            alpha_1: values[0],
            alpha_2: values[1],
            beta: values[2],
            epsilon_e: values[3],
            epsilon_q: values[4],
            epsilon_j: values[5],
            k_1: values[6],
            k_2: values[7],
            gamma_1: values[8],
            gamma_2: values[9],
            f_1: values[10],
            f_2: values[11],
        }
    }

    fn values(&self) -> Vec<Float> {
        vec![
            self.alpha_1,
            self.alpha_2,
            self.beta,
            self.epsilon_e,
            self.epsilon_q,
            self.epsilon_j,
            self.k_1,
            self.k_2,
            self.gamma_1,
            self.gamma_2,
            self.f_1,
            self.f_2,
        ]
    }

    fn derivative(&self, y: &[Float], dydx: &mut [Float]) {
        let (s, e, q, i, j) = (y[0], y[1], y[2], y[3], y[4]);

        let infectious = self.epsilon_e * e + self.epsilon_q * q + i + self.epsilon_j * j;
        let infection = self.beta * s * infectious;
        let quarantine = self.gamma_1 * e;
        let onset = self.k_1 * e;
        let quarantine_isolation = self.k_2 * q;
        let isolation = self.gamma_2 * i;
        let infected_removal = self.alpha_1 * i;
        let isolated_removal = self.alpha_2 * j;
        let recovery = self.f_1 * infected_removal + self.f_2 * isolated_removal;
        let death =
            self.alpha_1 * (1.0 - self.f_1) * i + self.alpha_2 * (1.0 - self.f_2) * j;

        dydx[0] = -infection;
        dydx[1] = infection - (onset + quarantine);
        dydx[2] = quarantine - quarantine_isolation;
        dydx[3] = onset - (infected_removal + isolation);
        dydx[4] = quarantine_isolation + isolation - isolated_removal;
        dydx[5] = recovery;
        dydx[6] = -death;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarantined_flow_into_isolation() {
        let p = SeqijrParams {
            alpha_1: 0.1,
            alpha_2: 0.2,
            beta: 0.0,
            epsilon_e: 0.0,
            epsilon_q: 0.0,
            epsilon_j: 0.0,
            k_1: 0.0,
            k_2: 0.25,
            gamma_1: 0.0,
            gamma_2: 0.0,
            f_1: 1.0,
            f_2: 1.0,
        };
        let mut dy = [0.0; 7];
        p.derivative(&[0.6, 0.0, 0.4, 0.0, 0.0, 0.0, 1.0], &mut dy);
        assert_eq!(dy[2], -0.25 * 0.4);
        assert_eq!(dy[4], 0.25 * 0.4);
        assert_eq!(dy[6], 0.0);
    }
}
