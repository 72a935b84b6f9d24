#![allow(dead_code)]

use epimodels::prelude::*;

pub const SIR_STATE: [Float; 4] = [0.99, 0.01, 0.0, 1.0];

pub fn sir_params(alpha: Float, beta: Float) -> ParameterSet {
    ParameterSet::from([("alpha", alpha), ("beta", beta)])
}

/// Every parameter any model needs, with plausible values.
pub fn all_params() -> ParameterSet {
    ParameterSet::new()
        .with("alpha", 0.1)
        .with("alpha_1", 0.12)
        .with("alpha_2", 0.08)
        .with("beta", 0.35)
        .with("gamma", 0.2)
        .with("gamma_1", 0.15)
        .with("gamma_2", 0.25)
        .with("delta", 0.4)
        .with("eta", 0.3)
        .with("epsilon_E", 0.5)
        .with("epsilon_Q", 0.1)
        .with("epsilon_J", 0.05)
        .with("k", 0.3)
        .with("k_1", 0.2)
        .with("k_2", 0.4)
        .with("f", 0.95)
        .with("fT", 0.98)
        .with("f_1", 0.9)
        .with("f_2", 0.97)
}

/// 1% infected, everyone else susceptible, `N = 1`.
pub fn seeded_state(model: Model) -> Vec<Float> {
    let mut y = vec![0.0; model.n_compartments()];
    let infected = model
        .var_names()
        .iter()
        .position(|&name| name == "infected")
        .expect("every model has an infected compartment");
    y[0] = 0.99;
    y[infected] = 0.01;
    y[model.population_index()] = 1.0;
    y
}
