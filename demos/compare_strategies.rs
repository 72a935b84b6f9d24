//! # Example: Adaptive vs Euler
//!
//! Evolves the same SEIR outbreak with the adaptive Dormand-Prince solver
//! and with unit-step Euler, then prints how far apart the two runs drift.
//!

use epimodels::prelude::*;

fn main() -> Result<(), Error> {
    let params = ParameterSet::new()
        .with("alpha", 0.1)
        .with("beta", 0.5)
        .with("epsilon_E", 0.3)
        .with("k", 0.2)
        .with("f", 0.98);
    let y0 = [0.99, 0.0, 0.01, 0.0, 1.0];
    let steps = 100;

    let adaptive = Model::Seir.evolve(&y0, steps, &params, &Strategy::adaptive())?;
    let euler = Model::Seir.evolve(&y0, steps, &params, &Strategy::euler())?;

    println!(
        "adaptive: {} function evaluations, euler: {}",
        adaptive.nfev, euler.nfev
    );

    // The adaptive grid spans [0, steps] over steps - 1 intervals, Euler
    // takes unit steps, so compare final states only.
    let names = Model::Seir.var_names();
    if let (Some(a), Some(e)) = (adaptive.last(), euler.last()) {
        for ((name, a), e) in names.iter().zip(a).zip(e) {
            println!("{name:>12}: adaptive {a:.5}  euler {e:.5}  diff {:+.2e}", e - a);
        }
    }
    Ok(())
}
