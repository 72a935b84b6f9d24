//! # Example: Plotting
//!
//! Evolves the SEQIJR model and draws every compartment into
//! `seqijr.svg`. Requires the `plotting` feature:
//!
//! ```text
//! cargo run --example plot_seqijr --features plotting
//! ```
//!

use epimodels::prelude::*;

fn main() -> Result<(), Error> {
    let params = ParameterSet::new()
        .with("alpha_1", 0.1)
        .with("alpha_2", 0.08)
        .with("beta", 0.4)
        .with("epsilon_E", 0.3)
        .with("epsilon_Q", 0.05)
        .with("epsilon_J", 0.02)
        .with("k_1", 0.2)
        .with("k_2", 0.3)
        .with("gamma_1", 0.1)
        .with("gamma_2", 0.25)
        .with("f_1", 0.97)
        .with("f_2", 0.99);
    let y0 = [0.99, 0.0, 0.0, 0.01, 0.0, 0.0, 1.0];

    let traj = Model::Seqijr.evolve(&y0, 150, &params, &Strategy::adaptive())?;

    let legend = Model::Seqijr
        .var_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let request = PlotRequest::builder(&traj)
        .legend(legend)
        .title("SEQIJR")
        .build();

    SvgPlotter::new("seqijr.svg").render(&request)?;
    println!("wrote seqijr.svg");
    Ok(())
}
