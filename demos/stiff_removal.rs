//! # Example: Stiff SIR
//!
//! Removal at 1000 per unit time makes the infected compartment a fast mode.
//! DOPRI5 alone gives up once it detects stiffness; the default adaptive
//! strategy continues with Radau5 and finishes the run.
//!

use epimodels::prelude::*;

fn main() -> Result<(), Error> {
    let params = ParameterSet::from([("alpha", 1000.0), ("beta", 0.3)]);
    let y0 = [0.99, 0.01, 0.0, 1.0];
    let steps = 1000;

    let explicit: Strategy = AdaptiveOptions::builder()
        .method(AdaptiveMethod::Dopri5)
        .build()
        .into();
    match Model::Sir.evolve(&y0, steps, &params, &explicit) {
        Ok(traj) => println!("dopri5 finished with {} evaluations", traj.nfev),
        Err(e) => println!("dopri5 only: {e}"),
    }

    let traj = Model::Sir.evolve(&y0, steps, &params, &Strategy::adaptive())?;
    println!(
        "auto: {:?} after {} evaluations ({} accepted, {} rejected steps)",
        traj.status, traj.nfev, traj.naccpt, traj.nrejct
    );
    if let Some(last) = traj.last() {
        println!("final state: {last:?}");
    }
    Ok(())
}
