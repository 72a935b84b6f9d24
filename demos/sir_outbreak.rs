//! # Example: SIR outbreak
//!
//! Classic SIR epidemic with recovery rate alpha = 0.1 and transmission
//! rate beta = 0.3 (basic reproduction number 3), starting from 1% infected.
//!
//! Equations:
//! dS/dt = -beta S I
//! dI/dt = beta S I - alpha I
//! dR/dt = alpha I
//!

use epimodels::prelude::*;

fn main() {
    let params = ParameterSet::from([("alpha", 0.1), ("beta", 0.3)]);
    let y0 = [0.99, 0.01, 0.0, 1.0];

    match Model::Sir.evolve(&y0, 120, &params, &Strategy::adaptive()) {
        Ok(traj) => {
            println!("Final status: {:?}", traj.status);
            println!("Number of function evaluations: {}", traj.nfev);
            println!("Number of accepted steps: {}", traj.naccpt);
            println!("Number of rejected steps: {}", traj.nrejct);

            // Peak of the infected compartment
            if let Some((t_peak, y_peak)) = traj
                .iter()
                .max_by(|(_, a), (_, b)| a[1].total_cmp(&b[1]))
            {
                println!("Infection peak at t = {t_peak:.2}: I = {:.4}", y_peak[1]);
            }

            let names = Model::Sir.var_names();
            for (t, y) in traj.iter().step_by(10) {
                let row: Vec<String> = names
                    .iter()
                    .zip(y)
                    .map(|(name, v)| format!("{name} = {v:.4}"))
                    .collect();
                println!("t = {t:6.2}  {}", row.join(", "));
            }
        }
        Err(e) => eprintln!("Evolution failed: {e}"),
    }
}
