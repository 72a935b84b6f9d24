//! # Example: Scenario files
//!
//! Runs a scenario described in JSON. Pass a path as the first argument, or
//! run without arguments to use the built-in SEQIJR scenario.
//!

use epimodels::prelude::*;

const DEFAULT: &str = r#"{
    "model": "SEQIJR",
    "params": {
        "alpha_1": 0.1, "alpha_2": 0.08, "beta": 0.4,
        "epsilon_E": 0.3, "epsilon_Q": 0.05, "epsilon_J": 0.02,
        "k_1": 0.2, "k_2": 0.3, "gamma_1": 0.1, "gamma_2": 0.25,
        "f_1": 0.97, "f_2": 0.99
    },
    "initial_state": [0.99, 0.0, 0.0, 0.01, 0.0, 0.0, 1.0],
    "num_steps": 200,
    "title": "Quarantine and isolation"
}"#;

fn main() -> Result<(), Error> {
    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::from_path(path)?,
        None => Scenario::from_json_str(DEFAULT)?,
    };

    let traj = scenario.run()?;
    println!(
        "{} ({}): {} rows, status {:?}",
        scenario.title.as_deref().unwrap_or("untitled"),
        scenario.model,
        traj.len(),
        traj.status
    );

    let pop = scenario.model.population_index();
    if let (Some(first), Some(last)) = (traj.y.first(), traj.last()) {
        println!("population {:.4} -> {:.4}", first[pop], last[pop]);
    }
    Ok(())
}
