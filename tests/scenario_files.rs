use epimodels::prelude::*;

mod common;
use common::SIR_STATE;

/// Renderer that only remembers the size of what it was asked to draw.
#[derive(Default)]
struct RowCounter {
    rows: usize,
    legend: Vec<String>,
}

impl Render for RowCounter {
    fn render(&mut self, request: &PlotRequest<'_>) -> epimodels::Result<()> {
        request.validate()?;
        self.rows = request.rows().len();
        self.legend = request.legend.clone().unwrap_or_default();
        Ok(())
    }
}

#[test]
fn scenario_file_runs_and_renders() {
    let dir = std::env::temp_dir().join(format!("epimodels-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sitr.json");
    std::fs::write(
        &path,
        r#"{
            "model": "SITR",
            "params": {
                "alpha": 0.1, "beta": 0.4, "gamma": 0.2, "delta": 0.3,
                "eta": 0.25, "f": 0.95, "fT": 0.99
            },
            "initial_state": [0.99, 0.01, 0.0, 0.0, 1.0],
            "num_steps": 30,
            "strategy": {"adaptive": {"rtol": 1e-9, "atol": 1e-12}},
            "title": "treatment"
        }"#,
    )
    .unwrap();

    let scenario = Scenario::from_path(&path).unwrap();
    let traj = scenario.run().unwrap();
    assert_eq!(traj.len(), 30);

    let mut renderer = RowCounter::default();
    renderer.render(&scenario.plot_request(&traj)).unwrap();
    assert_eq!(renderer.rows, 29);
    assert_eq!(renderer.legend, Model::Sitr.var_names());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Scenario::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn scenario_serializes_back_to_json() {
    let scenario = Scenario {
        model: Model::Sir,
        params: common::sir_params(0.1, 0.3),
        initial_state: SIR_STATE.to_vec(),
        num_steps: 5,
        strategy: Strategy::euler(),
        title: None,
        legend: None,
    };
    let json = serde_json::to_string(&scenario).unwrap();
    assert!(json.contains(r#""model":"SIR""#));
    assert_eq!(Scenario::from_json_str(&json).unwrap(), scenario);
}
