//! Integration tests: sweep results and configuration on disk

use tedsim_lib::adapters::{JsonFileStore, JsonPlotWriter, PlotRecorder};
use tedsim_lib::domain::{RunModes, SimulationConfig, SnrSweep, TedMethod, UpdateMode};
use tedsim_lib::orchestrator::{self, run_sweep};
use tedsim_lib::ports::ResultStore;

fn small_sweep() -> SimulationConfig {
    SimulationConfig {
        num_symbols: 300,
        sweep: SnrSweep {
            min_snr: 2.0,
            max_snr: 8.0,
            snr_step: 3.0,
        },
        ..SimulationConfig::default()
    }
}

#[test]
fn test_sweep_save_then_load_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let results = run_sweep(&small_sweep(), 2).unwrap();

    let mut store = JsonFileStore::new(dir.path().join("sweep.json"));
    store.save(&results).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, results);
    assert_eq!(loaded.parameters, small_sweep());
    for method in TedMethod::ALL {
        assert_eq!(loaded.ber_curve(method), results.ber_curve(method));
    }
}

#[test]
fn test_load_and_plot_without_simulating() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.json");

    let config = SimulationConfig {
        modes: RunModes {
            single_run: false,
            compare_run: true,
        },
        ..small_sweep()
    };
    let mut store = JsonFileStore::new(&path);
    let mut recorder = PlotRecorder::new();
    let outcome = orchestrator::run(
        &config,
        2,
        Some(&mut store as &mut dyn ResultStore),
        &mut recorder,
    )
    .unwrap();
    let saved = outcome.sweep.unwrap();

    let mut plots = JsonPlotWriter::new(dir.path().join("plots")).unwrap();
    let loaded = orchestrator::plot_saved(&JsonFileStore::new(&path), &mut plots).unwrap();
    assert_eq!(loaded, saved);

    let json = std::fs::read_to_string(dir.path().join("plots").join("ber_vs_snr.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["snr_db"].as_array().unwrap().len(), 3);
    assert_eq!(value["curves"].as_array().unwrap().len(), 3);
    assert_eq!(value["curves"][0]["method"], "mueller");
}

#[test]
fn test_configuration_profile_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    let config = SimulationConfig {
        method: TedMethod::EarlyLate,
        update_mode: UpdateMode::ProportionalIntegral,
        frac_delay: 0.3,
        delta: 0.2,
        is_complex: false,
        ..SimulationConfig::default()
    };
    config.save(&path).unwrap();
    assert_eq!(SimulationConfig::load(&path).unwrap(), config);

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"early_late\""));
    assert!(json.contains("\"pi\""));
}

#[test]
fn test_partial_profile_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{ "num_symbols": 500, "method": "gardner" }"#).unwrap();

    let config = SimulationConfig::load(&path).unwrap();
    assert_eq!(config.num_symbols, 500);
    assert_eq!(config.method, TedMethod::Gardner);
    assert_eq!(config.sps, SimulationConfig::default().sps);
    assert!(config.validate().is_ok());
}
