//! Orchestration of single runs, sweeps, persistence and plotting
//!
//! `run` executes whichever modes the configuration enables. `plot_saved`
//! is the load-and-plot path: it reads a persisted sweep back and redraws
//! the BER curves without simulating anything.

pub mod results;
pub mod single;
pub mod sweep;

pub use results::{RunOutcome, RunSummary, SweepEntry, SweepResults};
pub use single::{run_single, simulate, Link, RunReport};
pub use sweep::{default_workers, run_sweep};

use crate::domain::{SimulationConfig, TedResult};
use crate::ports::{PlotSink, ResultStore};

/// What a call to [`run`] produced
#[derive(Debug, Default)]
pub struct Outcome {
    pub single: Option<RunReport>,
    pub sweep: Option<SweepResults>,
}

/// Execute the enabled run modes.
///
/// Sweep results are saved to `store` when one is given, then plotted.
pub fn run(
    config: &SimulationConfig,
    workers: usize,
    store: Option<&mut dyn ResultStore>,
    plots: &mut dyn PlotSink,
) -> TedResult<Outcome> {
    config.validate()?;

    let mut outcome = Outcome::default();
    if !config.modes.single_run && !config.modes.compare_run {
        log::warn!("Neither single_run nor compare_run is enabled; nothing to do");
        return Ok(outcome);
    }

    if config.modes.single_run {
        outcome.single = Some(run_single(config, plots)?);
    }

    if config.modes.compare_run {
        let results = run_sweep(config, workers)?;
        log_table(&results);
        if let Some(store) = store {
            store.save(&results)?;
        }
        plots.ber_curves(&results)?;
        outcome.sweep = Some(results);
    }

    Ok(outcome)
}

/// Load persisted sweep results and plot them
pub fn plot_saved(store: &dyn ResultStore, plots: &mut dyn PlotSink) -> TedResult<SweepResults> {
    let results = store.load()?;
    log_table(&results);
    plots.ber_curves(&results)?;
    Ok(results)
}

/// BER per method and SNR at INFO level
fn log_table(results: &SweepResults) {
    for method in results.methods() {
        let row: Vec<String> = results
            .snr_db
            .iter()
            .zip(results.ber_curve(method))
            .map(|(snr, ber)| match ber {
                Some(ber) => format!("{snr}dB:{ber:.5}"),
                None => format!("{snr}dB:failed"),
            })
            .collect();
        log::info!("{:<16} {}", method.title(), row.join(" "));
    }
}
