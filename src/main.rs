use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tedsim_lib::adapters::{JsonFileStore, JsonPlotWriter, PlotRecorder};
use tedsim_lib::domain::{SimulationConfig, TedMethod, TedResult, UpdateMode};
use tedsim_lib::orchestrator;
use tedsim_lib::ports::{PlotSink, ResultStore};

/// BPSK symbol timing recovery simulator
///
/// Options override the values of `--config` (or the defaults).
#[derive(Parser, Debug)]
#[command(name = "tedsim", version, about)]
struct Args {
    /// JSON configuration profile to start from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Run `--method` once at `--snr`
    #[arg(long)]
    single: bool,

    /// Compare every method across the SNR sweep
    #[arg(long)]
    compare: bool,

    /// Save sweep results to this JSON file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Plot previously saved sweep results instead of simulating
    #[arg(long, conflicts_with_all = ["single", "compare", "save"])]
    load: Option<PathBuf>,

    /// Directory for JSON plot data
    #[arg(long)]
    plot_dir: Option<PathBuf>,

    /// Sweep worker threads (default: available cores)
    #[arg(long)]
    workers: Option<usize>,

    #[arg(long)]
    num_symbols: Option<usize>,

    #[arg(long)]
    sps: Option<usize>,

    #[arg(long)]
    rc_taps: Option<usize>,

    #[arg(long)]
    rolloff: Option<f64>,

    #[arg(long)]
    int_delay: Option<usize>,

    #[arg(long)]
    frac_delay: Option<f64>,

    #[arg(long)]
    sinc_taps: Option<usize>,

    #[arg(long)]
    upsample: Option<usize>,

    #[arg(long)]
    interp_taps: Option<usize>,

    /// Real-valued noise instead of complex I/Q noise
    #[arg(long)]
    real_noise: bool,

    /// mueller, gardner or early_late
    #[arg(long)]
    method: Option<TedMethod>,

    /// proportional or pi
    #[arg(long)]
    update_mode: Option<UpdateMode>,

    #[arg(long)]
    kp: Option<f64>,

    #[arg(long)]
    ki: Option<f64>,

    /// Early-Late gate offset as a fraction of the symbol period
    #[arg(long)]
    delta: Option<f64>,

    /// SNR in dB for the single run
    #[arg(long, allow_negative_numbers = true)]
    snr: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    min_snr: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    max_snr: Option<f64>,

    #[arg(long)]
    snr_step: Option<f64>,

    /// Count every decision in the BER, including the preamble
    #[arg(long)]
    keep_all: bool,

    #[arg(long)]
    preamble: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Start from the profile (or defaults) and apply every given override
    fn configuration(&self) -> TedResult<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field {
                    config.$field = value;
                })*
            };
        }
        apply!(
            num_symbols, sps, rc_taps, rolloff, int_delay, frac_delay, sinc_taps, upsample,
            interp_taps, method, update_mode, kp, ki, delta, preamble, seed,
        );

        if let Some(snr) = self.snr {
            config.single_snr = snr;
        }
        if let Some(min) = self.min_snr {
            config.sweep.min_snr = min;
        }
        if let Some(max) = self.max_snr {
            config.sweep.max_snr = max;
        }
        if let Some(step) = self.snr_step {
            config.sweep.snr_step = step;
        }
        if self.real_noise {
            config.is_complex = false;
        }
        if self.keep_all {
            config.keep_all = true;
        }
        if self.single || self.compare {
            config.modes.single_run = self.single;
            config.modes.compare_run = self.compare;
        }

        Ok(config)
    }
}

fn run(args: &Args) -> TedResult<()> {
    let mut plots: Box<dyn PlotSink> = match &args.plot_dir {
        Some(dir) => Box::new(JsonPlotWriter::new(dir)?),
        None => Box::new(PlotRecorder::new()),
    };

    if let Some(path) = &args.load {
        let store = JsonFileStore::new(path);
        orchestrator::plot_saved(&store, plots.as_mut())?;
        return Ok(());
    }

    let config = args.configuration()?;
    config.validate()?;
    if let Some(path) = &args.write_config {
        config.save(path)?;
        log::info!("Wrote configuration to {}", path.display());
    }

    let mut store = args.save.as_ref().map(JsonFileStore::new);
    let workers = args.workers.unwrap_or_else(orchestrator::default_workers);
    orchestrator::run(
        &config,
        workers,
        store.as_mut().map(|s| s as &mut dyn ResultStore),
        plots.as_mut(),
    )?;

    if let Some(dir) = &args.plot_dir {
        log::info!("Plot data written to {}", dir.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
