//! Single run: one method at one SNR
//!
//! Pipeline: bits → shaped, delayed waveform → noise → upsample
//!           → timing loop → BER against the transmitted symbols

use crate::domain::{Sample, SimulationConfig, TedMethod, TedResult};
use crate::dsp::clock_recovery::Recovery;
use crate::dsp::fft::FftProcessor;
use crate::modem::{bit_error_rate, BerReport, Receiver, Transmission, Transmitter};
use crate::modem::transmitter::noise_seed;
use crate::ports::PlotSink;

use super::results::RunSummary;

/// Spectrum frame size for the received-waveform plot
const SPECTRUM_FFT_SIZE: usize = 1024;

/// The noise-free part of a simulation, shared by every run of a config
pub struct Link {
    transmission: Transmission,
    transmitter: Transmitter,
    receiver: Receiver,
    /// Shaped and delayed waveform, before noise
    delayed: Vec<f64>,
}

impl Link {
    /// Validate `config` and build the transmitted waveform
    pub fn new(config: &SimulationConfig) -> TedResult<Self> {
        config.validate()?;

        let transmission = Transmission::random(config.num_symbols, config.seed);
        let transmitter = Transmitter::new(config);
        let receiver = Receiver::new(config)?;
        let delayed = transmitter.transmit(&transmission);

        Ok(Self {
            transmission,
            transmitter,
            receiver,
            delayed,
        })
    }

    /// Channel output at `snr_db`, or the clean waveform for `None`
    pub fn received(&self, snr_db: Option<f64>, seed: u64) -> Vec<Sample> {
        match snr_db {
            Some(snr) => self.transmitter.noisy(&self.delayed, snr, seed),
            None => self.transmitter.clean(&self.delayed),
        }
    }

    pub fn transmission(&self) -> &Transmission {
        &self.transmission
    }

    pub fn transmitter(&self) -> &Transmitter {
        &self.transmitter
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub method: TedMethod,
    /// `None` for a noise-free run
    pub snr_db: Option<f64>,
    pub ber: BerReport,
    pub recovery: Recovery,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        summarize(&self.ber, &self.recovery)
    }
}

pub(crate) fn summarize(ber: &BerReport, recovery: &Recovery) -> RunSummary {
    RunSummary {
        ber: ber.ber(),
        errors: ber.errors(),
        compared: ber.compared(),
        percent_correct: ber.percent_correct(),
        final_offset: recovery.final_offset(),
        converged_offset: recovery.converged_offset(),
    }
}

/// Run `method` once at `snr_db` (`None` for no noise), without plotting.
///
/// Noise is seeded from the config seed, so repeated calls agree.
pub fn simulate(config: &SimulationConfig, method: TedMethod, snr_db: Option<f64>) -> TedResult<RunReport> {
    let link = Link::new(config)?;
    let received = link.received(snr_db, noise_seed(config.seed, 0));
    run_on(&link, config, method, snr_db, &received)
}

fn run_on(
    link: &Link,
    config: &SimulationConfig,
    method: TedMethod,
    snr_db: Option<f64>,
    received: &[Sample],
) -> TedResult<RunReport> {
    let recovery = link.receiver().receive(received, method)?;
    let ber = bit_error_rate(
        recovery.decisions(),
        link.transmission().symbols(),
        config.discard(),
    )?;

    Ok(RunReport {
        method,
        snr_db,
        ber,
        recovery,
    })
}

/// The configured single run: `config.method` at `config.single_snr`,
/// with its plots sent to `plots`
pub fn run_single(config: &SimulationConfig, plots: &mut dyn PlotSink) -> TedResult<RunReport> {
    log::info!(
        "Single run: {} at {} dB, {} symbols, delay {:.2} samples",
        config.method.title(),
        config.single_snr,
        config.num_symbols,
        config.total_delay()
    );

    let link = Link::new(config)?;
    let snr = Some(config.single_snr);
    let received = link.received(snr, noise_seed(config.seed, 0));
    let report = run_on(&link, config, config.method, snr, &received)?;

    let summary = report.summary();
    log::info!(
        "{}: BER {:.6} ({} errors in {} symbols, {:.2}% correct), final offset {:.4}, converged offset {:.4} (true delay {:.4})",
        config.method.title(),
        summary.ber,
        summary.errors,
        summary.compared,
        summary.percent_correct,
        summary.final_offset,
        summary.converged_offset,
        config.total_delay()
    );

    let shaper = link.transmitter().shaper();
    plots.filter_taps(shaper.taps(), &shaper.zero_crossings())?;
    plots.spectrum(&FftProcessor::new(SPECTRUM_FFT_SIZE).averaged(&received))?;
    plots.timing_trace(config.method, report.recovery.trace())?;
    plots.constellation(config.method, report.recovery.constellation(config.discard()))?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::PlotRecorder;
    use crate::domain::TedError;

    fn small() -> SimulationConfig {
        SimulationConfig {
            num_symbols: 400,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn single_run_plots_everything() {
        let config = small();
        let mut plots = PlotRecorder::new();
        let report = run_single(&config, &mut plots).unwrap();

        assert_eq!(report.method, config.method);
        assert_eq!(report.ber.compared(), 400 - 30);
        assert_eq!(plots.filter_taps.len(), config.rc_taps);
        assert_eq!(plots.zero_crossings.len(), 12);
        assert_eq!(plots.spectrum_db.len(), SPECTRUM_FFT_SIZE);
        assert_eq!(plots.traces[&config.method].len(), 400);
        assert_eq!(plots.constellations[&config.method].len(), 370);
    }

    #[test]
    fn simulate_is_reproducible() {
        let config = small();
        let a = simulate(&config, TedMethod::Gardner, Some(5.0)).unwrap();
        let b = simulate(&config, TedMethod::Gardner, Some(5.0)).unwrap();
        assert_eq!(a.summary(), b.summary());
    }

    #[test]
    fn invalid_config_fails_before_running() {
        let config = SimulationConfig {
            sps: 1,
            ..small()
        };
        assert!(matches!(
            simulate(&config, TedMethod::MuellerMuller, None),
            Err(TedError::Configuration(_))
        ));
    }

    #[test]
    fn keep_all_compares_every_symbol() {
        let config = SimulationConfig {
            keep_all: true,
            ..small()
        };
        let report = simulate(&config, TedMethod::MuellerMuller, None).unwrap();
        assert_eq!(report.ber.compared(), 400);
    }

    #[test]
    fn preamble_longer_than_run_is_alignment_error() {
        let config = SimulationConfig {
            num_symbols: 20,
            preamble: 20,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            simulate(&config, TedMethod::MuellerMuller, None),
            Err(TedError::Alignment { discard: 20, .. })
        ));
    }
}
