//! Receiver: upsampling and symbol timing recovery
//!
//! Pipeline: channel output → polyphase upsampler → timing loop
//!           → decisions, constellation and error/offset trace
//!
//! The upsampled waveform is built once and can be shared read-only by
//! several timing loops (one per detector) running side by side.

use crate::domain::{Sample, SimulationConfig, TedMethod, TedResult, UpdateMode};
use crate::dsp::clock_recovery::{ClockRecovery, Recovery};
use crate::dsp::interpolator::{Interpolator, Upsampled};
use crate::dsp::loop_filter;
use crate::dsp::timing_error::TimingErrorDetector;

/// Timing recovery receiver built from a configuration
#[derive(Debug, Clone)]
pub struct Receiver {
    interpolator: Interpolator,
    samples_per_symbol: usize,
    num_symbols: usize,
    update_mode: UpdateMode,
    kp: f64,
    ki: f64,
    delta: f64,
}

impl Receiver {
    pub fn new(config: &SimulationConfig) -> TedResult<Self> {
        Ok(Self {
            interpolator: Interpolator::new(config.upsample, config.interp_taps)?,
            samples_per_symbol: config.sps,
            num_symbols: config.num_symbols,
            update_mode: config.update_mode,
            kp: config.kp,
            ki: config.ki,
            delta: config.delta,
        })
    }

    /// Resample the channel output onto the fine grid used by the loop
    pub fn upsample(&self, received: &[Sample]) -> Upsampled {
        self.interpolator.upsample(received)
    }

    /// Run the timing loop with `method` over an upsampled waveform
    pub fn recover(&self, waveform: &Upsampled, method: TedMethod) -> TedResult<Recovery> {
        let detector = TimingErrorDetector::new(method, self.delta);
        let filter = loop_filter::for_mode(self.update_mode, self.kp, self.ki);
        let mut clock = ClockRecovery::new(detector, filter, self.samples_per_symbol);
        clock.run(waveform, self.num_symbols)
    }

    /// Upsample then recover, for a single method
    pub fn receive(&self, received: &[Sample], method: TedMethod) -> TedResult<Recovery> {
        self.recover(&self.upsample(received), method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modem::source::Transmission;
    use crate::modem::transmitter::Transmitter;

    #[test]
    fn test_receiver_rejects_odd_interpolator_taps() {
        let config = SimulationConfig {
            interp_taps: 15,
            ..SimulationConfig::default()
        };
        assert!(Receiver::new(&config).is_err());
    }

    #[test]
    fn test_clean_receive_recovers_every_symbol() {
        let config = SimulationConfig {
            num_symbols: 600,
            ..SimulationConfig::default()
        };
        let tx = Transmission::random(config.num_symbols, config.seed);
        let transmitter = Transmitter::new(&config);
        let received = transmitter.clean(&transmitter.transmit(&tx));

        let receiver = Receiver::new(&config).unwrap();
        let recovery = receiver.receive(&received, TedMethod::MuellerMuller).unwrap();

        assert_eq!(recovery.decisions().len(), config.num_symbols);
        assert_eq!(
            &recovery.decisions()[200..],
            &tx.symbols()[200..],
            "Decisions should match once the loop has locked"
        );
    }

    #[test]
    fn test_shared_waveform_runs_every_method() {
        let config = SimulationConfig {
            num_symbols: 200,
            ..SimulationConfig::default()
        };
        let tx = Transmission::random(config.num_symbols, 11);
        let transmitter = Transmitter::new(&config);
        let received = transmitter.noisy(&transmitter.transmit(&tx), 20.0, 5);

        let receiver = Receiver::new(&config).unwrap();
        let waveform = receiver.upsample(&received);
        assert_eq!(waveform.len(), received.len() * config.upsample);

        for method in TedMethod::ALL {
            let recovery = receiver.recover(&waveform, method).unwrap();
            assert_eq!(recovery.method, method);
            assert_eq!(recovery.trace().len(), 200);
        }
    }
}
