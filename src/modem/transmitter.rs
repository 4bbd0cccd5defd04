//! Transmitter and channel model
//!
//! Pipeline: pulse train → raised cosine → integer delay → fractional delay
//!           → AWGN at the requested SNR
//!
//! Everything up to the noise is deterministic, so a sweep shapes and
//! delays the waveform once and only re-draws the noise per SNR point.

use num_complex::Complex64;

use crate::domain::{Sample, SimulationConfig};
use crate::dsp::filter::FirFilter;
use crate::dsp::noise::add_awgn;
use crate::dsp::raised_cosine::RaisedCosineShaper;

use super::source::Transmission;

/// Shapes symbols and applies the channel impairments of a configuration
pub struct Transmitter {
    shaper: RaisedCosineShaper,
    samples_per_symbol: usize,
    int_delay: usize,
    /// `None` when the fractional delay is zero
    frac_delay: Option<FirFilter>,
    is_complex: bool,
}

impl Transmitter {
    pub fn new(config: &SimulationConfig) -> Self {
        let frac_delay = if config.frac_delay > 0.0 {
            Some(FirFilter::fractional_delay(config.frac_delay, config.sinc_taps))
        } else {
            None
        };

        Self {
            shaper: RaisedCosineShaper::new(config.rc_taps, config.rolloff, config.sps),
            samples_per_symbol: config.sps,
            int_delay: config.int_delay,
            frac_delay,
            is_complex: config.is_complex,
        }
    }

    /// Pulse shaped waveform, before any channel impairment
    pub fn shape(&self, transmission: &Transmission) -> Vec<f64> {
        self.shaper
            .shape(&transmission.pulse_train(self.samples_per_symbol))
    }

    /// Apply the integer then the fractional channel delay
    pub fn delay(&self, shaped: &[f64]) -> Vec<f64> {
        let delayed = integer_delay(shaped, self.int_delay);
        match &self.frac_delay {
            Some(filter) => filter.filter_centered(&delayed),
            None => delayed,
        }
    }

    /// Shaped and delayed waveform, noise free
    pub fn transmit(&self, transmission: &Transmission) -> Vec<f64> {
        self.delay(&self.shape(transmission))
    }

    /// Add white Gaussian noise at `snr_db` to a delayed waveform
    pub fn noisy(&self, delayed: &[f64], snr_db: f64, seed: u64) -> Vec<Sample> {
        add_awgn(delayed, snr_db, self.is_complex, seed)
    }

    /// Delayed waveform as complex samples, without noise
    pub fn clean(&self, delayed: &[f64]) -> Vec<Sample> {
        delayed.iter().map(|&v| Complex64::new(v, 0.0)).collect()
    }

    pub fn shaper(&self) -> &RaisedCosineShaper {
        &self.shaper
    }
}

/// Shift right by `delay` samples: zeros in front, tail dropped, same length
pub fn integer_delay(signal: &[f64], delay: usize) -> Vec<f64> {
    let delay = delay.min(signal.len());
    let mut delayed = vec![0.0; delay];
    delayed.extend_from_slice(&signal[..signal.len() - delay]);
    delayed
}

/// Noise seed for the `index`-th SNR point of a run seeded with `seed`.
///
/// Independent of which worker handles the point, so sweeps are
/// reproducible regardless of scheduling.
pub fn noise_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
