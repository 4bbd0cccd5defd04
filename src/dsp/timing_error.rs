//! Timing error detectors
//!
//! Three detectors, one error value per symbol:
//!
//! - **Mueller & Muller**: decision-directed, one sample per symbol plus the
//!   current and previous hard decisions
//! - **Gardner**: non-data-aided, adds the sample half a symbol before the
//!   current centre (the expected zero crossing)
//! - **Early-Late gate**: compares magnitudes `δ·T` before and after the centre
//!
//! Every detector is oriented the same way: a positive error means the
//! estimated symbol centre is early and the offset should grow. The loop
//! filter can then always add `gain × error`, whatever the detector.

use crate::domain::{Sample, Symbol, TedMethod, TedResult};

use super::interpolator::Upsampled;

/// Sample and decision taken at one estimated symbol centre
#[derive(Debug, Clone, Copy)]
pub struct SymbolObservation {
    /// Position of the centre in input samples
    pub center: f64,
    pub sample: Sample,
    pub decision: Symbol,
}

impl SymbolObservation {
    /// Look up the waveform at `center` and decide the symbol there
    pub fn at(waveform: &Upsampled, center: f64) -> TedResult<Self> {
        let sample = waveform.sample_at(center)?;
        Ok(Self {
            center,
            sample,
            decision: Symbol::decide(sample),
        })
    }
}

/// Timing error detector, chosen once per run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingErrorDetector {
    MuellerMuller,
    /// Its pattern noise biases the lock late in proportion to the loop
    /// gain, roughly 0.07 samples at `Kp = 0.1` with rolloff 0.3
    Gardner,
    /// `delta`: gate offset as a fraction of the symbol period
    EarlyLate { delta: f64 },
}

impl TimingErrorDetector {
    pub fn new(method: TedMethod, delta: f64) -> Self {
        match method {
            TedMethod::MuellerMuller => TimingErrorDetector::MuellerMuller,
            TedMethod::Gardner => TimingErrorDetector::Gardner,
            TedMethod::EarlyLate => TimingErrorDetector::EarlyLate { delta },
        }
    }

    pub fn method(&self) -> TedMethod {
        match self {
            TimingErrorDetector::MuellerMuller => TedMethod::MuellerMuller,
            TimingErrorDetector::Gardner => TedMethod::Gardner,
            TimingErrorDetector::EarlyLate { .. } => TedMethod::EarlyLate,
        }
    }

    /// Timing error for the symbol at `current`, given the previous symbol.
    ///
    /// Gardner and Early-Late read extra samples from `waveform`. When the
    /// Early-Late gates would fall outside the waveform (first or last
    /// symbol) `last_error` is returned unchanged.
    pub fn error(
        &self,
        waveform: &Upsampled,
        sps: usize,
        current: &SymbolObservation,
        previous: &SymbolObservation,
        last_error: f64,
    ) -> TedResult<f64> {
        let period = sps as f64;

        match *self {
            TimingErrorDetector::MuellerMuller => Ok(mueller_muller(
                current.sample,
                current.decision,
                previous.sample,
                previous.decision,
            )),
            TimingErrorDetector::Gardner => {
                let middle = waveform.sample_at(current.center - period / 2.0)?;
                Ok(gardner(current.sample, previous.sample, middle))
            }
            TimingErrorDetector::EarlyLate { delta } => {
                let shift = delta * period;
                let early_at = current.center - shift;
                let late_at = current.center + shift;
                if !waveform.contains(early_at) || !waveform.contains(late_at) {
                    return Ok(last_error);
                }
                Ok(early_late(
                    waveform.sample_at(early_at)?,
                    waveform.sample_at(late_at)?,
                ))
            }
        }
    }
}

/// Mueller & Muller: `Re{ y[n]·conj(s[n-1]) - y[n-1]·conj(s[n]) }`
pub fn mueller_muller(
    current: Sample,
    current_decision: Symbol,
    previous: Sample,
    previous_decision: Symbol,
) -> f64 {
    (current * previous_decision.as_sample().conj() - previous * current_decision.as_sample().conj()).re
}

/// Gardner: `-Re{ y_mid·(conj(y[n]) - conj(y[n-1])) }`
///
/// Negated with respect to the textbook form, which points the other way.
pub fn gardner(current: Sample, previous: Sample, middle: Sample) -> f64 {
    -(middle * (current.conj() - previous.conj())).re
}

/// Early-Late gate, magnitude form: `|y_late| - |y_early|`
///
/// When sampling early, the late gate sits closer to the pulse peak and the
/// error comes out positive.
pub fn early_late(early: Sample, late: Sample) -> f64 {
    late.norm() - early.norm()
}
