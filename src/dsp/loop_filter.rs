//! Loop filters for the timing loop
//!
//! A loop filter turns one timing error into the next offset estimate.
//! It knows nothing about which detector produced the error, so any filter
//! can drive any detector.

use crate::domain::UpdateMode;

/// Consume a timing error, produce the next offset
pub trait LoopFilter {
    /// Next offset estimate given the previous one and the latest error
    fn next_offset(&mut self, offset: f64, error: f64) -> f64;

    /// Clear any internal state (integrator)
    fn reset(&mut self);
}

/// Proportional-only update: `τ[n] = τ[n-1] + Kp·e[n]`
#[derive(Debug, Clone)]
pub struct ProportionalFilter {
    gain: f64,
}

impl ProportionalFilter {
    pub fn new(gain: f64) -> Self {
        Self { gain }
    }
}

impl LoopFilter for ProportionalFilter {
    fn next_offset(&mut self, offset: f64, error: f64) -> f64 {
        offset + self.gain * error
    }

    fn reset(&mut self) {}
}

/// Proportional-integral update
///
/// `I[n] = I[n-1] + e[n]`, `τ[n] = τ[n-1] + Kp·e[n] + Ki·I[n]`.
/// The integral term absorbs a steady drift (clock frequency offset) that a
/// proportional loop would only follow with a constant lag.
#[derive(Debug, Clone)]
pub struct PiFilter {
    proportional_gain: f64,
    integral_gain: f64,
    integrator: f64,
}

impl PiFilter {
    pub fn new(proportional_gain: f64, integral_gain: f64) -> Self {
        Self {
            proportional_gain,
            integral_gain,
            integrator: 0.0,
        }
    }

    /// Accumulated error so far
    pub fn integrator(&self) -> f64 {
        self.integrator
    }
}

impl LoopFilter for PiFilter {
    fn next_offset(&mut self, offset: f64, error: f64) -> f64 {
        self.integrator += error;
        offset + self.proportional_gain * error + self.integral_gain * self.integrator
    }

    fn reset(&mut self) {
        self.integrator = 0.0;
    }
}

/// Loop filter for the configured update mode
pub fn for_mode(mode: UpdateMode, kp: f64, ki: f64) -> Box<dyn LoopFilter + Send> {
    match mode {
        UpdateMode::Proportional => Box::new(ProportionalFilter::new(kp)),
        UpdateMode::ProportionalIntegral => Box::new(PiFilter::new(kp, ki)),
    }
}

impl<F: LoopFilter + ?Sized> LoopFilter for Box<F> {
    fn next_offset(&mut self, offset: f64, error: f64) -> f64 {
        (**self).next_offset(offset, error)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
