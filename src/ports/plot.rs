//! Plotting port trait
//!
//! The core never draws anything itself; it hands read-only data to a
//! `PlotSink` and lets the adapter decide how to render or store it.

use crate::domain::{Sample, TedMethod, TedResult, TracePoint};
use crate::orchestrator::SweepResults;

/// Trait for consumers of plot data
pub trait PlotSink {
    /// Raised cosine taps and the tap indices of its zero crossings
    fn filter_taps(&mut self, taps: &[f64], zero_crossings: &[usize]) -> TedResult<()>;

    /// Power spectrum of the received waveform, dB per bin in FFT order
    fn spectrum(&mut self, spectrum_db: &[f64]) -> TedResult<()>;

    /// Error and offset per iteration of one timing loop run
    fn timing_trace(&mut self, method: TedMethod, trace: &[TracePoint]) -> TedResult<()>;

    /// Samples taken at the recovered symbol centres
    fn constellation(&mut self, method: TedMethod, samples: &[Sample]) -> TedResult<()>;

    /// BER versus SNR for every method of a sweep
    fn ber_curves(&mut self, results: &SweepResults) -> TedResult<()>;
}
