//! Plot sink that keeps everything in memory.
//!
//! Used when no plot directory is given, and by tests that want to inspect
//! what a run would have plotted.

use std::collections::BTreeMap;

use crate::domain::{Sample, TedMethod, TedResult, TracePoint};
use crate::orchestrator::SweepResults;
use crate::ports::PlotSink;

#[derive(Debug, Default)]
pub struct PlotRecorder {
    pub filter_taps: Vec<f64>,
    pub zero_crossings: Vec<usize>,
    pub spectrum_db: Vec<f64>,
    pub traces: BTreeMap<TedMethod, Vec<TracePoint>>,
    pub constellations: BTreeMap<TedMethod, Vec<Sample>>,
    pub ber_curves: Option<SweepResults>,
}

impl PlotRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlotSink for PlotRecorder {
    fn filter_taps(&mut self, taps: &[f64], zero_crossings: &[usize]) -> TedResult<()> {
        self.filter_taps = taps.to_vec();
        self.zero_crossings = zero_crossings.to_vec();
        Ok(())
    }

    fn spectrum(&mut self, spectrum_db: &[f64]) -> TedResult<()> {
        self.spectrum_db = spectrum_db.to_vec();
        Ok(())
    }

    fn timing_trace(&mut self, method: TedMethod, trace: &[TracePoint]) -> TedResult<()> {
        self.traces.insert(method, trace.to_vec());
        Ok(())
    }

    fn constellation(&mut self, method: TedMethod, samples: &[Sample]) -> TedResult<()> {
        self.constellations.insert(method, samples.to_vec());
        Ok(())
    }

    fn ber_curves(&mut self, results: &SweepResults) -> TedResult<()> {
        log::debug!(
            "[PLOT RECORDER] BER curves for {} methods over {} SNR points",
            results.methods().len(),
            results.snr_db.len()
        );
        self.ber_curves = Some(results.clone());
        Ok(())
    }
}
