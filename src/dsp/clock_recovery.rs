//! Symbol timing recovery
//!
//! Closed-loop estimate of the offset between the receiver's symbol grid
//! (`n·sps`) and the true symbol centres of an upsampled waveform.
//!
//! Each iteration handles one symbol:
//!   1. read the sample at `n·sps + τ` and decide the symbol
//!   2. compute the timing error against the previous symbol
//!   3. let the loop filter move `τ`, wrapped into `[0, sps)`
//!   4. append `(n, error, τ)` to the trace
//!
//! The first iteration has no previous symbol, so it only primes the state
//! (error 0, offset unchanged). The loop always runs the requested number
//! of symbols; how well it converged is judged from the trace afterwards.

use crate::domain::{Sample, Symbol, TedMethod, TedResult, TracePoint};

use super::interpolator::Upsampled;
use super::loop_filter::LoopFilter;
use super::timing_error::{SymbolObservation, TimingErrorDetector};

/// Share of the trace averaged by [`Recovery::converged_offset`]
pub const CONVERGENCE_WINDOW: f64 = 0.1;

/// Mutable per-iteration state, owned by the loop
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingState {
    /// Current offset estimate in samples, within `[0, sps)`
    pub offset: f64,
    /// Observation at the previous symbol centre
    pub previous: Option<SymbolObservation>,
    /// Error from the previous symbol, repeated by the Early-Late gate when
    /// its gates fall outside the waveform
    pub last_error: f64,
}

/// Symbol clock recovery driven by a timing error detector and a loop filter
pub struct ClockRecovery<F: LoopFilter> {
    detector: TimingErrorDetector,
    loop_filter: F,
    samples_per_symbol: usize,
    state: TimingState,
}

impl<F: LoopFilter> ClockRecovery<F> {
    /// Create a new clock recovery loop starting at offset 0
    pub fn new(detector: TimingErrorDetector, loop_filter: F, samples_per_symbol: usize) -> Self {
        Self {
            detector,
            loop_filter,
            samples_per_symbol,
            state: TimingState::default(),
        }
    }

    /// Process symbol `n`, returning its observation and timing error
    pub fn step(&mut self, waveform: &Upsampled, n: usize) -> TedResult<(SymbolObservation, f64)> {
        let period = self.samples_per_symbol as f64;
        let center = n as f64 * period + self.state.offset;
        let current = SymbolObservation::at(waveform, center)?;

        let error = match &self.state.previous {
            Some(previous) => self.detector.error(
                waveform,
                self.samples_per_symbol,
                &current,
                previous,
                self.state.last_error,
            )?,
            None => 0.0,
        };

        let next = self.loop_filter.next_offset(self.state.offset, error);
        self.state.offset = wrap_offset(next, period);
        self.state.previous = Some(current);
        self.state.last_error = error;

        Ok((current, error))
    }

    /// Run the loop over `num_symbols` symbols of `waveform`.
    ///
    /// An out-of-range lookup aborts the run with the error; nothing is
    /// clamped.
    pub fn run(&mut self, waveform: &Upsampled, num_symbols: usize) -> TedResult<Recovery> {
        let mut decisions = Vec::with_capacity(num_symbols);
        let mut samples = Vec::with_capacity(num_symbols);
        let mut trace = Vec::with_capacity(num_symbols);

        for n in 0..num_symbols {
            let (observation, error) = self.step(waveform, n)?;
            decisions.push(observation.decision);
            samples.push(observation.sample);
            trace.push(TracePoint {
                iteration: n,
                error,
                offset: self.state.offset,
            });
        }

        Ok(Recovery {
            method: self.detector.method(),
            decisions,
            samples,
            trace,
        })
    }

    /// Current offset estimate
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn state(&self) -> &TimingState {
        &self.state
    }

    /// Reset the clock recovery state
    pub fn reset(&mut self) {
        self.state = TimingState::default();
        self.loop_filter.reset();
    }
}

/// Wrap an offset into `[0, period)`
fn wrap_offset(offset: f64, period: f64) -> f64 {
    let wrapped = offset.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Output of one timing recovery run
#[derive(Debug, Clone)]
pub struct Recovery {
    pub method: TedMethod,
    decisions: Vec<Symbol>,
    samples: Vec<Sample>,
    trace: Vec<TracePoint>,
}

impl Recovery {
    /// One hard decision per iteration
    pub fn decisions(&self) -> &[Symbol] {
        &self.decisions
    }

    /// Samples taken at each estimated symbol centre
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Constellation points, skipping the first `discard` symbols
    pub fn constellation(&self, discard: usize) -> &[Sample] {
        &self.samples[discard.min(self.samples.len())..]
    }

    pub fn trace(&self) -> &[TracePoint] {
        &self.trace
    }

    /// Offset after the last iteration
    pub fn final_offset(&self) -> f64 {
        self.trace.last().map(|p| p.offset).unwrap_or(0.0)
    }

    /// Mean offset over the final 10% of iterations
    pub fn converged_offset(&self) -> f64 {
        self.converged_offset_over(CONVERGENCE_WINDOW)
    }

    /// Mean offset over the final `fraction` of iterations (at least one)
    pub fn converged_offset_over(&self, fraction: f64) -> f64 {
        if self.trace.is_empty() {
            return 0.0;
        }
        let count = ((self.trace.len() as f64 * fraction).ceil() as usize).clamp(1, self.trace.len());
        let tail = &self.trace[self.trace.len() - count..];
        tail.iter().map(|p| p.offset).sum::<f64>() / count as f64
    }
}
