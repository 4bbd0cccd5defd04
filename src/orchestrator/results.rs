//! Sweep results
//!
//! One entry per (method, SNR) pair, plus the parameters the sweep ran
//! with. This is the document persisted by the result stores and read back
//! for plotting.

use serde::{Deserialize, Serialize};

use crate::domain::{SimulationConfig, TedMethod};

/// Figures of merit for one completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Bit error rate as a fraction
    pub ber: f64,
    pub errors: usize,
    pub compared: usize,
    pub percent_correct: f64,
    /// Offset after the last iteration, in samples
    pub final_offset: f64,
    /// Mean offset over the final 10% of iterations
    pub converged_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed(RunSummary),
    Failed { reason: String },
}

impl RunOutcome {
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            RunOutcome::Completed(summary) => Some(summary),
            RunOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub method: TedMethod,
    pub snr_db: f64,
    pub outcome: RunOutcome,
}

/// Results of a compare run across methods and SNR points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    pub parameters: SimulationConfig,
    pub snr_db: Vec<f64>,
    pub entries: Vec<SweepEntry>,
}

impl SweepResults {
    pub fn new(parameters: SimulationConfig, snr_db: Vec<f64>) -> Self {
        Self {
            parameters,
            snr_db,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, method: TedMethod, snr_db: f64, outcome: RunOutcome) {
        self.entries.push(SweepEntry {
            method,
            snr_db,
            outcome,
        });
    }

    /// Order entries by method, then by SNR
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| {
            a.method
                .cmp(&b.method)
                .then(a.snr_db.total_cmp(&b.snr_db))
        });
    }

    pub fn outcome(&self, method: TedMethod, snr_db: f64) -> Option<&RunOutcome> {
        self.entries
            .iter()
            .find(|e| e.method == method && e.snr_db == snr_db)
            .map(|e| &e.outcome)
    }

    /// BER of `method` at each SNR point, `None` where the run failed or is missing
    pub fn ber_curve(&self, method: TedMethod) -> Vec<Option<f64>> {
        self.snr_db
            .iter()
            .map(|&snr| {
                self.outcome(method, snr)
                    .and_then(RunOutcome::summary)
                    .map(|s| s.ber)
            })
            .collect()
    }

    /// Methods that have at least one entry, in sweep order
    pub fn methods(&self) -> Vec<TedMethod> {
        TedMethod::ALL
            .into_iter()
            .filter(|m| self.entries.iter().any(|e| e.method == *m))
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SweepEntry> {
        self.entries.iter().filter(|e| e.outcome.is_failed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(ber: f64) -> RunOutcome {
        RunOutcome::Completed(RunSummary {
            ber,
            errors: (ber * 1000.0) as usize,
            compared: 1000,
            percent_correct: 100.0 * (1.0 - ber),
            final_offset: 5.7,
            converged_offset: 5.69,
        })
    }

    fn sample_results() -> SweepResults {
        let mut results = SweepResults::new(SimulationConfig::default(), vec![0.0, 5.0]);
        results.push(TedMethod::Gardner, 5.0, summary(0.01));
        results.push(TedMethod::MuellerMuller, 5.0, summary(0.005));
        results.push(TedMethod::MuellerMuller, 0.0, summary(0.07));
        results.push(
            TedMethod::Gardner,
            0.0,
            RunOutcome::Failed {
                reason: "Index 8001.5 is outside the waveform".into(),
            },
        );
        results
    }

    #[test]
    fn ber_curve_follows_snr_grid() {
        let results = sample_results();
        assert_eq!(
            results.ber_curve(TedMethod::MuellerMuller),
            vec![Some(0.07), Some(0.005)]
        );
        assert_eq!(results.ber_curve(TedMethod::Gardner), vec![None, Some(0.01)]);
        assert_eq!(results.ber_curve(TedMethod::EarlyLate), vec![None, None]);
    }

    #[test]
    fn sort_orders_by_method_then_snr() {
        let mut results = sample_results();
        results.sort();
        let order: Vec<(TedMethod, f64)> =
            results.entries.iter().map(|e| (e.method, e.snr_db)).collect();
        assert_eq!(
            order,
            vec![
                (TedMethod::MuellerMuller, 0.0),
                (TedMethod::MuellerMuller, 5.0),
                (TedMethod::Gardner, 0.0),
                (TedMethod::Gardner, 5.0),
            ]
        );
    }

    #[test]
    fn failures_and_methods() {
        let results = sample_results();
        assert_eq!(results.failures().count(), 1);
        assert_eq!(
            results.methods(),
            vec![TedMethod::MuellerMuller, TedMethod::Gardner]
        );
    }

    #[test]
    fn json_round_trip_is_exact() {
        let mut results = sample_results();
        results.push(TedMethod::EarlyLate, 0.0, summary(0.1 + 0.2));
        let json = serde_json::to_string(&results).unwrap();
        let back: SweepResults = serde_json::from_str(&json).unwrap();
        assert_eq!(back, results);
    }
}
