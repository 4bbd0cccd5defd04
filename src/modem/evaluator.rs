//! Bit error rate evaluation
//!
//! Decisions and reference symbols are compared index by index. A leading
//! preamble can be skipped so the loop's pull-in does not count against it.

use crate::domain::{Symbol, TedError, TedResult};

/// Outcome of comparing decisions against the transmitted symbols.
///
/// Only built by [`bit_error_rate`], so at least one symbol was compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BerReport {
    errors: usize,
    compared: usize,
}

impl BerReport {
    /// Mismatched symbols
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Symbols compared after the discard
    pub fn compared(&self) -> usize {
        self.compared
    }

    /// Bit error rate as a fraction, 0.0 to 1.0
    pub fn ber(&self) -> f64 {
        self.errors as f64 / self.compared as f64
    }

    pub fn percent_correct(&self) -> f64 {
        100.0 * (1.0 - self.ber())
    }
}

/// Compare `decisions` with `truth`, skipping the first `discard` of each.
///
/// Fails with [`TedError::Alignment`] when the sequences differ in length or
/// nothing is left to compare.
pub fn bit_error_rate(decisions: &[Symbol], truth: &[Symbol], discard: usize) -> TedResult<BerReport> {
    if decisions.len() != truth.len() || discard >= decisions.len() {
        return Err(TedError::Alignment {
            decisions: decisions.len(),
            truth: truth.len(),
            discard,
        });
    }

    let errors = decisions[discard..]
        .iter()
        .zip(&truth[discard..])
        .filter(|(d, t)| d != t)
        .count();

    Ok(BerReport {
        errors,
        compared: decisions.len() - discard,
    })
}
