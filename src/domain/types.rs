//! Core domain types

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Baseband sample. Real-valued channels carry a zero imaginary part.
pub type Sample = Complex64;

/// A BPSK symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Negative,
    Positive,
}

impl Symbol {
    /// Hard decision on the real part of a sample.
    ///
    /// Exactly zero decides `Positive`. Every decision in the crate goes
    /// through here so the tie-break is applied consistently.
    pub fn decide(sample: Sample) -> Self {
        if sample.re >= 0.0 {
            Symbol::Positive
        } else {
            Symbol::Negative
        }
    }

    /// Map a bit to its symbol: 1 → +1, 0 → -1
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Symbol::Positive
        } else {
            Symbol::Negative
        }
    }

    pub fn bit(self) -> bool {
        self == Symbol::Positive
    }

    /// Bipolar amplitude (-1.0 or +1.0)
    pub fn value(self) -> f64 {
        match self {
            Symbol::Negative => -1.0,
            Symbol::Positive => 1.0,
        }
    }

    /// Symbol as a complex sample, for use in complex error terms
    pub fn as_sample(self) -> Sample {
        Complex64::new(self.value(), 0.0)
    }
}

/// One entry of the error/offset trace produced by the timing loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub iteration: usize,
    pub error: f64,
    /// Offset estimate after this iteration's update, in samples
    pub offset: f64,
}
