//! Random bit source
//!
//! Pipeline: seeded RNG → bits → bipolar symbols → pulse train
//!
//! The pulse train is the input of the pulse shaper: `sps` samples per
//! symbol, zero everywhere except the first sample of each symbol period,
//! which carries the symbol amplitude.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::Symbol;

/// The transmitted symbol sequence, ground truth for BER
#[derive(Debug, Clone, PartialEq)]
pub struct Transmission {
    bits: Vec<bool>,
    symbols: Vec<Symbol>,
}

impl Transmission {
    /// `num_symbols` random bits drawn from a ChaCha RNG seeded with `seed`
    pub fn random(num_symbols: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let bits: Vec<bool> = (0..num_symbols).map(|_| rng.gen()).collect();
        Self::from_bits(bits)
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        let symbols = bits.iter().map(|&b| Symbol::from_bit(b)).collect();
        Self { bits, symbols }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Impulse train at `sps` samples per symbol: symbol `k` at index `k·sps`
    pub fn pulse_train(&self, sps: usize) -> Vec<f64> {
        let mut pulses = vec![0.0; self.symbols.len() * sps];
        for (k, symbol) in self.symbols.iter().enumerate() {
            pulses[k * sps] = symbol.value();
        }
        pulses
    }
}
