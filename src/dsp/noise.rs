//! Additive White Gaussian Noise generator
//!
//! Uses Box-Muller transform for Gaussian samples.

use std::f64::consts::PI;

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::Sample;

/// AWGN generator with configurable power
pub struct NoiseGenerator {
    /// Standard deviation (sqrt of noise power)
    std_dev: f64,

    rng: ChaCha8Rng,

    /// Cached second sample from Box-Muller
    cached: Option<f64>,
}

impl NoiseGenerator {
    pub fn new(noise_power: f64, seed: u64) -> Self {
        Self {
            std_dev: noise_power.max(0.0).sqrt(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            cached: None,
        }
    }

    /// Generate next Gaussian noise sample using Box-Muller transform
    pub fn next_sample(&mut self) -> f64 {
        if let Some(cached) = self.cached.take() {
            return cached * self.std_dev;
        }

        let u1: f64 = self.rng.gen();
        let u2: f64 = self.rng.gen();

        // Avoid log(0)
        let u1 = u1.max(1e-10);

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        self.cached = Some(r * theta.sin());

        r * theta.cos() * self.std_dev
    }
}

/// Add white Gaussian noise to a real waveform at the given SNR.
///
/// Noise power is the mean signal power divided by `10^(snr_db/10)`. With
/// `complex` set, the power is split evenly between I and Q; otherwise all
/// of it lands on I and Q stays zero.
pub fn add_awgn(signal: &[f64], snr_db: f64, complex: bool, seed: u64) -> Vec<Sample> {
    if signal.is_empty() {
        return Vec::new();
    }

    let signal_power = signal.iter().map(|s| s * s).sum::<f64>() / signal.len() as f64;
    let noise_power = signal_power / 10f64.powf(snr_db / 10.0);

    if complex {
        let mut noise = NoiseGenerator::new(noise_power / 2.0, seed);
        signal
            .iter()
            .map(|&s| {
                let i = noise.next_sample();
                let q = noise.next_sample();
                Complex64::new(s + i, q)
            })
            .collect()
    } else {
        let mut noise = NoiseGenerator::new(noise_power, seed);
        signal
            .iter()
            .map(|&s| Complex64::new(s + noise.next_sample(), 0.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_statistics() {
        let mut noise = NoiseGenerator::new(0.5, 42);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| noise.next_sample()).collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((var - 0.5).abs() < 0.02, "variance {var}");
    }

    #[test]
    fn test_same_seed_same_noise() {
        let mut a = NoiseGenerator::new(1.0, 7);
        let mut b = NoiseGenerator::new(1.0, 7);
        for _ in 0..100 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }

    #[test]
    fn test_awgn_hits_requested_snr() {
        let signal: Vec<f64> = (0..40_000).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

        for complex in [false, true] {
            let noisy = add_awgn(&signal, 10.0, complex, 1);
            let noise_power = noisy
                .iter()
                .zip(&signal)
                .map(|(y, &s)| (y - Complex64::new(s, 0.0)).norm_sqr())
                .sum::<f64>()
                / signal.len() as f64;
            let snr = 10.0 * (1.0 / noise_power).log10();
            assert!((snr - 10.0).abs() < 0.2, "complex={complex}: measured {snr} dB");
        }
    }

    #[test]
    fn test_real_noise_leaves_quadrature_empty() {
        let noisy = add_awgn(&[1.0, -1.0, 0.5], 0.0, false, 3);
        assert!(noisy.iter().all(|s| s.im == 0.0));
    }
}
