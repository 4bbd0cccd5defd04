//! FFT processing for spectrum plots

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::domain::Sample;

/// FFT processor for computing spectral data
pub struct FftProcessor {
    fft: Arc<dyn Fft<f64>>,
    fft_size: usize,
    window: Vec<f64>,
}

impl FftProcessor {
    /// Create a new FFT processor with the given size
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        // Generate Hanning window
        let window: Vec<f64> = (0..fft_size)
            .map(|i| {
                let x = std::f64::consts::PI * i as f64 / fft_size as f64;
                0.5 * (1.0 - (2.0 * x).cos())
            })
            .collect();

        Self {
            fft,
            fft_size,
            window,
        }
    }

    /// Compute the power spectrum of one frame, in dB.
    ///
    /// Input shorter than `fft_size` is zero padded. Bins are in FFT order
    /// (DC first, negative frequencies in the upper half).
    pub fn compute(&self, samples: &[Sample]) -> Vec<f64> {
        to_db(&self.power(samples))
    }

    /// Average the power spectrum over consecutive non-overlapping frames.
    ///
    /// Long waveforms give a much smoother estimate this way than a single
    /// frame. Returns dB values with the same bin order as [`compute`](Self::compute).
    pub fn averaged(&self, samples: &[Sample]) -> Vec<f64> {
        let frames: Vec<&[Sample]> = samples.chunks_exact(self.fft_size).collect();
        if frames.is_empty() {
            return self.compute(samples);
        }

        let mut total = vec![0.0; self.fft_size];
        for frame in &frames {
            for (acc, p) in total.iter_mut().zip(self.power(frame)) {
                *acc += p;
            }
        }
        for acc in &mut total {
            *acc /= frames.len() as f64;
        }
        to_db(&total)
    }

    fn power(&self, samples: &[Sample]) -> Vec<f64> {
        // Apply window
        let mut buffer: Vec<Complex<f64>> = samples
            .iter()
            .take(self.fft_size)
            .zip(self.window.iter())
            .map(|(&s, &w)| s * w)
            .collect();

        // Pad if necessary
        buffer.resize(self.fft_size, Complex::new(0.0, 0.0));

        // Compute FFT in place
        self.fft.process(&mut buffer);

        buffer.iter().map(|c| c.norm_sqr()).collect()
    }
}

/// Convert to dB with floor to avoid -infinity
fn to_db(power: &[f64]) -> Vec<f64> {
    power.iter().map(|p| 10.0 * p.max(1e-20).log10()).collect()
}
