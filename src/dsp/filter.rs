//! FIR filter implementation

use std::f64::consts::PI;

/// FIR filter applied to whole blocks of samples
#[derive(Debug, Clone)]
pub struct FirFilter {
    coefficients: Vec<f64>,
}

impl FirFilter {
    /// Create a new FIR filter with the given coefficients
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Fractional delay filter using a Hamming-windowed sinc.
    ///
    /// Taps sit at integer positions `n = -(N-1)/2 ..= N/2` and sample
    /// `sinc(n - delay)`, so after centred filtering the output lags the input
    /// by `delay` samples. Coefficients are normalised to unity DC gain to
    /// keep the signal amplitude.
    pub fn fractional_delay(delay: f64, num_taps: usize) -> Self {
        let middle = (num_taps as isize - 1) / 2;

        let mut coefficients: Vec<f64> = (0..num_taps)
            .map(|i| {
                let n = (i as isize - middle) as f64;
                sinc(n - delay) * hamming(i, num_taps)
            })
            .collect();

        let sum: f64 = coefficients.iter().sum();
        if sum.abs() > 1e-12 {
            for c in &mut coefficients {
                *c /= sum;
            }
        }

        Self::new(coefficients)
    }

    /// Convolve a block with the filter, dropping the `(N-1)/2` transient
    /// samples at each end so the output lines up with the input
    pub fn filter_centered(&self, input: &[f64]) -> Vec<f64> {
        let len = input.len();
        let half = (self.coefficients.len() - 1) / 2;
        let mut output = vec![0.0; len];

        for (m, out) in output.iter_mut().enumerate() {
            let centre = m + half;
            // Only taps whose input index falls inside the block contribute
            let first = centre.saturating_sub(len - 1);
            let last = centre.min(self.coefficients.len() - 1);
            let mut acc = 0.0;
            for k in first..=last {
                acc += self.coefficients[k] * input[centre - k];
            }
            *out = acc;
        }

        output
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// Normalised sinc: sin(πx) / (πx)
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Symmetric Hamming window value for tap `i` of `len`
fn hamming(i: usize, len: usize) -> f64 {
    if len < 2 {
        return 1.0;
    }
    0.54 - 0.46 * (2.0 * PI * i as f64 / (len - 1) as f64).cos()
}
