//! Windowed-sinc upsampler
//!
//! The timing loop needs the received waveform at arbitrary fractional
//! sample positions. Rather than interpolating on every lookup, the whole
//! waveform is resampled once onto a grid `factor` times finer, and lookups
//! take the grid point at or before the requested index. Resolution is
//! therefore `1/factor` of an input sample, and any index below the
//! source length maps onto the grid.
//!
//! The resampler is polyphase: output phase `p` (position `i + p/factor`)
//! uses its own kernel of `taps` input samples around `i`, each a
//! Hamming-windowed sinc normalised to unit DC gain. Phase 0 reduces to the
//! identity, so every original sample survives unchanged on the grid.

use std::f64::consts::PI;

use num_complex::Complex64;

use super::filter::sinc;
use crate::domain::{Sample, TedError, TedResult};

/// Polyphase windowed-sinc interpolation filter
#[derive(Debug, Clone)]
pub struct Interpolator {
    factor: usize,
    half_width: usize,
    /// One kernel per output phase, covering inputs `i - half_width + 1 ..= i + half_width`
    phases: Vec<Vec<f64>>,
}

impl Interpolator {
    /// - `factor`: upsampling factor (output samples per input sample)
    /// - `taps`: input samples contributing to each output sample (even)
    pub fn new(factor: usize, taps: usize) -> TedResult<Self> {
        if factor == 0 {
            return Err(TedError::Configuration(
                "upsample factor must be at least 1".into(),
            ));
        }
        if taps < 2 || taps % 2 != 0 {
            return Err(TedError::Configuration(format!(
                "interpolator taps must be even and at least 2, got {taps}"
            )));
        }

        let half_width = taps / 2;
        let phases = (0..factor)
            .map(|p| phase_kernel(p as f64 / factor as f64, half_width))
            .collect();

        Ok(Self {
            factor,
            half_width,
            phases,
        })
    }

    /// Resample `signal` onto a grid `factor` times finer.
    ///
    /// Output length is `signal.len() * factor`. Inputs beyond either end
    /// are taken as zero.
    pub fn upsample(&self, signal: &[Sample]) -> Upsampled {
        let len = signal.len() as isize;
        let mut samples = Vec::with_capacity(signal.len() * self.factor);
        let first_offset = 1 - self.half_width as isize;

        for i in 0..len {
            for kernel in &self.phases {
                let mut acc = Complex64::new(0.0, 0.0);
                for (j, &c) in kernel.iter().enumerate() {
                    let m = i + first_offset + j as isize;
                    if m >= 0 && m < len {
                        acc += signal[m as usize] * c;
                    }
                }
                samples.push(acc);
            }
        }

        Upsampled {
            samples,
            factor: self.factor,
        }
    }
}

/// Kernel for the output at fractional position `frac` past an input sample
fn phase_kernel(frac: f64, half_width: usize) -> Vec<f64> {
    let hw = half_width as f64;
    let mut kernel: Vec<f64> = (1 - half_width as isize..=half_width as isize)
        .map(|k| {
            let d = frac - k as f64;
            let window = 0.54 + 0.46 * (PI * d / hw).cos();
            sinc(d) * window
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    for c in &mut kernel {
        *c /= sum;
    }
    kernel
}

/// A waveform resampled onto a fine grid, read-only input to the timing loop
#[derive(Debug, Clone)]
pub struct Upsampled {
    samples: Vec<Sample>,
    factor: usize,
}

impl Upsampled {
    /// Value at a fractional index in input-sample units.
    ///
    /// Selects grid point `floor(index·factor)`, so every index in
    /// `[0, source_len)` resolves. Negative, non-finite or past-the-end
    /// indices fail with [`TedError::OutOfRange`].
    pub fn sample_at(&self, index: f64) -> TedResult<Sample> {
        self.grid_position(index)
            .map(|pos| self.samples[pos])
            .ok_or(TedError::OutOfRange {
                index,
                len: self.source_len(),
            })
    }

    /// Whether `sample_at(index)` would succeed
    pub fn contains(&self, index: f64) -> bool {
        self.grid_position(index).is_some()
    }

    fn grid_position(&self, index: f64) -> Option<usize> {
        if !index.is_finite() || index < 0.0 {
            return None;
        }
        let pos = (index * self.factor as f64).floor();
        if pos < self.samples.len() as f64 {
            Some(pos as usize)
        } else {
            None
        }
    }

    /// The full fine grid
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Length of the waveform before upsampling
    pub fn source_len(&self) -> usize {
        self.samples.len() / self.factor
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(values: &[f64]) -> Vec<Sample> {
        values.iter().map(|&v| Complex64::new(v, 0.0)).collect()
    }

    #[test]
    fn test_output_length_and_identity_phase() {
        let interp = Interpolator::new(4, 16).unwrap();
        let input = real(&[0.5, -1.0, 2.0, 0.25, -0.75]);
        let up = interp.upsample(&input);

        assert_eq!(up.len(), 20);
        assert_eq!(up.source_len(), 5);
        for (i, s) in input.iter().enumerate() {
            assert!((up.samples()[i * 4] - s).norm() < 1e-12);
        }
    }

    #[test]
    fn test_interpolates_band_limited_tone() {
        let freq = 0.05; // cycles per input sample
        let input: Vec<Sample> = (0..200)
            .map(|n| {
                let phase = 2.0 * PI * freq * n as f64;
                Complex64::new(phase.cos(), phase.sin())
            })
            .collect();

        let interp = Interpolator::new(32, 16).unwrap();
        let up = interp.upsample(&input);

        for &t in &[50.25, 75.5, 100.71875, 120.9] {
            let got = up.sample_at(t).unwrap();
            // Grid point actually selected
            let grid_t = (t * 32.0f64).floor() / 32.0;
            let phase = 2.0 * PI * freq * grid_t;
            let expected = Complex64::new(phase.cos(), phase.sin());
            assert!(
                (got - expected).norm() < 0.01,
                "t={t}: got {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_out_of_range_indices_fail() {
        let interp = Interpolator::new(8, 8).unwrap();
        let up = interp.upsample(&real(&[1.0; 10]));

        assert!(up.sample_at(0.0).is_ok());
        assert!(up.sample_at(9.9).is_ok());
        assert!(matches!(
            up.sample_at(-0.5),
            Err(TedError::OutOfRange { len: 10, .. })
        ));
        assert!(up.sample_at(10.0).is_err());
        assert!(up.sample_at(f64::NAN).is_err());
        assert!(!up.contains(25.0));
    }

    #[test]
    fn test_last_grid_step_stays_in_range() {
        let interp = Interpolator::new(8, 8).unwrap();
        let input: Vec<Sample> = real(&(0..80).map(|n| n as f64).collect::<Vec<_>>());
        let up = interp.upsample(&input);

        // Everything past the last source sample reads its final grid point
        let last = up.samples()[up.len() - 1];
        for index in [79.9, 79.99, 79.999_999] {
            assert_eq!(up.sample_at(index).unwrap(), last, "index {index}");
            assert!(up.contains(index));
        }
        assert!(matches!(
            up.sample_at(80.0),
            Err(TedError::OutOfRange { len: 80, .. })
        ));
        // Whole indices read the source sample exactly
        assert!((up.sample_at(79.0).unwrap() - input[79]).norm() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(Interpolator::new(0, 16).is_err());
        assert!(Interpolator::new(32, 15).is_err());
        assert!(Interpolator::new(32, 0).is_err());
    }
}
