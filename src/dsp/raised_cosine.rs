//! Raised cosine pulse shaping for TX
//!
//! The filter is sampled at one tap per sample with its peak in the middle
//! tap, so a symbol placed at sample `k·sps` still reads back as exactly
//! ±1.0 at `k·sps` after shaping (zero ISI at the symbol instants).

use std::f64::consts::PI;

use super::filter::FirFilter;

/// Raised cosine FIR filter at `samples_per_symbol` taps per symbol period
pub struct RaisedCosineShaper {
    samples_per_symbol: usize,
    filter: FirFilter,
}

impl RaisedCosineShaper {
    /// - `num_taps`: filter length (odd, so the peak lands on a tap)
    /// - `rolloff`: excess bandwidth, 0.0 to 1.0
    /// - `samples_per_symbol`: symbol period in taps
    pub fn new(num_taps: usize, rolloff: f64, samples_per_symbol: usize) -> Self {
        let middle = num_taps / 2;
        let ts = samples_per_symbol as f64;

        let coefficients = (0..num_taps)
            .map(|i| {
                let t = i as f64 - middle as f64;
                raised_cosine(t, ts, rolloff)
            })
            .collect();

        Self {
            samples_per_symbol,
            filter: FirFilter::new(coefficients),
        }
    }

    /// Convolve a pulse train with the filter.
    ///
    /// The filter transient is trimmed so the output has the same length as
    /// the input and stays aligned with it.
    pub fn shape(&self, pulses: &[f64]) -> Vec<f64> {
        self.filter.filter_centered(pulses)
    }

    /// Tap indices where the filter crosses zero (multiples of the symbol
    /// period away from the peak), excluding the peak itself
    pub fn zero_crossings(&self) -> Vec<usize> {
        let len = self.filter.coefficients().len();
        let middle = len / 2;
        let sps = self.samples_per_symbol;

        let mut crossings: Vec<usize> = (1..=middle / sps).map(|k| middle - k * sps).collect();
        crossings.reverse();
        crossings.extend((1..).map(|k| middle + k * sps).take_while(|&i| i < len));
        crossings
    }

    pub fn taps(&self) -> &[f64] {
        self.filter.coefficients()
    }

    /// Get samples per symbol
    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }
}

/// Raised cosine impulse response at time `t` (in samples) for symbol period `ts`
fn raised_cosine(t: f64, ts: f64, rolloff: f64) -> f64 {
    if t == 0.0 {
        return 1.0;
    }

    let x = t / ts;
    let sinc = (PI * x).sin() / (PI * x);

    // The cosine term's denominator vanishes at t = ±Ts/(2β); use its limit there
    if rolloff > 0.0 && ((2.0 * rolloff * t).abs() - ts).abs() < 1e-9 {
        return PI / 4.0 * sinc;
    }

    sinc * (PI * rolloff * x).cos() / (1.0 - (2.0 * rolloff * x).powi(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_is_unity_and_symmetric() {
        let shaper = RaisedCosineShaper::new(101, 0.3, 8);
        let taps = shaper.taps();

        assert_eq!(taps.len(), 101);
        assert_eq!(taps[50], 1.0);
        for i in 0..50 {
            assert!((taps[i] - taps[100 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_crossings_are_near_zero() {
        let shaper = RaisedCosineShaper::new(101, 0.3, 8);
        let crossings = shaper.zero_crossings();

        // 6 symbol periods fit on each side of the peak
        assert_eq!(crossings.len(), 12);
        assert_eq!(crossings[0], 2);
        assert_eq!(crossings[11], 98);
        assert!(!crossings.contains(&50));
        for &i in &crossings {
            assert!(shaper.taps()[i].abs() < 1e-12, "tap {i} = {}", shaper.taps()[i]);
        }
    }

    #[test]
    fn test_singularity_uses_limit() {
        // rolloff 0.5 with sps 8 puts t = ±8 on the singular point
        let shaper = RaisedCosineShaper::new(33, 0.5, 8);
        assert!(shaper.taps().iter().all(|t| t.is_finite()));
    }

    #[test]
    fn test_shaping_preserves_symbol_instants() {
        let sps = 8;
        let symbols = [1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, -1.0];
        let mut pulses = vec![0.0; symbols.len() * sps];
        for (k, &s) in symbols.iter().enumerate() {
            pulses[k * sps] = s;
        }

        let shaper = RaisedCosineShaper::new(101, 0.3, sps);
        let shaped = shaper.shape(&pulses);

        assert_eq!(shaped.len(), pulses.len());
        for (k, &s) in symbols.iter().enumerate() {
            assert!((shaped[k * sps] - s).abs() < 1e-9);
        }
    }
}
