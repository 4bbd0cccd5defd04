//! Simulation configuration
//!
//! A `SimulationConfig` is an immutable description of one experiment:
//! waveform generation, channel impairments, timing loop parameters and
//! which runs to perform. It is built once (defaults, a JSON profile, CLI
//! overrides), validated, and then passed by reference into every run.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{TedError, TedResult};

/// Timing error detector algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TedMethod {
    /// Mueller & Muller, decision-directed
    #[serde(rename = "mueller")]
    MuellerMuller,
    /// Gardner, non-data-aided
    Gardner,
    /// Early-Late gate
    EarlyLate,
}

impl TedMethod {
    /// Every method, in the order sweeps report them
    pub const ALL: [TedMethod; 3] = [
        TedMethod::MuellerMuller,
        TedMethod::Gardner,
        TedMethod::EarlyLate,
    ];

    /// Short identifier used in config files, on the command line and in file names
    pub fn name(self) -> &'static str {
        match self {
            TedMethod::MuellerMuller => "mueller",
            TedMethod::Gardner => "gardner",
            TedMethod::EarlyLate => "early_late",
        }
    }

    /// Human-readable name for plot titles
    pub fn title(self) -> &'static str {
        match self {
            TedMethod::MuellerMuller => "Mueller and Muller",
            TedMethod::Gardner => "Gardner",
            TedMethod::EarlyLate => "Early-Late Gate",
        }
    }
}

impl fmt::Display for TedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TedMethod {
    type Err = TedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mueller" | "mm" | "mueller_muller" => Ok(TedMethod::MuellerMuller),
            "gardner" => Ok(TedMethod::Gardner),
            "early_late" | "earlylate" | "earlylategate" | "early-late" => {
                Ok(TedMethod::EarlyLate)
            }
            other => Err(TedError::Configuration(format!(
                "unknown method '{other}' (expected mueller, gardner or early_late)"
            ))),
        }
    }
}

/// How the loop filter turns timing error into an offset update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    Proportional,
    #[serde(rename = "pi")]
    ProportionalIntegral,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMode::Proportional => f.write_str("proportional"),
            UpdateMode::ProportionalIntegral => f.write_str("pi"),
        }
    }
}

impl FromStr for UpdateMode {
    type Err = TedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proportional" | "p" => Ok(UpdateMode::Proportional),
            "pi" | "proportional_integral" => Ok(UpdateMode::ProportionalIntegral),
            other => Err(TedError::Configuration(format!(
                "unknown update mode '{other}' (expected proportional or pi)"
            ))),
        }
    }
}

/// Which runs the orchestrator performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunModes {
    /// One run of `method` at `single_snr`
    pub single_run: bool,
    /// Every method across the SNR sweep
    pub compare_run: bool,
}

impl Default for RunModes {
    fn default() -> Self {
        Self {
            single_run: true,
            compare_run: false,
        }
    }
}

/// SNR grid for compare runs, in dB, inclusive of both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnrSweep {
    pub min_snr: f64,
    pub max_snr: f64,
    pub snr_step: f64,
}

impl Default for SnrSweep {
    fn default() -> Self {
        Self {
            min_snr: 1.0,
            max_snr: 30.0,
            snr_step: 1.0,
        }
    }
}

impl SnrSweep {
    /// SNR values from `min_snr` to `max_snr` (inclusive) in `snr_step` increments
    pub fn points(&self) -> Vec<f64> {
        if !(self.snr_step > 0.0) || self.max_snr < self.min_snr {
            return Vec::new();
        }
        // Small slack so 0.1-style steps still land on max_snr
        let count = ((self.max_snr - self.min_snr) / self.snr_step + 1e-9).floor() as usize + 1;
        (0..count)
            .map(|i| self.min_snr + i as f64 * self.snr_step)
            .collect()
    }
}

/// Complete, immutable description of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of transmitted symbols (and timing loop iterations)
    pub num_symbols: usize,
    /// Samples per symbol of the transmitted waveform
    pub sps: usize,
    /// Raised cosine length in taps (odd)
    pub rc_taps: usize,
    /// Raised cosine rolloff factor, 0.0 to 1.0
    pub rolloff: f64,
    /// Integer part of the channel delay, in samples
    pub int_delay: usize,
    /// Fractional part of the channel delay, 0.0 to 1.0
    pub frac_delay: f64,
    /// Windowed sinc length used for the fractional delay (odd)
    pub sinc_taps: usize,
    /// Upsampling factor of the interpolator
    pub upsample: usize,
    /// Input-rate taps per interpolator phase (even)
    pub interp_taps: usize,
    /// Complex (I/Q) noise when true, real noise otherwise
    pub is_complex: bool,
    pub method: TedMethod,
    pub update_mode: UpdateMode,
    /// Proportional gain
    pub kp: f64,
    /// Integral gain (PI mode only)
    pub ki: f64,
    /// Early-Late gate offset as a fraction of the symbol period
    pub delta: f64,
    pub modes: RunModes,
    /// SNR in dB used by single runs
    pub single_snr: f64,
    pub sweep: SnrSweep,
    /// Compare every decision against the reference when true
    pub keep_all: bool,
    /// Leading decisions discarded as a sync preamble when `keep_all` is false
    pub preamble: usize,
    /// Seed for the bit source and noise generators
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_symbols: 10_000,
            sps: 8,
            rc_taps: 101,
            rolloff: 0.3,
            int_delay: 5,
            frac_delay: 0.7,
            sinc_taps: 21,
            upsample: 32,
            interp_taps: 16,
            is_complex: true,
            method: TedMethod::MuellerMuller,
            update_mode: UpdateMode::Proportional,
            kp: 0.1,
            ki: 0.0001,
            delta: 0.25,
            modes: RunModes::default(),
            single_snr: 15.0,
            sweep: SnrSweep::default(),
            keep_all: false,
            preamble: 30,
            seed: 3,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter before any signal is generated.
    pub fn validate(&self) -> TedResult<()> {
        let fail = |msg: String| Err(TedError::Configuration(msg));

        if self.num_symbols == 0 {
            return fail("num_symbols must be at least 1".into());
        }
        if self.sps < 2 {
            return fail(format!("sps must be at least 2, got {}", self.sps));
        }
        if self.rc_taps == 0 || self.rc_taps % 2 == 0 {
            return fail(format!("rc_taps must be odd, got {}", self.rc_taps));
        }
        if !(0.0..=1.0).contains(&self.rolloff) {
            return fail(format!("rolloff must be within [0, 1], got {}", self.rolloff));
        }
        if !(0.0..1.0).contains(&self.frac_delay) {
            return fail(format!(
                "frac_delay must be within [0, 1), got {}",
                self.frac_delay
            ));
        }
        if self.sinc_taps == 0 || self.sinc_taps % 2 == 0 {
            return fail(format!("sinc_taps must be odd, got {}", self.sinc_taps));
        }
        if self.upsample == 0 {
            return fail("upsample must be at least 1".into());
        }
        if self.interp_taps == 0 || self.interp_taps % 2 != 0 {
            return fail(format!(
                "interp_taps must be even and non-zero, got {}",
                self.interp_taps
            ));
        }
        if !self.kp.is_finite() || !self.ki.is_finite() {
            return fail("loop gains must be finite".into());
        }
        if self.ki < 0.0 {
            return fail(format!("ki must not be negative, got {}", self.ki));
        }
        if !(self.delta > 0.0 && self.delta < 0.5) {
            return fail(format!("delta must be within (0, 0.5), got {}", self.delta));
        }
        if !self.single_snr.is_finite() {
            return fail("single_snr must be finite".into());
        }
        let sweep = &self.sweep;
        if !sweep.min_snr.is_finite() || !sweep.max_snr.is_finite() {
            return fail("sweep bounds must be finite".into());
        }
        if !(sweep.snr_step > 0.0) {
            return fail(format!("snr_step must be positive, got {}", sweep.snr_step));
        }
        if sweep.max_snr < sweep.min_snr {
            return fail(format!(
                "max_snr ({}) is below min_snr ({})",
                sweep.max_snr, sweep.min_snr
            ));
        }

        if self.total_delay() >= self.sps as f64 {
            log::warn!(
                "channel delay {:.2} exceeds one symbol period ({}); offsets wrap modulo sps and decisions will be shifted",
                self.total_delay(),
                self.sps
            );
        }

        Ok(())
    }

    /// Channel delay in samples (integer + fractional part)
    pub fn total_delay(&self) -> f64 {
        self.int_delay as f64 + self.frac_delay
    }

    /// Number of leading decisions excluded from BER
    pub fn discard(&self) -> usize {
        if self.keep_all {
            0
        } else {
            self.preamble
        }
    }

    /// Load a configuration profile from a JSON file
    pub fn load(path: &Path) -> TedResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save this configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> TedResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sps, 8);
        assert_eq!(config.kp, 0.1);
        assert!((config.total_delay() - 5.7).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_rolloff() {
        let config = SimulationConfig {
            rolloff: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TedError::Configuration(_))));
    }

    #[test]
    fn rejects_tiny_sps_and_even_taps() {
        for config in [
            SimulationConfig {
                sps: 1,
                ..Default::default()
            },
            SimulationConfig {
                rc_taps: 100,
                ..Default::default()
            },
            SimulationConfig {
                sinc_taps: 20,
                ..Default::default()
            },
            SimulationConfig {
                interp_taps: 15,
                ..Default::default()
            },
            SimulationConfig {
                upsample: 0,
                ..Default::default()
            },
        ] {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }

    #[test]
    fn rejects_bad_gains_and_delta() {
        let nan_gain = SimulationConfig {
            kp: f64::NAN,
            ..Default::default()
        };
        let wide_delta = SimulationConfig {
            delta: 0.5,
            ..Default::default()
        };
        assert!(nan_gain.validate().is_err());
        assert!(wide_delta.validate().is_err());
    }

    #[test]
    fn rejects_inverted_sweep() {
        let config = SimulationConfig {
            sweep: SnrSweep {
                min_snr: 10.0,
                max_snr: 5.0,
                snr_step: 1.0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn sweep_points_include_both_ends() {
        let sweep = SnrSweep {
            min_snr: 1.0,
            max_snr: 30.0,
            snr_step: 1.0,
        };
        let points = sweep.points();
        assert_eq!(points.len(), 30);
        assert_eq!(points[0], 1.0);
        assert_eq!(points[29], 30.0);

        let fractional = SnrSweep {
            min_snr: 0.0,
            max_snr: 1.0,
            snr_step: 0.1,
        };
        assert_eq!(fractional.points().len(), 11);
    }

    #[test]
    fn discard_follows_keep_all() {
        let mut config = SimulationConfig::default();
        assert_eq!(config.discard(), 30);
        config.keep_all = true;
        assert_eq!(config.discard(), 0);
    }

    #[test]
    fn method_names_parse_back() {
        for method in TedMethod::ALL {
            assert_eq!(method.name().parse::<TedMethod>().unwrap(), method);
        }
        assert!("zero_crossing".parse::<TedMethod>().is_err());
        assert_eq!("PI".parse::<UpdateMode>().unwrap(), UpdateMode::ProportionalIntegral);
    }

    #[test]
    fn configuration_serializes_with_snake_case_names() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"method\":\"mueller\""));
        assert!(json.contains("\"update_mode\":\"proportional\""));

        let partial: SimulationConfig =
            serde_json::from_str(r#"{"method":"early_late","update_mode":"pi"}"#).unwrap();
        assert_eq!(partial.method, TedMethod::EarlyLate);
        assert_eq!(partial.update_mode, UpdateMode::ProportionalIntegral);
        assert_eq!(partial.sps, 8);
    }
}
