//! JSON plot-data writer
//!
//! Writes one JSON file per figure into an output directory, ready for any
//! external plotting tool:
//!
//!   raised_cosine.json          taps + zero crossing indices
//!   spectrum.json               normalised frequency vs power (dB), DC centred
//!   trace_<method>.json         iteration, error, offset
//!   constellation_<method>.json I/Q of recovered symbol samples
//!   ber_vs_snr.json             one curve per method

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{Sample, TedMethod, TedResult, TracePoint};
use crate::orchestrator::SweepResults;
use crate::ports::PlotSink;

#[derive(Serialize)]
struct FilterPlot<'a> {
    title: &'static str,
    taps: &'a [f64],
    zero_crossings: &'a [usize],
}

#[derive(Serialize)]
struct SpectrumPlot {
    title: &'static str,
    /// Cycles per sample, -0.5 to 0.5
    frequency: Vec<f64>,
    power_db: Vec<f64>,
}

#[derive(Serialize)]
struct TracePlot {
    title: String,
    method: TedMethod,
    iteration: Vec<usize>,
    error: Vec<f64>,
    offset: Vec<f64>,
}

#[derive(Serialize)]
struct ConstellationPlot {
    title: String,
    method: TedMethod,
    in_phase: Vec<f64>,
    quadrature: Vec<f64>,
}

#[derive(Serialize)]
struct BerCurve {
    method: TedMethod,
    label: &'static str,
    ber: Vec<Option<f64>>,
}

#[derive(Serialize)]
struct BerPlot<'a> {
    title: &'static str,
    snr_db: &'a [f64],
    curves: Vec<BerCurve>,
}

/// Plot sink writing JSON files into a directory
pub struct JsonPlotWriter {
    dir: PathBuf,
}

impl JsonPlotWriter {
    /// Create the writer, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> TedResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> TedResult<()> {
        let path = self.dir.join(name);
        std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
        log::debug!("Wrote plot data {}", path.display());
        Ok(())
    }
}

impl PlotSink for JsonPlotWriter {
    fn filter_taps(&mut self, taps: &[f64], zero_crossings: &[usize]) -> TedResult<()> {
        self.write(
            "raised_cosine.json",
            &FilterPlot {
                title: "Raised Cosine Filter",
                taps,
                zero_crossings,
            },
        )
    }

    fn spectrum(&mut self, spectrum_db: &[f64]) -> TedResult<()> {
        let (frequency, power_db) = centre_spectrum(spectrum_db);
        self.write(
            "spectrum.json",
            &SpectrumPlot {
                title: "Received Spectrum",
                frequency,
                power_db,
            },
        )
    }

    fn timing_trace(&mut self, method: TedMethod, trace: &[TracePoint]) -> TedResult<()> {
        self.write(
            &format!("trace_{}.json", method.name()),
            &TracePlot {
                title: format!("{} Timing Error and Offset", method.title()),
                method,
                iteration: trace.iter().map(|p| p.iteration).collect(),
                error: trace.iter().map(|p| p.error).collect(),
                offset: trace.iter().map(|p| p.offset).collect(),
            },
        )
    }

    fn constellation(&mut self, method: TedMethod, samples: &[Sample]) -> TedResult<()> {
        self.write(
            &format!("constellation_{}.json", method.name()),
            &ConstellationPlot {
                title: format!("{} Constellation", method.title()),
                method,
                in_phase: samples.iter().map(|s| s.re).collect(),
                quadrature: samples.iter().map(|s| s.im).collect(),
            },
        )
    }

    fn ber_curves(&mut self, results: &SweepResults) -> TedResult<()> {
        let curves = results
            .methods()
            .into_iter()
            .map(|method| BerCurve {
                method,
                label: method.title(),
                ber: results.ber_curve(method),
            })
            .collect();
        self.write(
            "ber_vs_snr.json",
            &BerPlot {
                title: "BER vs SNR",
                snr_db: &results.snr_db,
                curves,
            },
        )
    }
}

/// Reorder FFT-order bins so frequency runs from -0.5 up to just below 0.5
fn centre_spectrum(spectrum_db: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = spectrum_db.len();
    // First negative-frequency bin
    let split = n - n / 2;
    (split..n)
        .chain(0..split)
        .map(|k| {
            let bin = if k >= split { k as f64 - n as f64 } else { k as f64 };
            (bin / n as f64, spectrum_db[k])
        })
        .unzip()
}
