//! Digital Signal Processing
//!
//! Pure functions for signal processing. No I/O dependencies.

pub mod clock_recovery;
pub mod fft;
pub mod filter;
pub mod interpolator;
pub mod loop_filter;
pub mod noise;
pub mod raised_cosine;
pub mod timing_error;

// Re-export commonly used items
pub use clock_recovery::{ClockRecovery, Recovery};
pub use fft::FftProcessor;
pub use interpolator::{Interpolator, Upsampled};
pub use loop_filter::LoopFilter;
pub use timing_error::TimingErrorDetector;
