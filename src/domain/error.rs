//! Domain error types

use thiserror::Error;

/// Errors that can occur while building, running or evaluating a simulation
#[derive(Error, Debug)]
pub enum TedError {
    /// Interpolation index outside the waveform. Fatal for the run that hit it.
    #[error("Index {index} is outside the waveform (valid range 0..{len})")]
    OutOfRange { index: f64, len: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(
        "Alignment error: {decisions} decisions vs {truth} reference symbols after discarding {discard}"
    )]
    Alignment {
        decisions: usize,
        truth: usize,
        discard: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for simulator operations
pub type TedResult<T> = Result<T, TedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_error_message_names_all_counts() {
        let err = TedError::Alignment {
            decisions: 10,
            truth: 12,
            discard: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("10 decisions"));
        assert!(msg.contains("12 reference"));
        assert!(msg.contains("discarding 3"));
    }
}
