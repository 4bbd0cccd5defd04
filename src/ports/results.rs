//! Result persistence port trait

use crate::domain::TedResult;
use crate::orchestrator::SweepResults;

/// Trait for persisting sweep results between runs
pub trait ResultStore: Send {
    /// Store a complete set of sweep results, replacing any previous one
    fn save(&mut self, results: &SweepResults) -> TedResult<()>;

    /// Read back the most recently saved results
    fn load(&self) -> TedResult<SweepResults>;
}
