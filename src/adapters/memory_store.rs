//! In-memory result store for tests and throwaway runs.
//!
//! Results still go through JSON so a memory round trip exercises exactly
//! the same serialization as the file store. Every call is logged at DEBUG.

use std::io;

use crate::domain::{TedError, TedResult};
use crate::orchestrator::SweepResults;
use crate::ports::ResultStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialized form of the last save, if any
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl ResultStore for MemoryStore {
    fn save(&mut self, results: &SweepResults) -> TedResult<()> {
        let json = serde_json::to_string(results)?;
        log::debug!("[MEMORY STORE] save → {} bytes", json.len());
        self.document = Some(json);
        Ok(())
    }

    fn load(&self) -> TedResult<SweepResults> {
        let json = self.document.as_deref().ok_or_else(|| {
            TedError::Io(io::Error::new(io::ErrorKind::NotFound, "no results saved"))
        })?;
        log::debug!("[MEMORY STORE] load ← {} bytes", json.len());
        Ok(serde_json::from_str(json)?)
    }
}
