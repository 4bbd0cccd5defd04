//! JSON file result store
//!
//! Sweep results are written as pretty-printed JSON. Floats are written and
//! parsed losslessly, so a saved sweep loads back bit-for-bit identical.

use std::path::PathBuf;

use crate::domain::TedResult;
use crate::orchestrator::SweepResults;
use crate::ports::ResultStore;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultStore for JsonFileStore {
    fn save(&mut self, results: &SweepResults) -> TedResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&self.path, json)?;
        log::info!(
            "Saved {} sweep entries to {}",
            results.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> TedResult<SweepResults> {
        let json = std::fs::read_to_string(&self.path)?;
        let results: SweepResults = serde_json::from_str(&json)?;
        log::info!(
            "Loaded {} sweep entries from {}",
            results.entries.len(),
            self.path.display()
        );
        Ok(results)
    }
}
