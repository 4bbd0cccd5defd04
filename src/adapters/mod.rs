//! Adapters: implementations of the port traits

pub mod json_plot;
pub mod json_store;
pub mod memory_plot;
pub mod memory_store;

pub use json_plot::JsonPlotWriter;
pub use json_store::JsonFileStore;
pub use memory_plot::PlotRecorder;
pub use memory_store::MemoryStore;
