//! Core domain types
//!
//! Pure types with no I/O dependencies beyond configuration profiles.
//! These represent the core concepts of the simulator: configuration,
//! samples, symbols and the error taxonomy.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
