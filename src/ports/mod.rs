//! Port traits (interfaces)
//!
//! These traits define the boundaries between the simulation core and its
//! outputs. Adapters implement them for files, memory, or anything else.

pub mod plot;
pub mod results;

pub use plot::*;
pub use results::*;
