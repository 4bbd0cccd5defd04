//! BPSK Symbol Timing Recovery Simulator
//!
//! Simulates a BPSK link with an unknown fractional channel delay and
//! compares three timing error detectors (Mueller & Muller, Gardner,
//! Early-Late gate) driving a proportional or PI loop under AWGN.
//!
//! ## Architecture (Hexagonal / Ports & Adapters)
//!
//! - `domain/` - Pure domain types, no I/O dependencies
//! - `ports/` - Trait definitions (interfaces) for result storage and plotting
//! - `dsp/` - Signal processing (pure functions, no I/O)
//! - `modem/` - BPSK link (bit source, transmitter/channel, receiver, BER)
//! - `adapters/` - Implementations of ports (JSON files, in-memory)
//! - `orchestrator/` - Single runs, SNR sweeps, load-and-plot

// Core domain (pure, no I/O)
pub mod domain;
pub mod dsp;
pub mod modem;
pub mod ports;

// Adapters (external I/O)
pub mod adapters;

pub mod orchestrator;
