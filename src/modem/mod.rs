//! BPSK link
//!
//! Bit source, pulse shaping and channel on the transmit side; upsampling,
//! timing recovery and BER evaluation on the receive side.

pub mod evaluator;
pub mod receiver;
pub mod source;
pub mod transmitter;

pub use evaluator::{bit_error_rate, BerReport};
pub use receiver::Receiver;
pub use source::Transmission;
pub use transmitter::Transmitter;
