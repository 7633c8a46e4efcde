//! Input-side device models for the Enigma simulator.
//!
//! The heavyweight citizen is the [`ps2`] module: a bit-level, edge-driven
//! PS/2 host driver with Scan Code Set 2 translation. Next to it live the
//! plugboard conductivity scanner, the quadrature rotary-encoder reader and
//! a sampled button debouncer. Every model is an owning instance bound to
//! [`enigma_platform`] pin/clock handles, so tests can run as many of them
//! side by side as they like.
#![forbid(unsafe_code)]

mod button;
mod plugboard_scan;
pub mod ps2;
mod ring;
mod rotary;

pub use button::{DebouncedButton, Debouncer};
pub use plugboard_scan::PlugboardScanner;
pub use ps2::Ps2Keyboard;
pub use rotary::RotaryEncoder;

use thiserror::Error;

/// Argument errors rejected at the API boundary; driver state is untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("typematic rate {rate} (max 31) or delay {delay} (max 3) out of range")]
    InvalidTypematic { rate: u8, delay: u8 },
}
