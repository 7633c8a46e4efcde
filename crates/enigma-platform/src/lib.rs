//! Platform abstractions for the Enigma simulator.
//!
//! Device models in this workspace never touch hardware directly; they are
//! written against the [`GpioPin`] and [`Clock`] traits here. Native targets
//! bind these to a board HAL; tests bind them to [`TestPin`] and
//! [`ManualClock`], which let any number of independent device instances run
//! side by side in one process.
#![forbid(unsafe_code)]

mod clock;
mod gpio;

pub use clock::{Clock, ManualClock};
pub use gpio::{GpioPin, PinHandle, PinMode, TestPin};
