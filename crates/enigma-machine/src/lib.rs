//! Application layer of the Enigma simulator.
//!
//! [`Machine`] is the single cooperative supervisor: it owns the cipher
//! engine, the PS/2 keyboard driver, the plugboard scanner, the rotary
//! encoder and the display, and walks a three-mode state machine driven by
//! one debounced button. The only preemptive context in the system is the
//! PS/2 clock-edge routine, and it never touches machine state; everything
//! meets in the driver's ring buffers.
#![forbid(unsafe_code)]

mod display;
mod fsm;

pub use display::{DisplaySink, NullDisplay};
pub use fsm::{Machine, Mode};

/// Debounce timing for the mode button.
#[derive(Debug, Clone, Copy)]
pub struct ButtonTiming {
    /// Sampling period for the debouncer.
    pub sample_ms: u32,
    /// Raw level must hold this long to accept a press.
    pub press_ms: u32,
    /// And this long to accept a release.
    pub release_ms: u32,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            sample_ms: 10,
            press_ms: 20,
            release_ms: 40,
        }
    }
}

/// Session configuration. The defaults mirror the classic bench setup:
/// rotors III, II, I fast to slow with reflector B.
#[derive(Debug, Clone, Copy)]
pub struct MachineConfig {
    /// Rotor numbers (1..=8), fast to slow.
    pub rotors: [u8; 3],
    /// Reflector index (0..=2 for A..C).
    pub reflector: u8,
    /// Plugboard sweep period while configuring the plugboard.
    pub plugboard_scan_ms: u32,
    /// How long the Roman-numeral rotor label is shown.
    pub rotor_intro_ms: u32,
    pub button: ButtonTiming,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            rotors: [3, 2, 1],
            reflector: 1,
            plugboard_scan_ms: 500,
            rotor_intro_ms: 700,
            button: ButtonTiming::default(),
        }
    }
}
