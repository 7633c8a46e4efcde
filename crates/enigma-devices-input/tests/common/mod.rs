//! Device-side harness: plays the keyboard end of the PS/2 bus against a
//! driver under test.
#![allow(dead_code)] // each test binary uses a different slice of the harness

use std::rc::Rc;

use enigma_devices_input::Ps2Keyboard;
use enigma_platform::{ManualClock, PinHandle, PinMode, TestPin};

pub struct DeviceHarness {
    pub data: TestPin,
    pub clk: TestPin,
    pub clock: ManualClock,
    pub kb: Ps2Keyboard,
}

impl DeviceHarness {
    pub fn new() -> Self {
        let data = TestPin::new();
        let clk = TestPin::new();
        let clock = ManualClock::new();
        let kb = Ps2Keyboard::new(
            Box::new(data.clone()) as PinHandle,
            Box::new(clk.clone()) as PinHandle,
            Rc::new(clock.clone()),
        );
        Self {
            data,
            clk,
            clock,
            kb,
        }
    }

    /// Presents one bit and generates a falling clock edge.
    pub fn shift_bit(&mut self, level: bool) {
        self.data.set_line(level);
        self.kb.clock_edge();
    }

    /// Clocks one device-to-host frame with an explicit parity bit.
    pub fn send_frame(&mut self, byte: u8, parity: bool) {
        self.shift_bit(false); // start
        for i in 0..8 {
            self.shift_bit(byte >> i & 1 == 1);
        }
        self.shift_bit(parity);
        self.shift_bit(true); // stop
    }

    /// Clocks one device-to-host frame with correct odd parity.
    pub fn send_byte(&mut self, byte: u8) {
        self.send_frame(byte, parity_bit(byte));
    }

    pub fn send_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.send_byte(byte);
        }
    }

    /// True when the driver has issued a start condition (data held low,
    /// clock handed back) and waits for device clocks.
    pub fn host_wants_to_send(&self) -> bool {
        self.clk.mode() == PinMode::InputPullUp
            && self.data.mode() == PinMode::Output
            && !self.data.driven_level()
    }

    /// Plays the device side of one host-to-device byte: 8 data clocks,
    /// parity, stop and acknowledge.
    pub fn clock_out_host_byte(&mut self) -> Option<u8> {
        if !self.host_wants_to_send() {
            return None;
        }
        let mut byte = 0u8;
        for i in 0..8 {
            self.kb.clock_edge();
            if self.data.driven_level() {
                byte |= 1 << i;
            }
        }
        self.kb.clock_edge(); // parity bit
        self.kb.clock_edge(); // stop bit, host releases the line
        self.kb.clock_edge(); // acknowledge bit
        Some(byte)
    }

    /// Receives every byte the host wants to transmit, optionally ACKing
    /// each one the way a real keyboard would.
    pub fn drain_host_bytes(&mut self, ack: bool) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(byte) = self.clock_out_host_byte() {
            out.push(byte);
            if ack {
                self.send_byte(0xFA);
            }
        }
        out
    }
}

/// Odd parity: the bit is set when the data bits hold an even number of
/// ones.
pub fn parity_bit(byte: u8) -> bool {
    byte.count_ones() % 2 == 0
}
