//! Bench harness: a full machine wired to shared test pins, a manual
//! clock and a recording display.
#![allow(dead_code)] // each test binary uses a different slice of the harness

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use enigma_devices_input::{PlugboardScanner, Ps2Keyboard, RotaryEncoder};
use enigma_machine::{DisplaySink, Machine, MachineConfig};
use enigma_platform::{ManualClock, PinHandle, TestPin};

#[derive(Debug, Default)]
pub struct DisplayLog {
    pub chars: Vec<char>,
    pub numbers: Vec<u8>,
    pub romans: Vec<u8>,
    /// Text passed to `shift_text` with `reset` set.
    pub text_resets: Vec<String>,
}

/// Display double whose animations complete instantly and whose draw calls
/// are logged for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    log: Rc<RefCell<DisplayLog>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Ref<'_, DisplayLog> {
        self.log.borrow()
    }

    pub fn take_chars(&self) -> Vec<char> {
        std::mem::take(&mut self.log.borrow_mut().chars)
    }
}

impl DisplaySink for RecordingDisplay {
    fn draw_char(&mut self, c: char) {
        self.log.borrow_mut().chars.push(c);
    }

    fn draw_number(&mut self, n: u8) {
        self.log.borrow_mut().numbers.push(n);
    }

    fn draw_roman(&mut self, n: u8) {
        self.log.borrow_mut().romans.push(n);
    }

    fn shift_text(&mut self, text: &str, reset: bool) -> bool {
        if reset {
            self.log.borrow_mut().text_resets.push(text.to_string());
        }
        true
    }

    fn wait_input(&mut self, _reset: bool) -> bool {
        true
    }

    fn loading(&mut self, _reset: bool) -> bool {
        true
    }
}

pub struct MachineHarness {
    pub machine: Machine,
    pub clock: ManualClock,
    pub display: RecordingDisplay,
    pub kb_data: TestPin,
    pub button: TestPin,
    pub encoder_clk: TestPin,
    pub encoder_data: TestPin,
    pub plug_pins: Vec<TestPin>,
}

impl MachineHarness {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        let clock = ManualClock::new();
        let display = RecordingDisplay::new();
        let kb_data = TestPin::new();
        let kb_clk = TestPin::new();
        let button = TestPin::new();
        let encoder_clk = TestPin::new();
        let encoder_data = TestPin::new();
        let plug_pins: Vec<TestPin> = (0..26).map(|_| TestPin::new()).collect();

        let keyboard = Ps2Keyboard::new(
            Box::new(kb_data.clone()) as PinHandle,
            Box::new(kb_clk) as PinHandle,
            Rc::new(clock.clone()),
        );
        let scanner = PlugboardScanner::new(
            plug_pins
                .iter()
                .cloned()
                .map(|pin| Box::new(pin) as PinHandle)
                .collect(),
        );
        let encoder = RotaryEncoder::new(
            Box::new(encoder_clk.clone()) as PinHandle,
            Box::new(encoder_data.clone()) as PinHandle,
        );
        let machine = Machine::new(
            config,
            keyboard,
            scanner,
            encoder,
            Box::new(button.clone()) as PinHandle,
            Box::new(display.clone()),
            Rc::new(clock.clone()),
        )
        .expect("default configuration is valid");

        Self {
            machine,
            clock,
            display,
            kb_data,
            button,
            encoder_clk,
            encoder_data,
            plug_pins,
        }
    }

    /// Advances one button-sample period and runs one loop iteration.
    pub fn tick(&mut self) {
        self.clock.advance_ms(10);
        self.machine.poll();
    }

    pub fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// One debounced press-and-release of the mode button.
    pub fn push_button(&mut self) {
        self.button.set_line(false);
        self.ticks(4);
        self.button.set_line(true);
        self.ticks(6);
    }

    fn shift_kb_bit(&mut self, level: bool) {
        self.kb_data.set_line(level);
        self.machine.keyboard().clock_edge();
    }

    /// Clocks one device-to-host scan frame with correct odd parity.
    pub fn send_scan_byte(&mut self, byte: u8) {
        let parity = byte.count_ones() % 2 == 0;
        self.shift_kb_bit(false);
        for i in 0..8 {
            self.shift_kb_bit(byte >> i & 1 == 1);
        }
        self.shift_kb_bit(parity);
        self.shift_kb_bit(true);
    }

    /// Types one key: make followed by break.
    pub fn type_key(&mut self, scan: u8) {
        self.send_scan_byte(scan);
        self.send_scan_byte(0xF0);
        self.send_scan_byte(scan);
    }

    /// Turns the encoder one clockwise detent, polling through the states.
    pub fn encoder_cw(&mut self) {
        self.encoder_states(&[0b11, 0b10, 0b00]);
    }

    /// One counter-clockwise detent.
    pub fn encoder_ccw(&mut self) {
        self.encoder_states(&[0b00, 0b10, 0b11]);
    }

    fn encoder_states(&mut self, states: &[u8]) {
        for &state in states {
            self.encoder_data.set_line(state & 0b10 != 0);
            self.encoder_clk.set_line(state & 0b01 != 0);
            self.tick();
        }
    }
}
