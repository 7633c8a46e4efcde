use enigma_platform::{PinHandle, PinMode};

/// Valid quadrature transitions, indexed by `(previous << 2) | current`.
const VALID_TRANSITIONS: [bool; 16] = [
    false, true, true, false, true, false, false, true, true, false, false, true, false, true,
    true, false,
];

/// Byte signatures of a completed detent, two per direction.
const CW_PATTERNS: [u8; 2] = [0xE8, 0x17];
const CCW_PATTERNS: [u8; 2] = [0xD4, 0x2B];

/// Debounced quadrature decoder for a two-channel rotary encoder.
pub struct RotaryEncoder {
    clk: PinHandle,
    data: PinHandle,
    prev_next: u8,
    store: u16,
}

impl RotaryEncoder {
    pub fn new(mut clk: PinHandle, mut data: PinHandle) -> Self {
        clk.set_mode(PinMode::InputPullUp);
        data.set_mode(PinMode::InputPullUp);
        Self {
            clk,
            data,
            prev_next: 0,
            store: 0,
        }
    }

    /// Current 2-bit pin state, DATA in bit 1, CLK in bit 0.
    fn pin_state(&self) -> u8 {
        u8::from(self.data.read()) << 1 | u8::from(self.clk.read())
    }

    /// Samples the pins once.
    ///
    /// Returns +1 when a full clockwise detent completes, -1 for a
    /// counter-clockwise detent, 0 otherwise. Invalid transitions (contact
    /// bounce) never reach the pattern matcher, so each detent reports
    /// exactly once. Call frequently.
    pub fn read(&mut self) -> i8 {
        self.prev_next = (self.prev_next << 2 | self.pin_state()) & 0x0F;
        if VALID_TRANSITIONS[usize::from(self.prev_next)] {
            self.store = self.store << 4 | u16::from(self.prev_next);
            let signature = (self.store & 0xFF) as u8;
            if CW_PATTERNS.contains(&signature) {
                return 1;
            }
            if CCW_PATTERNS.contains(&signature) {
                return -1;
            }
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enigma_platform::TestPin;

    struct Harness {
        clk: TestPin,
        data: TestPin,
        encoder: RotaryEncoder,
    }

    impl Harness {
        fn new() -> Self {
            let clk = TestPin::new();
            let data = TestPin::new();
            let encoder = RotaryEncoder::new(
                Box::new(clk.clone()) as PinHandle,
                Box::new(data.clone()) as PinHandle,
            );
            Self { clk, data, encoder }
        }

        /// Sets the 2-bit state (DATA bit 1, CLK bit 0) and samples once.
        fn sample(&mut self, state: u8) -> i8 {
            self.data.set_line(state & 0b10 != 0);
            self.clk.set_line(state & 0b01 != 0);
            self.encoder.read()
        }
    }

    #[test]
    fn clockwise_detent_reports_plus_one_exactly_once() {
        let mut h = Harness::new();
        // Transition pair 0xE then 0x8 leaves 0xE8 in the low byte.
        let mut ticks = 0;
        for state in [0b11, 0b10, 0b00] {
            ticks += i32::from(h.sample(state));
        }
        assert_eq!(ticks, 1);
        // Holding the final state adds nothing.
        assert_eq!(h.sample(0b00), 0);
    }

    #[test]
    fn counter_clockwise_detent_reports_minus_one() {
        let mut h = Harness::new();
        // Transition pair 0x2 then 0xB leaves 0x2B in the low byte.
        let mut ticks = 0;
        for state in [0b00, 0b10, 0b11] {
            ticks += i32::from(h.sample(state));
        }
        assert_eq!(ticks, -1);
    }

    #[test]
    fn bounce_between_invalid_states_reports_nothing() {
        let mut h = Harness::new();
        // 00 -> 11 -> 00 are invalid quadrature jumps.
        for state in [0b00, 0b11, 0b00, 0b11] {
            assert_eq!(h.sample(state), 0);
        }
    }

    #[test]
    fn repeated_same_state_is_not_movement() {
        let mut h = Harness::new();
        for _ in 0..8 {
            assert_eq!(h.sample(0b11), 0);
        }
    }
}
