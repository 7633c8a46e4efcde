use enigma_cipher::Plugboard;
use enigma_platform::{PinHandle, PinMode};

/// Conductivity scanner for the 26 plugboard jacks.
///
/// Jacks idle as pulled-down inputs; the GPIO lines belong exclusively to
/// the scanner while a sweep runs. One call to [`PlugboardScanner::scan`]
/// is one full cooperative sweep.
pub struct PlugboardScanner {
    pins: Vec<PinHandle>,
}

impl PlugboardScanner {
    /// Takes ownership of the 26 jack pins (letter order A..Z).
    ///
    /// # Panics
    ///
    /// Panics unless exactly 26 pins are supplied.
    pub fn new(mut pins: Vec<PinHandle>) -> Self {
        assert_eq!(pins.len(), 26, "plugboard scanner needs one pin per letter");
        for pin in &mut pins {
            pin.set_mode(PinMode::InputPullDown);
        }
        Self { pins }
    }

    /// Sweeps every jack and derives the current involution.
    ///
    /// Each jack in turn is driven high as a push-pull output while the
    /// other 25 are sampled; the first jack reading the level back becomes
    /// the partner. Pairs are written symmetrically and an established pair
    /// is never broken by a later conflicting read, so the result is an
    /// involution even under miswiring. Unconnected letters map to
    /// themselves.
    pub fn scan(&mut self) -> Plugboard {
        let mut map = [0u8; 26];
        for (i, slot) in map.iter_mut().enumerate() {
            *slot = i as u8;
        }

        for i in 0..self.pins.len() {
            self.pins[i].set_mode(PinMode::Output);
            self.pins[i].write(true);

            for j in 0..self.pins.len() {
                if j == i {
                    continue;
                }
                if self.pins[j].read() {
                    if map[i] == i as u8 && map[j] == j as u8 {
                        map[i] = j as u8;
                        map[j] = i as u8;
                    }
                    break;
                }
            }

            self.pins[i].write(false);
            self.pins[i].set_mode(PinMode::InputPullDown);
        }

        Plugboard::from_indices(map).expect("symmetric pair writes form an involution")
    }
}
