use enigma_platform::{PinHandle, PinMode};

/// Sampled-counter debouncer.
///
/// Feed one raw sample per fixed period. A countdown tracks how long the
/// raw level has disagreed with the debounced level; only when it runs out
/// does the debounced state flip, so a single glitch or a burst of contact
/// bounce shorter than the configured interval never produces an edge.
#[derive(Debug, Clone)]
pub struct Debouncer {
    pressed: bool,
    counter: u16,
    press_ticks: u16,
    release_ticks: u16,
}

impl Debouncer {
    /// `press_ticks`/`release_ticks` are the number of consecutive
    /// disagreeing samples needed to accept a press or a release.
    pub fn new(press_ticks: u16, release_ticks: u16) -> Self {
        Self {
            pressed: false,
            counter: release_ticks,
            press_ticks,
            release_ticks,
        }
    }

    /// Feeds one sample; returns `(changed, pressed)`.
    pub fn sample(&mut self, raw_pressed: bool) -> (bool, bool) {
        if raw_pressed == self.pressed {
            // Agreement re-arms the countdown for the next transition.
            self.counter = if self.pressed {
                self.release_ticks
            } else {
                self.press_ticks
            };
            return (false, self.pressed);
        }

        self.counter -= 1;
        if self.counter == 0 {
            self.pressed = raw_pressed;
            self.counter = if self.pressed {
                self.release_ticks
            } else {
                self.press_ticks
            };
            return (true, self.pressed);
        }
        (false, self.pressed)
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }
}

/// A debounced push button bound to a pin.
pub struct DebouncedButton {
    pin: PinHandle,
    debouncer: Debouncer,
    active_low: bool,
}

impl DebouncedButton {
    pub fn new(mut pin: PinHandle, active_low: bool, press_ticks: u16, release_ticks: u16) -> Self {
        pin.set_mode(if active_low {
            PinMode::InputPullUp
        } else {
            PinMode::InputPullDown
        });
        Self {
            pin,
            debouncer: Debouncer::new(press_ticks, release_ticks),
            active_low,
        }
    }

    /// Samples the pin once; returns `(changed, pressed)`. Call on the
    /// debounce period.
    pub fn poll(&mut self) -> (bool, bool) {
        let raw = self.pin.read() != self.active_low;
        self.debouncer.sample(raw)
    }

    pub fn pressed(&self) -> bool {
        self.debouncer.pressed()
    }
}
