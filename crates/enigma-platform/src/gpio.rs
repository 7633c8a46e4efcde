use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Electrical configuration of a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    InputPullDown,
    InputPullUp,
    Output,
}

/// A single reconfigurable GPIO pin.
///
/// `read` while in [`PinMode::Output`] returns the level the pin itself is
/// driving.
pub trait GpioPin {
    fn set_mode(&mut self, mode: PinMode);
    fn write(&mut self, level: bool);
    fn read(&self) -> bool;
}

/// Boxed pin handed to a device model at construction.
pub type PinHandle = Box<dyn GpioPin>;

#[derive(Debug)]
struct TestPinState {
    mode: PinMode,
    driven: bool,
    /// Level forced onto the net by the test harness, overriding wires and
    /// pull resistors. `None` leaves the net floating at its pull level.
    external: Option<bool>,
    wires: Vec<Weak<RefCell<TestPinState>>>,
}

/// Shared-state pin double for tests.
///
/// Clones share one electrical net: a harness keeps one clone to observe
/// what the device drove (or to force the input level), while the device
/// under test owns another. `wire` connects two nets the way a plugboard
/// cable connects two jacks: an input pin reads high whenever a wired peer
/// is driving high.
#[derive(Debug, Clone)]
pub struct TestPin {
    state: Rc<RefCell<TestPinState>>,
}

impl Default for TestPin {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPin {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(TestPinState {
                mode: PinMode::InputPullDown,
                driven: false,
                external: None,
                wires: Vec::new(),
            })),
        }
    }

    /// Connects two pins with a (bidirectional) wire.
    pub fn wire(a: &TestPin, b: &TestPin) {
        a.state
            .borrow_mut()
            .wires
            .push(Rc::downgrade(&b.state));
        b.state
            .borrow_mut()
            .wires
            .push(Rc::downgrade(&a.state));
    }

    /// Forces the net to `level`, as if external hardware drove the line.
    pub fn set_line(&self, level: bool) {
        self.state.borrow_mut().external = Some(level);
    }

    /// Releases the harness drive; the net floats back to its pull level.
    pub fn release_line(&self) {
        self.state.borrow_mut().external = None;
    }

    /// Mode last configured by the device under test.
    pub fn mode(&self) -> PinMode {
        self.state.borrow().mode
    }

    /// Level last driven by the device under test.
    pub fn driven_level(&self) -> bool {
        self.state.borrow().driven
    }
}

impl GpioPin for TestPin {
    fn set_mode(&mut self, mode: PinMode) {
        self.state.borrow_mut().mode = mode;
    }

    fn write(&mut self, level: bool) {
        self.state.borrow_mut().driven = level;
    }

    fn read(&self) -> bool {
        let state = self.state.borrow();
        match state.mode {
            PinMode::Output => state.driven,
            input => {
                if let Some(level) = state.external {
                    return level;
                }
                for wire in &state.wires {
                    if let Some(peer) = wire.upgrade() {
                        let peer = peer.borrow();
                        if peer.mode == PinMode::Output && peer.driven {
                            return true;
                        }
                    }
                }
                input == PinMode::InputPullUp
            }
        }
    }
}
