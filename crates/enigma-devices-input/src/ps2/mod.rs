//! Bit-level PS/2 keyboard host driver with Scan Code Set 2 translation.
//!
//! The driver is edge-driven: the platform layer calls
//! [`Ps2Keyboard::clock_edge`] on every falling edge of the clock line, and
//! that service routine is the only mutator of the bit-level frame state.
//! Completed bytes flow through a raw ring into the translation layer,
//! which resolves prefixes, tracks modifier/lock state and queues 16-bit
//! key events for the application. Host-to-device commands are queued with
//! [`KEY_IGNORE`] placeholders sizing the expected response, and are shifted
//! out by the same edge routine once the driver has claimed the bus.

pub mod keycode;
mod keymap;

use std::rc::Rc;

use tracing::{trace, warn};

use enigma_platform::{Clock, PinHandle, PinMode};

use crate::ring::SpscRing;
use crate::InputError;
use self::keycode::*;

const RAW_CAPACITY: usize = 16;
const TX_CAPACITY: usize = 16;
const EVENT_CAPACITY: usize = 8;

/// A gap this long between clock edges resynchronizes the bit counter.
const FRAME_TIMEOUT_MS: u32 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BusDirection {
    Receive,
    Transmit,
}

/// Prefix bytes decoded so far for the scan sequence in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    None,
    /// Saw 0xE0.
    Extended,
    /// Saw 0xE1; the rest of the Pause sequence is absorbed.
    ExtendedPause,
    /// Saw 0xF0, possibly behind an 0xE0.
    Break { extended: bool },
}

/// One completed byte with the decode flags that were live when its frame
/// finished.
#[derive(Debug, Clone, Copy, Default)]
struct RawScan {
    code: u8,
    extended: bool,
    pause: bool,
    break_code: bool,
    response: bool,
}

/// Outcome of translating one raw byte.
enum Translated {
    /// Raw ring is empty.
    Empty,
    /// The byte produced no observable event.
    Skip,
    Event(u16),
}

/// What the post-byte classifier wants done with a completed byte.
struct Action {
    save: bool,
    decrement: bool,
    handshake: Option<u8>,
}

impl Action {
    fn save_and_count() -> Self {
        Self {
            save: true,
            decrement: true,
            handshake: None,
        }
    }

    fn absorb() -> Self {
        Self {
            save: false,
            decrement: false,
            handshake: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TxFlags {
    /// A protocol reply (RESEND/ECHO) is on the wire; it must not disturb
    /// the expected-response bookkeeping of queued commands.
    handshake: bool,
    /// A queued command still wants the bus.
    command: bool,
}

/// Owning PS/2 host driver instance.
pub struct Ps2Keyboard {
    data: PinHandle,
    clk: PinHandle,
    clock: Rc<dyn Clock>,
    irq_enabled: bool,

    // Bit-level frame state, touched only from `clock_edge`.
    direction: BusDirection,
    bitcount: u8,
    shiftdata: u8,
    parity: u8,
    parity_error: bool,
    last_edge_ms: u32,
    busy: bool,

    // Post-byte decoder state.
    prefix: Prefix,
    awaiting_response: bool,
    bytes_expected: i8,
    last_valid: bool,

    // Transmit machinery.
    tx_ring: SpscRing<u8, TX_CAPACITY>,
    tx_flags: TxFlags,
    now_send: u8,
    last_sent: u8,
    response_count: u8,

    // Producer side: `clock_edge`. Consumer side: the translation layer.
    raw_ring: SpscRing<RawScan, RAW_CAPACITY>,
    events: SpscRing<u16, EVENT_CAPACITY>,

    // Translation state.
    status: u8,
    led_lock: u8,
    lock_rearm: [bool; 4],
    no_breaks: bool,
    no_repeats: bool,

    // Transient conditions are recovered in place and only counted.
    parity_errors: u32,
    resyncs: u32,
    dropped_raw: u32,
}

impl Ps2Keyboard {
    /// Binds a driver to its data/clock pins. Both lines idle high; the
    /// caller delivers falling clock edges via [`Ps2Keyboard::clock_edge`].
    pub fn new(mut data: PinHandle, mut clk: PinHandle, clock: Rc<dyn Clock>) -> Self {
        data.set_mode(PinMode::InputPullUp);
        clk.set_mode(PinMode::InputPullUp);
        Self {
            data,
            clk,
            clock,
            irq_enabled: true,
            direction: BusDirection::Receive,
            bitcount: 0,
            shiftdata: 0,
            parity: 0,
            parity_error: false,
            last_edge_ms: 0,
            busy: false,
            prefix: Prefix::None,
            awaiting_response: false,
            bytes_expected: 0,
            last_valid: false,
            tx_ring: SpscRing::new(),
            tx_flags: TxFlags::default(),
            now_send: 0,
            last_sent: 0,
            response_count: 0,
            raw_ring: SpscRing::new(),
            events: SpscRing::new(),
            status: 0,
            led_lock: 0,
            lock_rearm: [false; 4],
            no_breaks: false,
            no_repeats: false,
            parity_errors: 0,
            resyncs: 0,
            dropped_raw: 0,
        }
    }

    /// Re-arms the clock-edge service routine from a clean protocol state.
    pub fn enable_irq(&mut self) {
        self.soft_reset();
        self.irq_enabled = true;
    }

    /// Masks the clock-edge service routine; edges are ignored until
    /// [`Ps2Keyboard::enable_irq`].
    pub fn disable_irq(&mut self) {
        self.irq_enabled = false;
    }

    /// Clock-line edge service routine.
    pub fn clock_edge(&mut self) {
        if !self.irq_enabled {
            return;
        }
        match self.direction {
            BusDirection::Transmit => self.send_bit(),
            BusDirection::Receive => self.receive_bit(),
        }
    }

    fn receive_bit(&mut self) {
        let level = self.data.read();

        let now = self.clock.now_ms();
        if now.wrapping_sub(self.last_edge_ms) > FRAME_TIMEOUT_MS && self.bitcount != 0 {
            trace!(bit = self.bitcount, "inter-bit watchdog expired, resyncing");
            self.resyncs += 1;
            self.bitcount = 0;
            self.shiftdata = 0;
        }
        self.last_edge_ms = now;

        self.bitcount += 1;
        match self.bitcount {
            1 => {
                // Start bit must be low.
                if level {
                    self.resyncs += 1;
                    self.bitcount = 0;
                    return;
                }
                self.parity = 0;
                self.parity_error = false;
                self.busy = true;
            }
            2..=9 => {
                // Data bits, LSB first.
                self.parity += u8::from(level);
                self.shiftdata >>= 1;
                if level {
                    self.shiftdata |= 0x80;
                }
            }
            10 => {
                // Data plus parity bit must sum odd.
                if self.parity & 1 == u8::from(level) {
                    self.parity_error = true;
                }
            }
            11 => {
                // Reset first: completing the frame may itself claim the
                // bus and restart the bit counter for transmit.
                self.bitcount = 0;
                self.complete_frame();
            }
            _ => self.bitcount = 0,
        }
    }

    /// Runs at the stop bit of a received frame.
    fn complete_frame(&mut self) {
        if self.parity_error {
            self.parity_errors += 1;
            trace!(byte = self.shiftdata, "parity mismatch, requesting resend");
            self.send_now(CMD_RESEND);
            self.tx_flags.handshake = true;
            return;
        }

        let action = self.classify(self.shiftdata);
        if action.decrement {
            self.bytes_expected -= 1;
        }

        if self.bytes_expected <= 0 || action.save {
            let raw = RawScan {
                code: self.shiftdata,
                extended: matches!(
                    self.prefix,
                    Prefix::Extended | Prefix::Break { extended: true }
                ),
                pause: self.prefix == Prefix::ExtendedPause,
                break_code: matches!(self.prefix, Prefix::Break { .. }),
                response: self.awaiting_response,
            };
            if !self.raw_ring.push(raw) {
                self.dropped_raw += 1;
                warn!(code = raw.code, "raw scan ring full, dropping byte");
            }
        }

        if let Some(reply) = action.handshake {
            self.send_now(reply);
            self.tx_flags.handshake = true;
        } else if self.bytes_expected <= 0 {
            // Sequence complete: back to a quiet line.
            self.prefix = Prefix::None;
            self.awaiting_response = false;
            self.bytes_expected = 0;
            self.busy = false;
            self.send_next();
        }
    }

    /// Post-byte classification. Decides whether the byte is saved, whether
    /// it counts against the expected-byte counter, and whether a protocol
    /// reply goes out.
    fn classify(&mut self, value: u8) -> Action {
        if value != CMD_RESEND {
            self.last_valid = false;
        }

        // Response data bytes must not be mistaken for prefixes.
        if self.awaiting_response && value < 0xF0 {
            return Action::save_and_count();
        }

        // Inside the Pause sequence everything is absorbed; the final byte
        // is saved by the expected-counter reaching zero.
        if self.prefix == Prefix::ExtendedPause {
            return Action {
                save: false,
                decrement: true,
                handshake: None,
            };
        }

        match value {
            0x00 | RSP_OVERRUN => {
                // Hard error: drop to a known-idle baseline, then surface
                // the byte itself.
                warn!(value, "keyboard reported overrun, resetting driver state");
                self.soft_reset();
                Action {
                    save: true,
                    decrement: false,
                    handshake: None,
                }
            }
            RSP_RESEND => {
                if self.last_valid {
                    Action {
                        save: false,
                        decrement: false,
                        handshake: Some(self.last_sent),
                    }
                } else {
                    Action::absorb()
                }
            }
            RSP_BAT_FAIL => {
                // Keyboard self-test failed: stop everything in flight.
                self.bytes_expected = 0;
                self.prefix = Prefix::None;
                self.awaiting_response = false;
                self.busy = false;
                self.tx_flags = TxFlags::default();
                Action::save_and_count()
            }
            SC_BREAK => {
                self.bytes_expected = 1;
                self.prefix = Prefix::Break {
                    extended: self.prefix == Prefix::Extended,
                };
                Action::absorb()
            }
            RSP_ECHO => {
                let echo_back = self.last_valid && self.last_sent != CMD_ECHO;
                Action {
                    save: true,
                    decrement: false,
                    handshake: echo_back.then_some(CMD_ECHO),
                }
            }
            RSP_BAT_PASS => {
                self.bytes_expected = 0;
                Action {
                    save: true,
                    decrement: false,
                    handshake: None,
                }
            }
            SC_EXTEND_PAUSE => {
                self.bytes_expected = 7;
                self.prefix = Prefix::ExtendedPause;
                Action::absorb()
            }
            SC_EXTEND => {
                self.bytes_expected = 1;
                self.prefix = Prefix::Extended;
                Action::absorb()
            }
            _ => Action::save_and_count(),
        }
    }

    /// Shifts out the next transmit bit; runs from `clock_edge` while the
    /// driver owns the bus.
    fn send_bit(&mut self) {
        self.bitcount += 1;
        match self.bitcount {
            2..=9 => {
                let bit = self.shiftdata & 0x01 != 0;
                self.data.write(bit);
                self.parity += u8::from(bit);
                self.shiftdata >>= 1;
            }
            10 => {
                // Odd parity over the data bits.
                self.data.write(self.parity & 1 == 0);
            }
            11 => {
                // Stop bit: release the data line.
                self.data.set_mode(PinMode::InputPullUp);
            }
            12 => {
                // Device acknowledge bit.
                if self.now_send != CMD_ECHO && self.now_send != CMD_RESEND {
                    self.last_sent = self.now_send;
                    self.last_valid = true;
                }
                self.direction = BusDirection::Receive;
                if self.tx_flags.handshake {
                    self.tx_flags.handshake = false;
                } else {
                    self.tx_flags.command = false;
                }
                if !self.awaiting_response {
                    self.send_next();
                }
                self.bitcount = 0;
            }
            _ => self.bitcount = 0,
        }
    }

    /// Claims the bus and transmits the start condition for `command`; the
    /// remaining bits go out on device clock edges.
    fn send_now(&mut self, command: u8) {
        self.shiftdata = command;
        self.now_send = command;
        self.bitcount = 1;
        self.parity = 0;
        self.direction = BusDirection::Transmit;
        self.busy = true;

        if !self.tx_flags.handshake && self.tx_flags.command {
            self.bytes_expected = i8::try_from(self.response_count).unwrap_or(i8::MAX);
            self.awaiting_response = true;
        }

        // Edges must not reach the bit machine while the lines are being
        // reconfigured.
        let was_enabled = self.irq_enabled;
        self.irq_enabled = false;

        self.data.write(true);
        self.data.set_mode(PinMode::Output);
        self.clk.write(true);
        self.clk.set_mode(PinMode::Output);
        self.clock.delay_us(10);

        // Clock-low request, then the start bit, then hand the clock back
        // to the device.
        self.clk.write(false);
        self.clock.delay_us(60);
        self.data.write(false);
        self.clk.set_mode(PinMode::InputPullUp);

        self.irq_enabled = was_enabled;
    }

    /// Starts the next queued command if the bus is free. The IGNORE
    /// placeholders queued behind a command byte size its expected
    /// response.
    fn send_next(&mut self) {
        if self.tx_ring.is_empty() {
            return;
        }
        self.tx_flags.command = true;
        if self.tx_flags.handshake || self.busy {
            return;
        }

        let value = match self.tx_ring.pop() {
            Some(value) => value,
            None => return,
        };
        self.response_count = 0;
        while self.tx_ring.peek() == Some(KEY_IGNORE) {
            self.tx_ring.pop();
            self.response_count += 1;
        }
        self.send_now(value);
    }

    /// Queues a command sequence and kicks the transmitter when every byte
    /// fit.
    fn queue_command(&mut self, bytes: &[u8]) {
        let mut ok = true;
        for &byte in bytes {
            ok = self.tx_ring.push(byte);
        }
        if ok {
            self.send_next();
        } else {
            warn!("transmit ring full, command dropped");
        }
    }

    /// Resets protocol and translation state without touching the
    /// translated-event queue.
    fn soft_reset(&mut self) {
        self.tx_ring.clear();
        self.tx_flags = TxFlags::default();
        self.response_count = 0;
        self.raw_ring.clear();
        self.bitcount = 0;
        self.parity_error = false;
        self.direction = BusDirection::Receive;
        self.busy = false;
        self.prefix = Prefix::None;
        self.awaiting_response = false;
        self.bytes_expected = 0;
        self.last_valid = false;
        self.status = 0;
        self.led_lock = 0;
        self.lock_rearm = [false; 4];
    }

    // --- Translation -----------------------------------------------------

    /// Translates the next raw byte.
    fn translate(&mut self) -> Translated {
        let raw = match self.raw_ring.pop() {
            Some(raw) => raw,
            None => return Translated::Empty,
        };

        // The completed E1 sequence collapses into a single Pause make.
        if raw.pause {
            return Translated::Event(u16::from(STATUS_FUNCTION) << 8 | u16::from(KEY_PAUSE));
        }

        // Controller responses (BAT, ACK, RESEND, IDs...) pass through
        // untranslated so the application can watch them.
        if (raw.code >= RSP_BAT_PASS && raw.code != SC_LANG1 && raw.code != SC_LANG2)
            || raw.response
        {
            return Translated::Event(u16::from(raw.code));
        }

        if raw.break_code {
            self.status |= STATUS_BREAK;
        } else {
            self.status &= !STATUS_BREAK;
        }

        let mut key = if raw.extended {
            keymap::extended_code(raw.code).unwrap_or(0)
        } else {
            keymap::single_code(raw.code).unwrap_or(0)
        };

        if key == 0 {
            return Translated::Skip;
        }

        if key <= KEY_CAPS {
            key = self.process_lock_key(key);
        } else if (KEY_L_SHIFT..=KEY_R_GUI).contains(&key) {
            key = self.process_modifier_key(key);
        } else if (KEY_KP0..=KEY_KP_DOT).contains(&key)
            && (self.led_lock & LOCK_NUM == 0 || self.status & STATUS_SHIFT != 0)
        {
            key = keymap::keypad_nav_remap(key);
        }

        if key == KEY_IGNORE {
            return Translated::Skip;
        }
        if self.status & STATUS_BREAK != 0 && self.no_breaks {
            return Translated::Skip;
        }

        // Function/navigation keys carry the function flag; printable
        // codes clear it.
        if (key <= KEY_SPACE || key >= KEY_F1) && key != KEY_EUROPE2 {
            self.status |= STATUS_FUNCTION;
        } else {
            self.status &= !STATUS_FUNCTION;
        }

        Translated::Event(u16::from(self.status) << 8 | u16::from(key))
    }

    /// Caps/Num/Scroll handling: toggle on make, re-arm on break, and keep
    /// the LEDs in lockstep.
    fn process_lock_key(&mut self, key: u8) -> u8 {
        let slot = usize::from(key);
        if self.status & STATUS_BREAK != 0 {
            self.lock_rearm[slot] = false;
            return KEY_IGNORE;
        }
        if self.lock_rearm[slot] {
            // Typematic repeat of a held lock key.
            return KEY_IGNORE;
        }
        self.lock_rearm[slot] = true;

        let mask = match key {
            KEY_CAPS => {
                self.status ^= STATUS_CAPS;
                LOCK_CAPS
            }
            KEY_SCROLL => LOCK_SCROLL,
            KEY_NUM => LOCK_NUM,
            _ => unreachable!("lock keys are 0x01..=0x03"),
        };
        if self.led_lock & mask != 0 {
            self.led_lock &= !mask;
            // Toggling a lock off reports the event as a break edge.
            self.status |= STATUS_BREAK;
        } else {
            self.led_lock |= mask;
        }
        self.set_lock_leds();
        key
    }

    fn process_modifier_key(&mut self, key: u8) -> u8 {
        // Flag per key code, L_SHIFT through R_GUI.
        const CONTROL_FLAGS: [u8; 8] = [
            STATUS_SHIFT,
            STATUS_SHIFT,
            STATUS_CTRL,
            STATUS_CTRL,
            STATUS_ALT,
            STATUS_ALT_GR,
            STATUS_GUI,
            STATUS_GUI,
        ];
        let flag = CONTROL_FLAGS[usize::from(key - KEY_L_SHIFT)];
        if self.status & STATUS_BREAK != 0 {
            self.status &= !flag;
        } else if self.status & flag != 0 && self.no_repeats {
            return KEY_IGNORE;
        } else {
            self.status |= flag;
        }
        key
    }

    fn set_lock_leds(&mut self) {
        self.queue_command(&[CMD_SET_LEDS, KEY_IGNORE, self.led_lock, KEY_IGNORE]);
    }

    // --- Observable API --------------------------------------------------

    /// Count of translated events ready to read, advancing translation as
    /// far as the event queue allows.
    pub fn available(&mut self) -> u8 {
        while !self.events.is_full() {
            match self.translate() {
                Translated::Empty => break,
                Translated::Skip => continue,
                Translated::Event(event) => {
                    self.events.push(event);
                }
            }
        }
        self.events.len() as u8
    }

    /// Next translated key event, or 0 when none is pending.
    pub fn read(&mut self) -> u16 {
        self.available();
        self.events.pop().unwrap_or(0)
    }

    /// Current lock mask (see the `LOCK_*` bits).
    pub fn get_lock(&self) -> u8 {
        self.led_lock
    }

    /// Overwrites the lock mask and pushes it out to the keyboard LEDs.
    pub fn set_lock(&mut self, mask: u8) {
        self.led_lock = mask & 0x0F;
        self.status &= !STATUS_CAPS;
        if self.led_lock & LOCK_CAPS != 0 {
            self.status |= STATUS_CAPS;
        }
        self.set_lock_leds();
    }

    /// Suppress break (release) events entirely.
    pub fn set_no_breaks(&mut self, on: bool) {
        self.no_breaks = on;
    }

    /// Suppress typematic repeats of held modifier keys.
    pub fn set_no_repeats(&mut self, on: bool) {
        self.no_repeats = on;
    }

    /// Sends ECHO; the keyboard answers with ECHO, observable via `read`.
    pub fn echo(&mut self) {
        self.queue_command(&[CMD_ECHO, KEY_IGNORE]);
    }

    /// Requests the two-byte keyboard ID.
    pub fn read_id(&mut self) {
        self.queue_command(&[CMD_READ_ID, KEY_IGNORE, KEY_IGNORE, KEY_IGNORE]);
    }

    /// Requests the active scan code set (response arrives via `read`).
    pub fn get_scancode_set(&mut self) {
        self.queue_command(&[
            CMD_SCANCODE_SET,
            KEY_IGNORE,
            0x00,
            KEY_IGNORE,
            KEY_IGNORE,
        ]);
    }

    /// Configures the typematic rate (0..=31) and delay (0..=3).
    pub fn typematic(&mut self, rate: u8, delay: u8) -> Result<(), InputError> {
        if rate > 31 || delay > 3 {
            return Err(InputError::InvalidTypematic { rate, delay });
        }
        self.queue_command(&[CMD_TYPEMATIC, KEY_IGNORE, (delay << 5) | rate, KEY_IGNORE]);
        Ok(())
    }

    /// Sends the reset command; the keyboard replies ACK then BAT result.
    pub fn reset(&mut self) {
        self.queue_command(&[CMD_RESET, KEY_IGNORE, KEY_IGNORE]);
        self.led_lock = 0;
        self.status = 0;
    }

    /// Frames discarded for bad parity (each one triggered a RESEND).
    pub fn parity_errors(&self) -> u32 {
        self.parity_errors
    }

    /// Bit-counter resynchronizations (watchdog or bad start bit).
    pub fn resyncs(&self) -> u32 {
        self.resyncs
    }

    /// Bytes dropped because the raw ring was full.
    pub fn dropped_bytes(&self) -> u32 {
        self.dropped_raw
    }
}
