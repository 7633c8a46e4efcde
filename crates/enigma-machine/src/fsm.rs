use std::rc::Rc;

use tracing::debug;

use enigma_cipher::{CipherError, Enigma, Plugboard};
use enigma_devices_input::ps2::keycode::EVENT_BREAK;
use enigma_devices_input::{DebouncedButton, PlugboardScanner, Ps2Keyboard, RotaryEncoder};
use enigma_platform::{Clock, PinHandle};

use crate::{DisplaySink, MachineConfig};

const ENCRYPT_PROMPT: &str = "PRESS A KEY ";
const PLUGBOARD_PROMPT: &str = "PLUG ";
/// Idle animation repetitions between prompt replays.
const WAIT_ANIM_CYCLES: u8 = 3;

/// Externally observable mode of the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    ConfigPlugboard,
    /// Carries the rotor currently being configured (0 = fast).
    ConfigRotor(u8),
}

#[derive(Debug, Clone, Copy)]
struct EncryptUi {
    /// A keystroke was accepted; the idle prompt loop stops.
    key_seen: bool,
    /// Encrypted character waiting for the loading animation to finish.
    pending: Option<char>,
    prompt_done: bool,
    wait_cycles_left: u8,
}

#[derive(Debug, Clone, Copy)]
struct PlugboardUi {
    next_scan_ms: u32,
}

#[derive(Debug, Clone, Copy)]
struct RotorUi {
    index: u8,
    intro_deadline_ms: u32,
    intro_done: bool,
}

/// Per-mode step data; the variant owns its local UI state.
#[derive(Debug, Clone, Copy)]
enum ModeState {
    Encrypt(EncryptUi),
    ConfigPlugboard(PlugboardUi),
    ConfigRotor(RotorUi),
}

/// The cooperative supervisor: call [`Machine::poll`] from the foreground
/// loop and deliver PS/2 clock edges to [`Machine::keyboard`].
pub struct Machine {
    config: MachineConfig,
    cipher: Enigma,
    keyboard: Ps2Keyboard,
    scanner: PlugboardScanner,
    encoder: RotaryEncoder,
    button: DebouncedButton,
    display: Box<dyn DisplaySink>,
    clock: Rc<dyn Clock>,

    state: ModeState,
    rotor_positions: [u8; 3],
    plugboard: Plugboard,
    last_output: Option<char>,
    loading_done: bool,
    next_button_sample_ms: u32,
}

impl Machine {
    /// Builds the session. Fails only on an invalid rotor/reflector
    /// selection in `config`; the same selection is reused for every
    /// engine re-initialization afterwards.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: MachineConfig,
        keyboard: Ps2Keyboard,
        scanner: PlugboardScanner,
        encoder: RotaryEncoder,
        button_pin: PinHandle,
        display: Box<dyn DisplaySink>,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, CipherError> {
        let cipher = Enigma::new(config.rotors, config.reflector, [0, 0, 0])?;
        let press_ticks = (config.button.press_ms / config.button.sample_ms).max(1) as u16;
        let release_ticks = (config.button.release_ms / config.button.sample_ms).max(1) as u16;
        let button = DebouncedButton::new(button_pin, true, press_ticks, release_ticks);

        let mut machine = Self {
            config,
            cipher,
            keyboard,
            scanner,
            encoder,
            button,
            display,
            clock,
            state: ModeState::Encrypt(EncryptUi {
                key_seen: false,
                pending: None,
                prompt_done: false,
                wait_cycles_left: WAIT_ANIM_CYCLES,
            }),
            rotor_positions: [0; 3],
            plugboard: Plugboard::identity(),
            last_output: None,
            loading_done: true,
            next_button_sample_ms: 0,
        };
        machine.state = machine.enter_encrypt();
        Ok(machine)
    }

    pub fn mode(&self) -> Mode {
        match self.state {
            ModeState::Encrypt(_) => Mode::Encrypt,
            ModeState::ConfigPlugboard(_) => Mode::ConfigPlugboard,
            ModeState::ConfigRotor(ui) => Mode::ConfigRotor(ui.index),
        }
    }

    pub fn rotor_positions(&self) -> [u8; 3] {
        self.rotor_positions
    }

    /// Plugboard as of the last scan.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    pub fn last_output(&self) -> Option<char> {
        self.last_output
    }

    /// The PS/2 driver, exposed so the platform layer can route clock-edge
    /// interrupts to it.
    pub fn keyboard(&mut self) -> &mut Ps2Keyboard {
        &mut self.keyboard
    }

    /// One iteration of the foreground loop.
    pub fn poll(&mut self) {
        let now = self.clock.now_ms();
        if now >= self.next_button_sample_ms {
            self.next_button_sample_ms = now + self.config.button.sample_ms;
            let (changed, pressed) = self.button.poll();
            if changed && !pressed {
                self.advance_mode();
            }
        }

        // Mode changes and keystrokes run the loading animation to
        // completion before the mode behavior resumes.
        if !self.loading_done {
            self.loading_done = self.display.loading(false);
            return;
        }

        self.state = match self.state {
            ModeState::Encrypt(ui) => self.run_encrypt(ui),
            ModeState::ConfigPlugboard(ui) => self.run_config_plugboard(ui),
            ModeState::ConfigRotor(ui) => self.run_config_rotor(ui),
        };
    }

    /// One debounced press-and-release of the mode button. The rotor
    /// sub-progression advances before the mode tag does.
    fn advance_mode(&mut self) {
        self.display.loading(true);
        self.loading_done = false;

        self.state = match self.state {
            ModeState::Encrypt(_) => {
                // No key event may cross the mode boundary.
                self.keyboard.disable_irq();
                self.enter_config_plugboard()
            }
            ModeState::ConfigPlugboard(_) => self.enter_config_rotor(0),
            ModeState::ConfigRotor(ui) if ui.index < 2 => self.enter_config_rotor(ui.index + 1),
            ModeState::ConfigRotor(_) => self.enter_encrypt(),
        };
    }

    fn enter_encrypt(&mut self) -> ModeState {
        debug!("encryption mode");
        self.cipher = Enigma::new(self.config.rotors, self.config.reflector, self.rotor_positions)
            .expect("selection validated at construction");
        self.cipher.set_plugboard(self.plugboard.clone());
        self.keyboard.enable_irq();
        self.last_output = None;
        self.display.wait_input(true);
        let prompt_done = self.display.shift_text(ENCRYPT_PROMPT, true);
        ModeState::Encrypt(EncryptUi {
            key_seen: false,
            pending: None,
            prompt_done,
            wait_cycles_left: WAIT_ANIM_CYCLES,
        })
    }

    fn enter_config_plugboard(&mut self) -> ModeState {
        debug!("configuring plugboard");
        self.display.shift_text(PLUGBOARD_PROMPT, true);
        ModeState::ConfigPlugboard(PlugboardUi {
            next_scan_ms: self.clock.now_ms() + self.config.plugboard_scan_ms,
        })
    }

    fn enter_config_rotor(&mut self, index: u8) -> ModeState {
        debug!(rotor = index + 1, "configuring rotor");
        self.rotor_positions[usize::from(index)] = self.cipher.rotor_offset(usize::from(index));
        ModeState::ConfigRotor(RotorUi {
            index,
            intro_deadline_ms: self.clock.now_ms() + self.config.rotor_intro_ms,
            intro_done: false,
        })
    }

    fn run_encrypt(&mut self, mut ui: EncryptUi) -> ModeState {
        if self.keyboard.available() > 0 {
            let event = self.keyboard.read();
            let code = (event & 0xFF) as u8;
            if event & EVENT_BREAK == 0 && code.is_ascii_uppercase() {
                ui.key_seen = true;
                self.display.loading(true);
                self.loading_done = false;
                let output = self.cipher.encrypt(code as char);
                debug!(input = %(code as char), output = %output, "encrypted keystroke");
                self.last_output = Some(output);
                ui.pending = Some(output);
            }
        }

        if !ui.key_seen {
            // Idle loop: scroll the prompt once, run the wait animation a
            // few times, then repeat.
            if !ui.prompt_done {
                ui.prompt_done = self.display.shift_text(ENCRYPT_PROMPT, false);
            } else if self.display.wait_input(false) {
                ui.wait_cycles_left -= 1;
                if ui.wait_cycles_left == 0 {
                    ui.wait_cycles_left = WAIT_ANIM_CYCLES;
                    self.display.wait_input(true);
                    ui.prompt_done = false;
                }
            }
        } else if let Some(c) = ui.pending {
            if self.loading_done {
                ui.pending = None;
                self.display.draw_char(c);
            }
        }

        ModeState::Encrypt(ui)
    }

    fn run_config_plugboard(&mut self, mut ui: PlugboardUi) -> ModeState {
        let now = self.clock.now_ms();
        if now >= ui.next_scan_ms {
            ui.next_scan_ms = now + self.config.plugboard_scan_ms;
            self.plugboard = self.scanner.scan();
            debug!(
                mapping = %String::from_utf8_lossy(&self.plugboard.letters()),
                "plugboard scanned"
            );
        }
        self.display.shift_text(PLUGBOARD_PROMPT, false);
        ModeState::ConfigPlugboard(ui)
    }

    fn run_config_rotor(&mut self, mut ui: RotorUi) -> ModeState {
        let slot = usize::from(ui.index);
        if !ui.intro_done {
            if self.clock.now_ms() < ui.intro_deadline_ms {
                self.display.draw_roman(ui.index + 1);
                return ModeState::ConfigRotor(ui);
            }
            ui.intro_done = true;
            self.display.draw_number(self.rotor_positions[slot] + 1);
        }

        let delta = self.encoder.read();
        if delta != 0 {
            let position = i16::from(self.rotor_positions[slot]) + i16::from(delta);
            if (0..=25).contains(&position) {
                self.rotor_positions[slot] = position as u8;
                self.display.draw_number(position as u8 + 1);
            }
        }
        ModeState::ConfigRotor(ui)
    }
}
