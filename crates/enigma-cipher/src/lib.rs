//! Rotor/reflector/plugboard permutation core of the Enigma simulator.
//!
//! The engine is pure state: no I/O, no clocks. Each call to
//! [`Enigma::encrypt`] first advances the rotor bank (including the middle
//! rotor's double-step), then routes the letter through plugboard, rotors,
//! reflector and back. For a frozen rotor state the whole map is an
//! involution with no fixed points, which is what makes decryption the same
//! operation as encryption.
#![forbid(unsafe_code)]

mod plugboard;
mod rotor;

pub use plugboard::Plugboard;
pub use rotor::Rotor;

use rotor::ALPHABET;
use thiserror::Error;

/// Reflector wirings A..C.
const REFLECTORS: [&[u8; 26]; 3] = [
    b"EJMZALYXVBWFCRQUONTSPIKHGD", // A
    b"YRUHQSLDPXNGOKMIEBFZCWVJAT", // B
    b"FVPJIAOYEDRZXWGCTKUQSBNMHL", // C
];

/// Configuration errors reported at the API boundary. None of them mutate
/// engine state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    #[error("rotor index {0} out of range 1..=8")]
    InvalidRotorIndex(u8),
    #[error("rotor offset {0} out of range 0..=25")]
    InvalidOffset(u8),
    #[error("reflector index {0} out of range 0..=2")]
    InvalidReflector(u8),
    #[error("plugboard mapping is not an involution")]
    InvalidPlugboard,
}

/// The assembled machine: three rotors in fast-to-slow order, a reflector
/// and a plugboard.
#[derive(Debug, Clone)]
pub struct Enigma {
    rotors: [Rotor; 3],
    reflector: [u8; 26],
    plugboard: Plugboard,
}

impl Enigma {
    /// Assembles a machine from rotor numbers (1..=8, fast to slow), a
    /// reflector index (0..=2) and initial offsets.
    pub fn new(
        rotor_choice: [u8; 3],
        reflector_choice: u8,
        offsets: [u8; 3],
    ) -> Result<Self, CipherError> {
        let wiring = REFLECTORS
            .get(usize::from(reflector_choice))
            .ok_or(CipherError::InvalidReflector(reflector_choice))?;
        let mut reflector = [0u8; 26];
        for (slot, &letter) in reflector.iter_mut().zip(wiring.iter()) {
            *slot = letter - b'A';
        }

        Ok(Self {
            rotors: [
                Rotor::new(rotor_choice[0], offsets[0])?,
                Rotor::new(rotor_choice[1], offsets[1])?,
                Rotor::new(rotor_choice[2], offsets[2])?,
            ],
            reflector,
            plugboard: Plugboard::identity(),
        })
    }

    /// Installs a plugboard. `Plugboard` construction is where involution
    /// validation happens, so installation itself cannot fail.
    pub fn set_plugboard(&mut self, plugboard: Plugboard) {
        self.plugboard = plugboard;
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// Current offset of rotor `rotor` (0 = fast, 2 = slow).
    pub fn rotor_offset(&self, rotor: usize) -> u8 {
        self.rotors[rotor].offset()
    }

    pub fn offsets(&self) -> [u8; 3] {
        [
            self.rotors[0].offset(),
            self.rotors[1].offset(),
            self.rotors[2].offset(),
        ]
    }

    /// Advances the rotor bank one keystroke.
    ///
    /// The middle rotor's double-step keys off its own pre-step offset;
    /// turnover flags latched by any cycle propagate afterwards, so the
    /// middle and slow rotor can advance on the same keystroke.
    fn step(&mut self) {
        self.rotors[0].cycle();
        if self.rotors[1].at_notch() {
            self.rotors[1].cycle();
        }
        for i in 0..2 {
            if self.rotors[i].take_step_flag() {
                self.rotors[i + 1].cycle();
            }
        }
    }

    /// Encrypts one letter, stepping the rotors first.
    ///
    /// Lowercase input is folded to uppercase. Non-letters are returned
    /// unchanged without stepping; filtering them is the caller's job and
    /// this behavior is not part of the contract.
    pub fn encrypt(&mut self, c: char) -> char {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return c;
        }

        self.step();

        let mut x = self.plugboard.map_index(c as u8 - b'A');
        for rotor in &self.rotors {
            x = rotor.pass_forward(x);
        }
        x = self.reflector[usize::from(x)];
        for rotor in self.rotors.iter().rev() {
            x = rotor.pass_reverse(x);
        }
        self.plugboard.map_char(ALPHABET[usize::from(x)] as char)
    }

    /// Encrypts a whole message, skipping nothing: the caller is expected
    /// to have filtered non-letters already.
    pub fn encrypt_str(&mut self, text: &str) -> String {
        text.chars().map(|c| self.encrypt(c)).collect()
    }
}
