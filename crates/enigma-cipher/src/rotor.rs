use crate::CipherError;

pub(crate) const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Historical rotor wirings I..VIII. Index `i` of a wiring is the letter that
/// an `A`-input maps to at offset 0 when the input index is `i`.
const ROTOR_WIRINGS: [&[u8; 26]; 8] = [
    b"EKMFLGDQVZNTOWYHXUSPAIBRCJ", // I
    b"AJDKSIRUXBLHWTMCQGZNPYFVOE", // II
    b"BDFHJLCPRTXVZNYEIWGAKMUSQO", // III
    b"ESOVPZJAYQUIRHXLNFTGKDCMWB", // IV
    b"VZBRGITYUPSDNHLXAWMJQOFECK", // V
    b"JPGVOUMFYQBENHZRDKASXLICTW", // VI
    b"NZJHGRCXMYSWBOUFAIVLPEKQDT", // VII
    b"FKQHTLXOCBJSPDZRAMEWNIUYGV", // VIII
];

/// Positions at which the rotor itself double-steps while in the middle slot.
const ROTOR_NOTCHES: [&[u8]; 8] = [b"Q", b"E", b"V", b"J", b"Z", b"ZM", b"ZM", b"ZM"];

/// Positions whose crossing steps the next (slower) rotor.
const ROTOR_TURNOVERS: [&[u8]; 8] = [b"R", b"F", b"W", b"K", b"A", b"AN", b"AN", b"AN"];

fn letter_mask(letters: &[u8]) -> u32 {
    letters
        .iter()
        .fold(0, |mask, &letter| mask | 1 << (letter - b'A'))
}

/// One rotor of the permutation network.
///
/// The wiring is precomputed into forward/reverse index tables at selection
/// time so the per-keystroke path is plain array reads.
#[derive(Debug, Clone)]
pub struct Rotor {
    forward: [u8; 26],
    reverse: [u8; 26],
    notch: u32,
    turnover: u32,
    offset: u8,
    step_next: bool,
}

impl Rotor {
    /// Selects rotor `number` (1..=8) at the given initial offset.
    pub fn new(number: u8, offset: u8) -> Result<Self, CipherError> {
        if !(1..=8).contains(&number) {
            return Err(CipherError::InvalidRotorIndex(number));
        }
        if offset >= 26 {
            return Err(CipherError::InvalidOffset(offset));
        }

        let wiring = ROTOR_WIRINGS[usize::from(number) - 1];
        let mut forward = [0u8; 26];
        let mut reverse = [0u8; 26];
        for (input, &letter) in wiring.iter().enumerate() {
            let output = letter - b'A';
            forward[input] = output;
            reverse[usize::from(output)] = input as u8;
        }

        Ok(Self {
            forward,
            reverse,
            notch: letter_mask(ROTOR_NOTCHES[usize::from(number) - 1]),
            turnover: letter_mask(ROTOR_TURNOVERS[usize::from(number) - 1]),
            offset,
            step_next: false,
        })
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Whether the rotor currently rests on one of its notch positions.
    pub fn at_notch(&self) -> bool {
        self.notch & (1 << self.offset) != 0
    }

    /// Advances the rotor one position, latching the turnover flag when the
    /// new position crossed a turnover.
    pub fn cycle(&mut self) {
        self.offset = (self.offset + 1) % 26;
        if self.turnover & (1 << self.offset) != 0 {
            self.step_next = true;
        }
    }

    /// Consumes the pending turnover flag.
    pub fn take_step_flag(&mut self) -> bool {
        std::mem::take(&mut self.step_next)
    }

    /// Cipher-side entry, alpha-side exit.
    pub fn pass_forward(&self, index: u8) -> u8 {
        let contact = (index + self.offset) % 26;
        (self.forward[usize::from(contact)] + 26 - self.offset) % 26
    }

    /// Alpha-side entry, cipher-side exit.
    pub fn pass_reverse(&self, index: u8) -> u8 {
        let contact = (index + self.offset) % 26;
        (self.reverse[usize::from(contact)] + 26 - self.offset) % 26
    }
}
