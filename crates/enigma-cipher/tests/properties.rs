//! Permutation-network invariants over arbitrary configurations.

use enigma_cipher::{Enigma, Plugboard};
use proptest::prelude::*;

fn config() -> impl Strategy<Value = ([u8; 3], u8, [u8; 3])> {
    (
        [1u8..=8, 1u8..=8, 1u8..=8],
        0u8..=2,
        [0u8..=25, 0u8..=25, 0u8..=25],
    )
}

fn pairs() -> impl Strategy<Value = Vec<(char, char)>> {
    // Disjoint letter pairs drawn from the alphabet.
    (proptest::sample::subsequence((b'A'..=b'Z').collect::<Vec<_>>(), 0..=12)).prop_map(
        |letters| {
            letters
                .chunks_exact(2)
                .map(|pair| (pair[0] as char, pair[1] as char))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn no_letter_encrypts_to_itself((rotors, reflector, offsets) in config(), plugs in pairs()) {
        let mut machine = Enigma::new(rotors, reflector, offsets).unwrap();
        machine.set_plugboard(Plugboard::from_pairs(&plugs).unwrap());
        for c in 'A'..='Z' {
            let mut probe = machine.clone();
            prop_assert_ne!(probe.encrypt(c), c);
        }
    }

    #[test]
    fn frozen_state_is_an_involution((rotors, reflector, offsets) in config(), plugs in pairs(), c in proptest::char::range('A', 'Z')) {
        let mut machine = Enigma::new(rotors, reflector, offsets).unwrap();
        machine.set_plugboard(Plugboard::from_pairs(&plugs).unwrap());
        // The engine steps before substituting, so snapshot the stepped
        // state and run the reverse direction from the same snapshot.
        let out = machine.clone().encrypt(c);
        prop_assert_eq!(machine.encrypt(out), c);
    }

    #[test]
    fn transcripts_round_trip((rotors, reflector, offsets) in config(), text in "[A-Z]{1,40}") {
        let mut encoder = Enigma::new(rotors, reflector, offsets).unwrap();
        let ciphertext = encoder.encrypt_str(&text);
        let mut decoder = Enigma::new(rotors, reflector, offsets).unwrap();
        prop_assert_eq!(decoder.encrypt_str(&ciphertext), text);
    }

    #[test]
    fn scanner_style_plugboards_are_involutions(plugs in pairs()) {
        let board = Plugboard::from_pairs(&plugs).unwrap();
        for i in 0..26 {
            prop_assert_eq!(board.map_index(board.map_index(i)), i);
        }
    }
}
