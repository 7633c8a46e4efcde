//! Odometer behavior of the rotor bank, including the middle rotor's
//! double-step anomaly.

use enigma_cipher::Enigma;
use std::collections::HashSet;

fn machine_at(offsets: [u8; 3]) -> Enigma {
    Enigma::new([3, 2, 1], 1, offsets).unwrap()
}

#[test]
fn fast_rotor_advances_every_keystroke() {
    let mut machine = machine_at([0, 0, 0]);
    for i in 1..=60u32 {
        machine.encrypt('A');
        assert_eq!(u32::from(machine.rotor_offset(0)), i % 26);
    }
}

#[test]
fn middle_rotor_advances_at_the_fast_turnover() {
    // Rotor III (fast slot) turns over crossing V -> W; the latched flag
    // propagates within the same keystroke.
    let mut machine = machine_at([b'V' - b'A', 0, 0]);
    machine.encrypt('A');
    assert_eq!(machine.rotor_offset(0), b'W' - b'A');
    assert_eq!(machine.rotor_offset(1), 1);
    // One keystroke later the flag is spent.
    machine.encrypt('A');
    assert_eq!(machine.rotor_offset(1), 1);
}

#[test]
fn double_step_advances_middle_and_slow_together() {
    // Rotor II (middle slot) notches at E; its turnover F then steps the
    // slow rotor in the same keystroke.
    let mut machine = machine_at([0, b'E' - b'A', 0]);
    let slow_before = machine.rotor_offset(2);
    machine.encrypt('A');
    assert_eq!(machine.rotor_offset(1), b'F' - b'A');
    assert_eq!(machine.rotor_offset(2), slow_before + 1);
}

#[test]
fn middle_rotor_rate_is_at_least_once_per_26() {
    let mut machine = machine_at([0, 0, 0]);
    let mut previous = machine.rotor_offset(1);
    let mut stale = 0u32;
    for _ in 0..26 * 26 {
        machine.encrypt('A');
        if machine.rotor_offset(1) == previous {
            stale += 1;
            assert!(stale < 26, "middle rotor stuck for a full revolution");
        } else {
            stale = 0;
            previous = machine.rotor_offset(1);
        }
    }
}

#[test]
fn slow_rotor_moves_within_the_double_step_period() {
    let mut machine = machine_at([0, 0, 0]);
    let start = machine.rotor_offset(2);
    let mut moved_at = None;
    for i in 1..=26 * 26 {
        machine.encrypt('A');
        if machine.rotor_offset(2) != start {
            moved_at = Some(i);
            break;
        }
    }
    // The double-step shortens the slow rotor's period below a full 26*26.
    let moved_at = moved_at.expect("slow rotor never moved");
    assert!(moved_at <= 26 * 25);
}

#[test]
fn full_period_visits_distinct_states() {
    // The classic machine period: 26 * 25 * 26 keystrokes with no repeated
    // offset triple, returning to the starting state at the end.
    let mut machine = machine_at([0, 0, 0]);
    let mut seen = HashSet::new();
    for _ in 0..26 * 25 * 26 {
        machine.encrypt('A');
        assert!(seen.insert(machine.offsets()), "state repeated early");
    }
    machine.encrypt('A');
    assert!(!seen.insert(machine.offsets()));
}

#[test]
fn consecutive_keystrokes_never_share_offsets() {
    let mut machine = machine_at([7, 19, 3]);
    let mut previous = machine.offsets();
    for _ in 0..1000 {
        machine.encrypt('A');
        assert_ne!(machine.offsets(), previous);
        previous = machine.offsets();
    }
}
