//! This module defines the `Rotor` struct: a catalog wiring plus the per-machine
//! rotational state that shifts it.

use crate::catalog::RotorSpec;
use crate::types::{ContactMode, LETTER_COUNT};

/// A single rotor mounted in a machine.
///
/// The wiring is shared with every other rotor of the same type; only `position`
/// changes while a message is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    spec: &'static RotorSpec,
    position: usize,
    ring_setting: usize,
    contacts: ContactMode,
}

impl Rotor {
    /// Mounts a rotor at the given starting position and ring setting.
    ///
    /// Both values are reduced modulo 26; callers that need to reject out-of-range
    /// settings do so through [`crate::analyze`].
    pub fn new(
        spec: &'static RotorSpec,
        position: usize,
        ring_setting: usize,
        contacts: ContactMode,
    ) -> Self {
        Self {
            spec,
            position: position % LETTER_COUNT,
            ring_setting: ring_setting % LETTER_COUNT,
            contacts,
        }
    }

    /// Offset between the outer contacts and the wiring core.
    fn offset(&self) -> usize {
        (self.position + LETTER_COUNT - self.ring_setting) % LETTER_COUNT
    }

    /// Encodes `input` on the right-to-left pass, before the reflector.
    pub fn forward(&self, input: usize) -> usize {
        let shifted = (input + self.offset()) % LETTER_COUNT;
        let output = self.spec.wiring[shifted] as usize;

        match self.contacts {
            ContactMode::Entry => output,
            ContactMode::EntryExit => (output + LETTER_COUNT - self.offset()) % LETTER_COUNT,
        }
    }

    /// Encodes `input` on the left-to-right pass, after the reflector.
    ///
    /// Always the inverse of `forward` at the same position: `backward(forward(x)) == x`.
    pub fn backward(&self, input: usize) -> usize {
        let shifted = match self.contacts {
            ContactMode::Entry => input,
            ContactMode::EntryExit => (input + self.offset()) % LETTER_COUNT,
        };
        let output = self.spec.inverse[shifted] as usize;

        (output + LETTER_COUNT - self.offset()) % LETTER_COUNT
    }

    /// Advances the rotor by one position.
    pub fn step(&mut self) {
        self.position = (self.position + 1) % LETTER_COUNT;
    }

    /// Turns the rotor to `position`, reduced modulo 26.
    pub fn set_position(&mut self, position: usize) {
        self.position = position % LETTER_COUNT;
    }

    pub fn is_at_notch(&self) -> bool {
        self.position == self.spec.notch as usize
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn ring_setting(&self) -> usize {
        self.ring_setting
    }

    pub fn notch(&self) -> usize {
        self.spec.notch as usize
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ROTORS;

    fn all_settings() -> impl Iterator<Item = (usize, usize)> {
        (0..LETTER_COUNT).flat_map(|p| (0..LETTER_COUNT).map(move |r| (p, r)))
    }

    #[test]
    fn test_forward_at_rest_follows_wiring() {
        // Rotor I: A -> E, B -> K, Z -> J
        let rotor = Rotor::new(&ROTORS[0], 0, 0, ContactMode::Entry);

        assert_eq!(rotor.forward(0), 4);
        assert_eq!(rotor.forward(1), 10);
        assert_eq!(rotor.forward(25), 9);
        assert_eq!(rotor.backward(4), 0);
    }

    #[test]
    fn test_forward_applies_position_and_ring() {
        // Position 1, ring 0: contact A meets wiring B -> K
        let rotor = Rotor::new(&ROTORS[0], 1, 0, ContactMode::Entry);
        assert_eq!(rotor.forward(0), 10);

        // Position and ring cancel out
        let rotor = Rotor::new(&ROTORS[0], 5, 5, ContactMode::Entry);
        assert_eq!(rotor.forward(0), 4);

        // Historical contacts: position 1 turns A into J (wiring B -> K, minus one)
        let rotor = Rotor::new(&ROTORS[0], 1, 0, ContactMode::EntryExit);
        assert_eq!(rotor.forward(0), 9);
    }

    #[test]
    fn test_backward_inverts_forward() {
        for contacts in [ContactMode::Entry, ContactMode::EntryExit] {
            for spec in ROTORS.iter() {
                for (position, ring) in all_settings() {
                    let rotor = Rotor::new(spec, position, ring, contacts);
                    for x in 0..LETTER_COUNT {
                        assert_eq!(
                            rotor.backward(rotor.forward(x)),
                            x,
                            "rotor {} position {} ring {} {:?}",
                            spec.name,
                            position,
                            ring,
                            contacts
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_step_wraps_around() {
        let mut rotor = Rotor::new(&ROTORS[2], 24, 0, ContactMode::Entry);

        rotor.step();
        assert_eq!(rotor.position(), 25);
        rotor.step();
        assert_eq!(rotor.position(), 0);
    }

    #[test]
    fn test_notch() {
        // Rotor III turns over at V
        let mut rotor = Rotor::new(&ROTORS[2], 20, 7, ContactMode::Entry);

        assert_eq!(rotor.notch(), 21);
        assert!(!rotor.is_at_notch());
        rotor.step();
        assert!(rotor.is_at_notch());
        rotor.step();
        assert!(!rotor.is_at_notch());
        assert_eq!(rotor.ring_setting(), 7);
        assert_eq!(rotor.name(), "III");
    }
}
