//! The catalog of historical rotor and reflector wirings.
//!
//! Wiring tables are computed at compile time and live for the whole program; machines
//! borrow them by `&'static` reference instead of copying them.

use crate::analyzer::AnalysisError;
use crate::types::{RotorRef, LETTER_COUNT};
use std::collections::HashMap;

/// Wiring and notch of one rotor type.
#[derive(Debug, PartialEq, Eq)]
pub struct RotorSpec {
    pub name: &'static str,
    /// Forward substitution: contact `i` is wired to `wiring[i]`.
    pub wiring: [u8; LETTER_COUNT],
    /// Inverse of `wiring`, used on the return path.
    pub inverse: [u8; LETTER_COUNT],
    /// Position at which this rotor makes its left neighbour step.
    pub notch: u8,
}

/// Wiring of one reflector type.
#[derive(Debug, PartialEq, Eq)]
pub struct ReflectorSpec {
    pub name: &'static str,
    pub wiring: [u8; LETTER_COUNT],
}

const fn table(letters: &[u8; LETTER_COUNT]) -> [u8; LETTER_COUNT] {
    let mut out = [0u8; LETTER_COUNT];
    let mut i = 0;
    while i < LETTER_COUNT {
        out[i] = letters[i] - b'A';
        i += 1;
    }
    out
}

const fn invert(wiring: &[u8; LETTER_COUNT]) -> [u8; LETTER_COUNT] {
    let mut out = [0u8; LETTER_COUNT];
    let mut i = 0;
    while i < LETTER_COUNT {
        out[wiring[i] as usize] = i as u8;
        i += 1;
    }
    out
}

const fn rotor(name: &'static str, letters: &[u8; LETTER_COUNT], notch: u8) -> RotorSpec {
    let wiring = table(letters);
    RotorSpec {
        name,
        wiring,
        inverse: invert(&wiring),
        notch: notch - b'A',
    }
}

const fn reflector(name: &'static str, letters: &[u8; LETTER_COUNT]) -> ReflectorSpec {
    ReflectorSpec {
        name,
        wiring: table(letters),
    }
}

/// Rotor types in catalog order; a rotor's catalog index is its position here.
pub static ROTORS: [RotorSpec; 5] = [
    rotor("I", b"EKMFLGDQVZNTOWYHXUSPAIBRCJ", b'Q'),
    rotor("II", b"AJDKSIRUXBLHWTMCQGZNPYFVOE", b'E'),
    rotor("III", b"BDFHJLCPRTXVZNYEIWGAKMUSQO", b'V'),
    rotor("IV", b"ESOVPZJAYQUIRHXLNFTGKDCMWB", b'J'),
    rotor("V", b"VZBRGITYUPSDNHLXAWMJQOFECK", b'Z'),
];

pub static REFLECTORS: [ReflectorSpec; 3] = [
    reflector("A", b"EJMZALYXVBWFCRQUONTSPIKHGD"),
    reflector("B", b"YRUHQSLDPXNGOKMIEBFZCWVJAT"),
    reflector("C", b"FVPJIAOYEDRZXWGCTKUQSBNMHL"),
];

lazy_static::lazy_static! {
    static ref ROTOR_NAMES: HashMap<&'static str, &'static RotorSpec> =
        ROTORS.iter().map(|spec| (spec.name, spec)).collect();
    static ref REFLECTOR_NAMES: HashMap<&'static str, &'static ReflectorSpec> =
        REFLECTORS.iter().map(|spec| (spec.name, spec)).collect();
}

pub struct Catalog;

impl Catalog {
    /// Resolves a rotor reference by catalog index or case-insensitive name.
    pub fn rotor(reference: &RotorRef) -> Result<&'static RotorSpec, AnalysisError> {
        let found = match reference {
            RotorRef::Index(index) => ROTORS.get(*index),
            RotorRef::Name(name) => ROTOR_NAMES
                .get(name.trim().to_ascii_uppercase().as_str())
                .copied(),
        };

        found.ok_or_else(|| AnalysisError::UnknownRotor(reference.to_string()))
    }

    /// Resolves a reflector by case-insensitive name.
    pub fn reflector(name: &str) -> Result<&'static ReflectorSpec, AnalysisError> {
        REFLECTOR_NAMES
            .get(name.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| AnalysisError::UnknownReflector(name.to_string()))
    }

    /// Rotor names in catalog order.
    pub fn rotor_names() -> Vec<&'static str> {
        ROTORS.iter().map(|spec| spec.name).collect()
    }

    pub fn reflector_names() -> Vec<&'static str> {
        REFLECTORS.iter().map(|spec| spec.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotor_wirings_are_bijections() {
        for spec in ROTORS.iter() {
            let mut seen = [false; LETTER_COUNT];
            for &out in spec.wiring.iter() {
                assert!(!seen[out as usize], "Rotor {} repeats an output", spec.name);
                seen[out as usize] = true;
            }

            for i in 0..LETTER_COUNT {
                assert_eq!(spec.inverse[spec.wiring[i] as usize] as usize, i);
            }
        }
    }

    #[test]
    fn test_reflectors_are_fixed_point_free_involutions() {
        for spec in REFLECTORS.iter() {
            for i in 0..LETTER_COUNT {
                let out = spec.wiring[i] as usize;
                assert_ne!(out, i, "Reflector {} maps {} to itself", spec.name, i);
                assert_eq!(spec.wiring[out] as usize, i);
            }
        }
    }

    #[test]
    fn test_historical_notches() {
        let notches: String = ROTORS
            .iter()
            .map(|spec| (b'A' + spec.notch) as char)
            .collect();
        assert_eq!(notches, "QEVJZ");
    }

    #[test]
    fn test_rotor_lookup() {
        assert_eq!(Catalog::rotor(&RotorRef::Index(0)).unwrap().name, "I");
        assert_eq!(Catalog::rotor(&RotorRef::Index(4)).unwrap().name, "V");
        assert_eq!(Catalog::rotor(&"iii".into()).unwrap().name, "III");

        assert_eq!(
            Catalog::rotor(&RotorRef::Index(5)),
            Err(AnalysisError::UnknownRotor("#5".into()))
        );
        assert_eq!(
            Catalog::rotor(&"VI".into()),
            Err(AnalysisError::UnknownRotor("VI".into()))
        );
    }

    #[test]
    fn test_reflector_lookup() {
        assert_eq!(Catalog::reflector("b").unwrap().name, "B");
        assert_eq!(
            Catalog::reflector("D"),
            Err(AnalysisError::UnknownReflector("D".into()))
        );
    }

    #[test]
    fn test_catalog_names() {
        assert_eq!(Catalog::rotor_names(), vec!["I", "II", "III", "IV", "V"]);
        assert_eq!(Catalog::reflector_names(), vec!["A", "B", "C"]);
    }
}
