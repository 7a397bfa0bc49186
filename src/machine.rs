//! This module defines the `EnigmaMachine` struct, which simulates a three-rotor
//! Enigma. It handles rotor stepping (including the double step of the middle rotor)
//! and the signal path through plugboard, rotors and reflector.

use tracing::{debug, trace};

use crate::analyzer::analyze;
use crate::catalog::Catalog;
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::types::{index_letter, letter_index, EnigmaError, MachineConfig, ROTOR_COUNT};

const LEFT: usize = 0;
const MIDDLE: usize = 1;
const RIGHT: usize = 2;

/// Represents a three-rotor Enigma machine.
///
/// Encryption and decryption are the same operation: a machine built from the same
/// `MachineConfig` turns the ciphertext back into the plaintext. The rotors advance
/// with every letter, so each direction of a conversation needs its own machine (or a
/// [`reset`](EnigmaMachine::reset) in between).
#[derive(Debug, Clone)]
pub struct EnigmaMachine {
    rotors: [Rotor; ROTOR_COUNT],
    reflector: Reflector,
    plugboard: Plugboard,
    config: MachineConfig,
    step_count: usize,
}

impl EnigmaMachine {
    /// Creates a new `EnigmaMachine` from a given `MachineConfig`.
    ///
    /// The configuration is analyzed first; no machine is returned unless every rotor,
    /// setting and plugboard pair is valid.
    ///
    /// # Returns
    ///
    /// * `Ok(EnigmaMachine)` ready to process text.
    /// * `Err(EnigmaError::ValidationError)` if the configuration is invalid.
    pub fn new(config: MachineConfig) -> Result<Self, EnigmaError> {
        analyze(&config)?;

        let rotor = |slot: usize| -> Result<Rotor, EnigmaError> {
            let spec = Catalog::rotor(&config.rotors[slot])?;
            Ok(Rotor::new(
                spec,
                config.positions[slot],
                config.rings[slot],
                config.contacts,
            ))
        };
        let rotors = [rotor(LEFT)?, rotor(MIDDLE)?, rotor(RIGHT)?];

        let reflector = Reflector::new(Catalog::reflector(&config.reflector)?);
        let plugboard = Plugboard::new(&config.plugboard)?;

        debug!(
            rotors = ?rotors.iter().map(Rotor::name).collect::<Vec<_>>(),
            reflector = reflector.name(),
            plugs = plugboard.pairs().len(),
            contacts = ?config.contacts,
            "machine configured"
        );

        Ok(Self {
            rotors,
            reflector,
            plugboard,
            config,
            step_count: 0,
        })
    }

    /// Encrypts (or decrypts) `text`.
    ///
    /// ASCII letters are folded to uppercase and enciphered one by one, stepping the
    /// rotors before each. Every other character is copied through unchanged and does
    /// not move the rotors.
    pub fn process(&mut self, text: &str) -> String {
        text.chars()
            .map(|c| {
                letter_index(c.to_ascii_uppercase())
                    .map(|index| index_letter(self.press(index)))
                    .unwrap_or(c)
            })
            .collect()
    }

    /// Steps the rotors and sends one letter index through the machine.
    fn press(&mut self, index: usize) -> usize {
        self.step();
        self.step_count += 1;
        self.encode(index)
    }

    /// Advances the rotors for one keypress.
    ///
    /// Notch states are read before anything moves. A middle rotor sitting on its notch
    /// carries the left rotor and steps itself as well, which is what makes it advance
    /// on two consecutive keypresses.
    pub fn step(&mut self) {
        let right_at_notch = self.rotors[RIGHT].is_at_notch();
        let middle_at_notch = self.rotors[MIDDLE].is_at_notch();

        if middle_at_notch {
            self.rotors[LEFT].step();
            self.rotors[MIDDLE].step();
        } else if right_at_notch {
            self.rotors[MIDDLE].step();
        }

        self.rotors[RIGHT].step();

        trace!(positions = %self.position_letters(), "rotors stepped");
    }

    /// Runs `index` through the signal path at the current rotor positions.
    fn encode(&self, index: usize) -> usize {
        let mut c = self.plugboard.swap(index);

        for rotor in self.rotors.iter().rev() {
            c = rotor.forward(c);
        }

        c = self.reflector.apply(c);

        for rotor in self.rotors.iter() {
            c = rotor.backward(c);
        }

        self.plugboard.swap(c)
    }

    /// Returns the rotor positions, left to right.
    pub fn positions(&self) -> [usize; ROTOR_COUNT] {
        self.rotors.each_ref().map(Rotor::position)
    }

    /// Returns the rotor positions as the letters shown in the machine's windows.
    pub fn position_letters(&self) -> String {
        self.rotors
            .iter()
            .map(|rotor| index_letter(rotor.position()))
            .collect()
    }

    pub fn rotors(&self) -> &[Rotor; ROTOR_COUNT] {
        &self.rotors
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// Returns the configuration the machine was built from.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Returns the number of letters processed since construction or the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the rotors to their starting positions.
    pub fn reset(&mut self) {
        for (rotor, &position) in self.rotors.iter_mut().zip(&self.config.positions) {
            rotor.set_position(position);
        }
        self.step_count = 0;
    }
}
