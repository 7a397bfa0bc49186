//! This module provides functions for analyzing machine configurations to detect
//! impossible settings before a machine is built. This includes checks for the number
//! of rotors, catalog references, setting ranges and plugboard consistency.

use crate::catalog::Catalog;
use crate::plugboard::Plugboard;
use crate::types::{EnigmaError, MachineConfig, LETTER_COUNT, ROTOR_COUNT};
use thiserror::Error;

/// Represents the problems that can be found in a `MachineConfig`.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum AnalysisError {
    /// A per-rotor list (rotors, positions or rings) does not have one entry per rotor.
    #[error("Expected 3 {field}, found {found}")]
    WrongCount { field: &'static str, found: usize },
    /// The rotor reference does not exist in the catalog.
    #[error("Unknown rotor: {0}")]
    UnknownRotor(String),
    /// The reflector name does not exist in the catalog.
    #[error("Unknown reflector: {0}")]
    UnknownReflector(String),
    /// A starting position or ring setting lies outside 0-25.
    #[error("{setting} {value} of rotor {rotor} is outside 0-25")]
    OutOfRange {
        setting: &'static str,
        rotor: usize,
        value: usize,
    },
    /// A plugboard pair contains something other than a letter.
    #[error("Plugboard accepts letters only, found {0:?}")]
    InvalidPlug(char),
    /// A plugboard pair connects a letter to itself.
    #[error("Plugboard cannot pair {0} with itself")]
    SelfPlug(char),
    /// A letter appears in more than one plugboard pair.
    #[error("Plugboard letter {0} is used more than once")]
    PlugConflict(char),
}

/// Analyzes a `MachineConfig` for every condition that would make the machine unusable.
///
/// Each check runs in turn and the first failure is reported.
///
/// # Returns
///
/// * `Ok(())` if the configuration describes a valid machine.
/// * `Err(EnigmaError::ValidationError)` naming the first problem found.
pub fn analyze(config: &MachineConfig) -> Result<(), EnigmaError> {
    let errors = [
        check_structure,
        check_rotors,
        check_reflector,
        check_settings,
        check_plugboard,
    ]
    .iter()
    .filter_map(|f| f(config).err())
    .collect::<Vec<_>>();

    match errors.into_iter().next() {
        Some(first_error) => Err(first_error.into()),
        None => Ok(()),
    }
}

/// Checks that rotors, positions and rings each have one entry per rotor slot.
fn check_structure(config: &MachineConfig) -> Result<(), AnalysisError> {
    let fields = [
        ("rotors", config.rotors.len()),
        ("positions", config.positions.len()),
        ("rings", config.rings.len()),
    ];

    for (field, found) in fields {
        if found != ROTOR_COUNT {
            return Err(AnalysisError::WrongCount { field, found });
        }
    }

    Ok(())
}

fn check_rotors(config: &MachineConfig) -> Result<(), AnalysisError> {
    for reference in &config.rotors {
        Catalog::rotor(reference)?;
    }

    Ok(())
}

fn check_reflector(config: &MachineConfig) -> Result<(), AnalysisError> {
    Catalog::reflector(&config.reflector).map(|_| ())
}

/// Checks that every starting position and ring setting is a valid offset.
fn check_settings(config: &MachineConfig) -> Result<(), AnalysisError> {
    let settings = [("Position", &config.positions), ("Ring setting", &config.rings)];

    for (setting, values) in settings {
        for (rotor, &value) in values.iter().enumerate() {
            if value >= LETTER_COUNT {
                return Err(AnalysisError::OutOfRange {
                    setting,
                    rotor,
                    value,
                });
            }
        }
    }

    Ok(())
}

fn check_plugboard(config: &MachineConfig) -> Result<(), AnalysisError> {
    Plugboard::new(&config.plugboard).map(|_| ())
}
