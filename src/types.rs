//! This module defines the core data structures and types shared by the rotor machine,
//! including the alphabet mapping, machine configuration and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::analyzer::AnalysisError;
use crate::Rule;

/// The ordered alphabet every rotor, reflector and plugboard operates on.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Number of letters (and contacts per rotor).
pub const LETTER_COUNT: usize = 26;
/// Number of rotors a machine holds, ordered left, middle, right.
pub const ROTOR_COUNT: usize = 3;
/// Reflector used when a configuration does not name one.
pub const DEFAULT_REFLECTOR: &str = "B";

/// Maps an uppercase ASCII letter to its index 0-25.
pub fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_uppercase() {
        Some((c as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Maps an index 0-25 back to its uppercase letter.
pub fn index_letter(index: usize) -> char {
    (b'A' + (index % LETTER_COUNT) as u8) as char
}

/// Selects a rotor type from the catalog, either by position in the catalog or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RotorRef {
    /// Catalog index, `0` being rotor I.
    Index(usize),
    /// Catalog name such as `"IV"`. Matched case-insensitively.
    Name(String),
}

impl From<usize> for RotorRef {
    fn from(index: usize) -> Self {
        RotorRef::Index(index)
    }
}

impl From<&str> for RotorRef {
    fn from(name: &str) -> Self {
        RotorRef::Name(name.to_string())
    }
}

impl FromStr for RotorRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => RotorRef::Index(index),
            Err(_) => RotorRef::Name(s.trim().to_string()),
        })
    }
}

impl fmt::Display for RotorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotorRef::Index(index) => write!(f, "#{index}"),
            RotorRef::Name(name) => write!(f, "{name}"),
        }
    }
}

/// How a rotor's output contact relates to its rotational offset.
///
/// - `Entry` (default): the offset is applied on the way into the wiring only.
/// - `EntryExit`: the offset is applied on entry and removed again on exit, as on the
///   wartime machines. Use this to read historical traffic.
///
/// Both models make `backward` the exact inverse of `forward`, so every machine stays
/// self-reciprocal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactMode {
    #[default]
    Entry,
    EntryExit,
}

impl FromStr for ContactMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" => Ok(ContactMode::Entry),
            "entry-exit" => Ok(ContactMode::EntryExit),
            other => Err(format!("Unsupported contact mode: {other}")),
        }
    }
}

/// Everything needed to construct an `EnigmaMachine`.
///
/// Rotors, positions and rings are listed left to right. Values are checked by
/// [`crate::analyze`] when a machine is built, not when the config is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub rotors: Vec<RotorRef>,
    #[serde(default = "default_settings")]
    pub positions: Vec<usize>,
    #[serde(default = "default_settings")]
    pub rings: Vec<usize>,
    #[serde(default)]
    pub plugboard: Vec<(char, char)>,
    #[serde(default = "default_reflector")]
    pub reflector: String,
    #[serde(default)]
    pub contacts: ContactMode,
}

fn default_settings() -> Vec<usize> {
    vec![0; ROTOR_COUNT]
}

fn default_reflector() -> String {
    DEFAULT_REFLECTOR.to_string()
}

impl MachineConfig {
    /// Builds a configuration from catalog indices, the way the machine is usually
    /// described: rotors, starting positions, ring settings and plugboard pairs.
    pub fn new(
        rotors: [usize; ROTOR_COUNT],
        positions: [usize; ROTOR_COUNT],
        rings: [usize; ROTOR_COUNT],
        plugboard: &[(char, char)],
    ) -> Self {
        Self {
            rotors: rotors.iter().map(|&r| RotorRef::Index(r)).collect(),
            positions: positions.to_vec(),
            rings: rings.to_vec(),
            plugboard: plugboard.to_vec(),
            reflector: default_reflector(),
            contacts: ContactMode::default(),
        }
    }

    /// Replaces the reflector by catalog name.
    pub fn with_reflector(mut self, name: &str) -> Self {
        self.reflector = name.to_string();
        self
    }

    /// Replaces the rotor contact model.
    pub fn with_contacts(mut self, contacts: ContactMode) -> Self {
        self.contacts = contacts;
        self
    }

    /// Decodes a configuration from JSON. Omitted fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, EnigmaError> {
        serde_json::from_str(json).map_err(|e| EnigmaError::ConfigError(e.to_string()))
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::new([0, 1, 2], [0; ROTOR_COUNT], [0; ROTOR_COUNT], &[])
    }
}

/// Represents the errors that can occur while configuring a machine.
///
/// Processing text never fails once a machine exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnigmaError {
    /// The key sheet or a settings line does not follow the grammar.
    #[error("Configuration parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// The configuration parsed but describes an impossible machine.
    #[error("Configuration validation error: {0}")]
    ValidationError(#[from] AnalysisError),
    /// The configuration could not be decoded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
