//! This crate provides the core logic for an Enigma rotor cipher machine.
//! It includes the catalog of historical rotor and reflector wirings, the rotor stepping
//! and signal path of a three-rotor machine, configuration analysis, and a parser for
//! textual key sheets.
//!
//! ```
//! use enigma::{EnigmaMachine, MachineConfig};
//!
//! let config = MachineConfig::new([0, 1, 2], [0, 0, 0], [0, 0, 0], &[]);
//!
//! let mut sender = EnigmaMachine::new(config.clone()).unwrap();
//! let mut receiver = EnigmaMachine::new(config).unwrap();
//!
//! let ciphertext = sender.process("HELLO");
//! assert_eq!(ciphertext, "VNACA");
//! assert_eq!(receiver.process(&ciphertext), "HELLO");
//! ```

pub mod analyzer;
pub mod catalog;
pub mod machine;
pub mod parser;
pub mod plugboard;
pub mod reflector;
pub mod rotor;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the rotor and reflector catalog.
pub use catalog::Catalog;
/// Re-exports the `EnigmaMachine` struct from the machine module.
pub use machine::EnigmaMachine;
/// Re-exports the key-sheet and settings-line parsers.
pub use parser::{parse, parse_plugboard, parse_rotors, parse_settings};
pub use plugboard::Plugboard;
pub use reflector::Reflector;
pub use rotor::Rotor;
/// Re-exports configuration and error types from the types module.
pub use types::{ContactMode, EnigmaError, MachineConfig, RotorRef, ALPHABET};
