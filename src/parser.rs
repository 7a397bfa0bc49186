//! This module provides the parser for Enigma key sheets, utilizing the `pest` crate.
//! It turns the textual settings of a day (rotor order, positions, rings, plugboard)
//! into a `MachineConfig`, and parses the single-line formats used when prompting.

use crate::{
    analyzer::analyze,
    types::{
        letter_index, ContactMode, EnigmaError, MachineConfig, RotorRef, DEFAULT_REFLECTOR,
        LETTER_COUNT, ROTOR_COUNT,
    },
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the key-sheet grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct KeySheetParser;

/// Parses a key sheet into a validated `MachineConfig`.
///
/// Sections may appear in any order, separated by newlines or `;`. Only `rotors:` is
/// required; positions and rings default to zero, the plugboard to empty and the
/// reflector to B.
///
/// ```text
/// rotors: I II III
/// positions: A D U
/// rings: 0 0 0
/// plugboard: AB CD
/// ```
///
/// # Returns
///
/// * `Ok(MachineConfig)` if the key sheet is well formed and describes a valid machine.
/// * `Err(EnigmaError::ParseError)` if there are syntax errors or repeated sections.
/// * `Err(EnigmaError::ValidationError)` if the configuration fails analysis.
pub fn parse(input: &str) -> Result<MachineConfig, EnigmaError> {
    let root = parse_rule(Rule::key_sheet, input)?;
    let config = parse_key_sheet(root)?;

    analyze(&config)?;

    Ok(config)
}

/// Parses a line of rotor references such as `I II III` or `0 1 2`.
pub fn parse_rotors(input: &str) -> Result<Vec<RotorRef>, EnigmaError> {
    let root = parse_rule(Rule::rotors_line, input)?;
    Ok(parse_rotor_list(first_inner(root)?))
}

/// Parses a line of positions or ring settings such as `0 4 21`, `A E V` or `AEV`.
pub fn parse_settings(input: &str) -> Result<Vec<usize>, EnigmaError> {
    let root = parse_rule(Rule::settings_line, input)?;
    parse_setting_values(first_inner(root)?)
}

/// Parses plugboard pairs such as `AB CD`. An empty line means no plugs.
pub fn parse_plugboard(input: &str) -> Result<Vec<(char, char)>, EnigmaError> {
    let root = parse_rule(Rule::plugboard_line, input)?;
    match root.into_inner().next() {
        Some(pairs) => Ok(parse_pairs(pairs)),
        None => Ok(Vec::new()),
    }
}

/// Runs the pest parser for `rule` and returns its single top-level pair.
fn parse_rule(rule: Rule, input: &str) -> Result<Pair<'_, Rule>, EnigmaError> {
    KeySheetParser::parse(rule, input.trim())
        .map_err(|e| EnigmaError::ParseError(Box::new(e)))?
        .next()
        .ok_or_else(|| EnigmaError::ConfigError(format!("Empty parse for {rule:?}")))
}

fn first_inner(pair: Pair<Rule>) -> Result<Pair<Rule>, EnigmaError> {
    let span = pair.as_span();
    pair.into_inner()
        .next()
        .ok_or_else(|| parse_error("Expected a value", span))
}

/// Parses the top-level sections of a key sheet from a `Pair<Rule::key_sheet>`.
fn parse_key_sheet(pair: Pair<Rule>) -> Result<MachineConfig, EnigmaError> {
    let mut rotors: Option<Vec<RotorRef>> = None;
    let mut positions: Option<Vec<usize>> = None;
    let mut rings: Option<Vec<usize>> = None;
    let mut plugboard: Option<Vec<(char, char)>> = None;
    let mut reflector: Option<String> = None;
    let mut contacts: Option<ContactMode> = None;
    let mut seen = HashSet::new();

    for p in pair.into_inner() {
        let span = p.as_span();
        let rule = p.as_rule();

        check_unique_rule(rule, span, &mut seen)?;

        match rule {
            Rule::rotors => rotors = Some(parse_rotor_list(first_inner(p)?)),
            Rule::positions => positions = Some(parse_setting_values(first_inner(p)?)?),
            Rule::rings => rings = Some(parse_setting_values(first_inner(p)?)?),
            Rule::plugboard => plugboard = Some(parse_pairs(first_inner(p)?)),
            Rule::reflector => reflector = Some(first_inner(p)?.as_str().to_ascii_uppercase()),
            Rule::contacts => contacts = Some(parse_contact_mode(first_inner(p)?)?),
            _ => {} // EOI
        }
    }

    let rotors = rotors.ok_or_else(|| {
        EnigmaError::ConfigError("Missing 'rotors' section".to_string())
    })?;

    Ok(MachineConfig {
        rotors,
        positions: positions.unwrap_or_else(|| vec![0; ROTOR_COUNT]),
        rings: rings.unwrap_or_else(|| vec![0; ROTOR_COUNT]),
        plugboard: plugboard.unwrap_or_default(),
        reflector: reflector.unwrap_or_else(|| DEFAULT_REFLECTOR.to_string()),
        contacts: contacts.unwrap_or_default(),
    })
}

/// Parses rotor references from a `Pair<Rule::rotor_list>`.
fn parse_rotor_list(pair: Pair<Rule>) -> Vec<RotorRef> {
    pair.into_inner()
        .map(|name| match name.as_str().parse::<usize>() {
            Ok(index) => RotorRef::Index(index),
            Err(_) => RotorRef::Name(name.as_str().to_ascii_uppercase()),
        })
        .collect()
}

/// Parses positions or ring settings from a `Pair<Rule::settings>`.
///
/// Letters count from `A` = 0. Numbers are taken as they are; range checks belong to
/// the analyzer so the error names the rotor.
fn parse_setting_values(pair: Pair<Rule>) -> Result<Vec<usize>, EnigmaError> {
    let mut values = Vec::new();

    for setting in pair.into_inner() {
        let span = setting.as_span();
        let text = setting.as_str();

        let value = match setting.as_rule() {
            Rule::number => text
                .parse::<usize>()
                .map_err(|_| parse_error(&format!("Setting {text} is too large"), span))?,
            Rule::letter => text
                .chars()
                .next()
                .and_then(|c| letter_index(c.to_ascii_uppercase()))
                .unwrap_or(LETTER_COUNT),
            _ => continue,
        };

        values.push(value);
    }

    Ok(values)
}

/// Parses letter pairs from a `Pair<Rule::pairs>`. Letters are folded to uppercase.
fn parse_pairs(pair: Pair<Rule>) -> Vec<(char, char)> {
    pair.into_inner()
        .filter_map(|p| {
            let mut letters = p.as_str().chars().map(|c| c.to_ascii_uppercase());
            Some((letters.next()?, letters.next()?))
        })
        .collect()
}

fn parse_contact_mode(pair: Pair<Rule>) -> Result<ContactMode, EnigmaError> {
    let span = pair.as_span();
    pair.as_str()
        .parse::<ContactMode>()
        .map_err(|message| parse_error(&message, span))
}

/// Creates an `EnigmaError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> EnigmaError {
    EnigmaError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Checks if a section has already been declared in this key sheet.
fn check_unique_rule(
    rule: Rule,
    span: Span,
    seen: &mut HashSet<Rule>,
) -> Result<(), EnigmaError> {
    if !matches!(
        rule,
        Rule::rotors
            | Rule::positions
            | Rule::rings
            | Rule::plugboard
            | Rule::reflector
            | Rule::contacts
    ) {
        return Ok(());
    };

    if !seen.insert(rule) {
        return Err(parse_error(
            &format!("Duplicate \"{rule:?}:\" declaration"),
            span,
        ));
    }

    Ok(())
}
