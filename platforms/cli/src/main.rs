mod logging;
mod prompt;

use clap::Parser;
use enigma::catalog::ROTORS;
use enigma::{
    parse, parse_plugboard, parse_rotors, parse_settings, Catalog, ContactMode, EnigmaError,
    EnigmaMachine, MachineConfig,
};
use prompt::StdioPrompt;
use std::error::Error;
use std::io::{self, Read};
use std::process;
use tracing::info;

/// Encrypts or decrypts text with a three-rotor Enigma machine.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  enigma-cli HELLO
  enigma-cli --rotors \"IV II V\" --positions BZQ --plugboard \"AB CD\" \"ATTACK AT DAWN\"
  enigma-cli --key-sheet \"rotors: I II III; positions: A D U\" HELLO
  echo VNACA | enigma-cli")]
struct Cli {
    /// The message to process. Read from stdin when piped, prompted for otherwise
    message: Vec<String>,

    /// Rotor order, left to right, by name or catalog index
    #[clap(short, long, default_value = "I II III")]
    rotors: String,

    /// Starting positions, left to right (numbers 0-25 or letters)
    #[clap(short, long, default_value = "0 0 0")]
    positions: String,

    /// Ring settings, left to right (numbers 0-25 or letters)
    #[clap(short = 'g', long, default_value = "0 0 0")]
    rings: String,

    /// Plugboard pairs such as "AB CD"
    #[clap(short = 'b', long, default_value = "")]
    plugboard: String,

    /// Reflector name
    #[clap(long, default_value = "B")]
    reflector: String,

    /// Remove the rotor offset on the exit contacts, as the wartime machines did
    #[clap(long)]
    exit_contacts: bool,

    /// A full key sheet; replaces the individual setting flags
    #[clap(short, long, conflicts_with = "settings_json")]
    key_sheet: Option<String>,

    /// Machine settings as JSON; replaces the individual setting flags
    #[clap(long)]
    settings_json: Option<String>,

    /// Prompt for the message, positions, ring settings and plugboard
    #[clap(short, long)]
    interactive: bool,

    /// Print the rotor positions after each letter
    #[clap(short = 'd', long)]
    debug: bool,

    /// List the available rotors and reflectors
    #[clap(long)]
    list: bool,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.list {
        print_catalog();
        return Ok(());
    }

    let config = config_from_flags(&cli)?;

    if cli.interactive || (cli.message.is_empty() && atty::is(atty::Stream::Stdin)) {
        let stdin = io::stdin();
        let mut prompt = StdioPrompt::new(stdin.lock(), io::stdout());
        prompt::run(&mut prompt, config)?;
        return Ok(());
    }

    let mut machine = EnigmaMachine::new(config)?;
    info!(positions = %machine.position_letters(), "machine ready");

    let (text, piped) = if cli.message.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        (text, true)
    } else {
        (cli.message.join(" "), false)
    };

    let output = if cli.debug {
        process_with_trace(&mut machine, &text)
    } else {
        machine.process(&text)
    };

    if piped {
        print!("{output}");
    } else {
        println!("{output}");
    }

    Ok(())
}

/// Builds the machine settings from a key sheet, JSON, or the individual flags.
fn config_from_flags(cli: &Cli) -> Result<MachineConfig, EnigmaError> {
    if let Some(sheet) = &cli.key_sheet {
        return parse(sheet);
    }

    if let Some(json) = &cli.settings_json {
        return MachineConfig::from_json(json);
    }

    Ok(MachineConfig {
        rotors: parse_rotors(&cli.rotors)?,
        positions: parse_settings(&cli.positions)?,
        rings: parse_settings(&cli.rings)?,
        plugboard: parse_plugboard(&cli.plugboard)?,
        reflector: cli.reflector.clone(),
        contacts: if cli.exit_contacts {
            ContactMode::EntryExit
        } else {
            ContactMode::Entry
        },
    })
}

/// Processes `text` one character at a time, printing the rotor windows after each
/// letter to stderr.
fn process_with_trace(machine: &mut EnigmaMachine, text: &str) -> String {
    eprintln!("Start: {}", machine.position_letters());

    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        let before = machine.step_count();
        let encoded = machine.process(c.encode_utf8(&mut [0; 4]));

        if machine.step_count() != before {
            eprintln!(
                "Step: {}, Windows: {}, {} -> {}",
                machine.step_count(),
                machine.position_letters(),
                c,
                encoded
            );
        }
        output.push_str(&encoded);
    }

    output
}

fn print_catalog() {
    println!("Rotors:");
    for (index, spec) in ROTORS.iter().enumerate() {
        println!(
            "  {index}: {:<4} notch {}",
            spec.name,
            (b'A' + spec.notch) as char
        );
    }

    println!("Reflectors: {}", Catalog::reflector_names().join(", "));
}
