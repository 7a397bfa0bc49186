//! Interactive collection of machine settings.
//!
//! The session only talks to a [`Prompt`], so it can be driven by a terminal or by a
//! scripted list of answers.

use enigma::{analyze, parse_plugboard, parse_settings, EnigmaError, EnigmaMachine, MachineConfig};
use std::error::Error;
use std::io::{self, BufRead, Write};

/// A line-oriented request/response channel with the user.
pub trait Prompt {
    /// Shows `question` and returns the answer without its line ending.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Shows a line of output.
    fn tell(&mut self, message: &str) -> io::Result<()>;
}

/// A `Prompt` over any reader and writer, typically stdin and stdout.
pub struct StdioPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for StdioPrompt<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before all settings were entered",
            ));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn tell(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

/// What the user entered: the settings and the text to process with them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub config: MachineConfig,
    pub message: String,
}

/// Asks `question` until `parse` accepts the answer, reporting each rejection.
fn ask_until<P, T, F>(prompt: &mut P, question: &str, parse: F) -> io::Result<T>
where
    P: Prompt,
    F: Fn(&str) -> Result<T, EnigmaError>,
{
    loop {
        let answer = prompt.ask(question)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => prompt.tell(&format!("Invalid input: {e}"))?,
        }
    }
}

/// Collects the message, rotor positions, ring settings and plugboard pairs.
///
/// Rotor order, reflector and contact model come from `base`. Each answer is checked
/// against the machine it would produce before the next question is asked.
pub fn collect<P: Prompt>(prompt: &mut P, base: MachineConfig) -> io::Result<Session> {
    let message = prompt.ask("Enter the message: ")?;
    let mut config = base;

    config.positions = ask_until(prompt, "Enter rotor positions (e.g. 0 0 0): ", |answer| {
        let positions = parse_settings(answer)?;
        analyze(&MachineConfig {
            positions: positions.clone(),
            ..config.clone()
        })?;
        Ok(positions)
    })?;

    config.rings = ask_until(prompt, "Enter ring settings (e.g. 0 0 0): ", |answer| {
        let rings = parse_settings(answer)?;
        analyze(&MachineConfig {
            rings: rings.clone(),
            ..config.clone()
        })?;
        Ok(rings)
    })?;

    config.plugboard = ask_until(prompt, "Enter Plugboard pairs (e.g. AB CD): ", |answer| {
        let plugboard = parse_plugboard(answer)?;
        analyze(&MachineConfig {
            plugboard: plugboard.clone(),
            ..config.clone()
        })?;
        Ok(plugboard)
    })?;

    Ok(Session { config, message })
}

/// Runs a whole prompt session and shows the processed message.
pub fn run<P: Prompt>(prompt: &mut P, base: MachineConfig) -> Result<String, Box<dyn Error>> {
    let session = collect(prompt, base)?;
    let mut machine = EnigmaMachine::new(session.config)?;

    let output = machine.process(&session.message);
    prompt.tell(&format!("Output: {output}"))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Answers questions from a fixed script and records everything shown.
    struct ScriptedPrompt {
        answers: VecDeque<&'static str>,
        transcript: Vec<String>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                transcript: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, question: &str) -> io::Result<String> {
            self.transcript.push(question.to_string());
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }

        fn tell(&mut self, message: &str) -> io::Result<()> {
            self.transcript.push(message.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_collect_settings() {
        let mut prompt = ScriptedPrompt::new(&["HELLO", "0 0 0", "1 2 3", "AB CD"]);

        let session = collect(&mut prompt, MachineConfig::default()).unwrap();

        assert_eq!(session.message, "HELLO");
        assert_eq!(session.config.positions, vec![0, 0, 0]);
        assert_eq!(session.config.rings, vec![1, 2, 3]);
        assert_eq!(session.config.plugboard, vec![('A', 'B'), ('C', 'D')]);
        assert_eq!(prompt.transcript.len(), 4);
    }

    #[test]
    fn test_run_prints_output() {
        let mut prompt = ScriptedPrompt::new(&["HELLO", "0 0 0", "0 0 0", "AB CD"]);

        let output = run(&mut prompt, MachineConfig::default()).unwrap();

        assert_eq!(output, "VNBDB");
        assert_eq!(prompt.transcript.last().unwrap(), "Output: VNBDB");
    }

    #[test]
    fn test_invalid_answers_are_asked_again() {
        let mut prompt = ScriptedPrompt::new(&[
            "HELLO", "0 0", "0 0 26", "0 0 0", "x y z", "AB BC", "",
        ]);

        let session = collect(&mut prompt, MachineConfig::default()).unwrap();

        assert_eq!(session.config.positions, vec![0, 0, 0]);
        assert_eq!(session.config.rings, vec![23, 24, 25]);
        assert!(session.config.plugboard.is_empty());

        let rejections: Vec<_> = prompt
            .transcript
            .iter()
            .filter(|line| line.starts_with("Invalid input"))
            .collect();
        assert_eq!(rejections.len(), 3);
        assert!(rejections[0].contains("Expected 3 positions, found 2"));
        assert!(rejections[1].contains("Position 26 of rotor 2 is outside 0-25"));
        assert!(rejections[2].contains("Plugboard letter B is used more than once"));
    }

    #[test]
    fn test_closed_input_stops_the_session() {
        let mut prompt = ScriptedPrompt::new(&["HELLO", "0 0 0"]);

        let error = collect(&mut prompt, MachineConfig::default()).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_stdio_prompt() {
        let input = Cursor::new("VNACA\r\n0 0 0\n0 0 0\n\n");
        let mut output = Vec::new();

        let result = {
            let mut prompt = StdioPrompt::new(input, &mut output);
            run(&mut prompt, MachineConfig::default()).unwrap()
        };

        assert_eq!(result, "HELLO");
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("Enter the message: "));
        assert!(shown.ends_with("Output: HELLO\n"));
    }

    #[test]
    fn test_stdio_prompt_end_of_input() {
        let mut prompt = StdioPrompt::new(Cursor::new(""), Vec::new());

        let error = prompt.ask("Enter the message: ").unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }
}
