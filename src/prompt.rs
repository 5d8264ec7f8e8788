use crate::errors::{Error, Result};
use std::io::{self, BufRead, Write};

/// The interactive boundary: a blocking ask-the-user service.
///
/// Interactive replacement takes a `&mut dyn Prompter` rather than touching
/// stdin directly, so the engine can be driven by a scripted implementation
/// in tests. Stdin is a single process-wide resource; whoever holds the
/// prompter must issue at most one outstanding request at a time.
pub trait Prompter {
    /// Asks the user to pick one of `option_count` choices by index.
    ///
    /// Returns `Ok(None)` when the response is anything other than an integer
    /// in `[0, option_count)` (empty input, out of range, non-numeric); that
    /// is the "skip" answer and never an error. A closed input channel is
    /// `Error::PromptClosed`.
    fn ask(&mut self, message: &str, option_count: usize) -> Result<Option<usize>>;

    /// Asks a yes/no question. Only `y`/`yes` (case-insensitive) is yes.
    fn ask_yes_no(&mut self, message: &str) -> Result<bool>;
}

/// A `Prompter` over standard input and output.
pub struct StdinPrompter;

impl StdinPrompter {
    fn read_response(&self) -> Result<String> {
        let mut input = String::new();
        let bytes = io::stdin().lock().read_line(&mut input)?;
        if bytes == 0 {
            return Err(Error::PromptClosed);
        }
        Ok(input.trim().to_string())
    }
}

impl Prompter for StdinPrompter {
    fn ask(&mut self, message: &str, option_count: usize) -> Result<Option<usize>> {
        print!("{message} ");
        io::stdout().flush()?;

        let response = self.read_response()?;
        match response.parse::<usize>() {
            Ok(idx) if idx < option_count => Ok(Some(idx)),
            _ => Ok(None),
        }
    }

    fn ask_yes_no(&mut self, message: &str) -> Result<bool> {
        print!("{message} [y/N] ");
        io::stdout().flush()?;

        let response = self.read_response()?;
        Ok(matches!(response.to_lowercase().as_str(), "y" | "yes"))
    }
}

/// A `Prompter` that replays canned answers, for tests.
#[cfg(test)]
pub struct ScriptedPrompter {
    pub answers: std::collections::VecDeque<Option<usize>>,
    pub confirmations: std::collections::VecDeque<bool>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: Vec<Option<usize>>, confirmations: Vec<bool>) -> Self {
        Self {
            answers: answers.into(),
            confirmations: confirmations.into(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, message: &str, _option_count: usize) -> Result<Option<usize>> {
        self.asked.push(message.to_string());
        self.answers.pop_front().ok_or(Error::PromptClosed)
    }

    fn ask_yes_no(&mut self, message: &str) -> Result<bool> {
        self.asked.push(message.to_string());
        self.confirmations.pop_front().ok_or(Error::PromptClosed)
    }
}
