use anyhow::Result;
use dialoguer::Input;

use crate::error::Error;

/// Source of interactive answers. The production implementation reads from
/// the terminal; tests supply a scripted one so nothing blocks on stdin.
pub trait Prompter {
    /// Ask for a free-form line of text (e.g. the API token).
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Ask for a 1-based selection out of `len` menu entries and return the
    /// 0-based index. Out-of-range or non-numeric input is a hard error.
    fn select(&mut self, prompt: &str, len: usize) -> Result<usize>;
}

/// Real terminal prompter backed by dialoguer.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::new().with_prompt(prompt).interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn select(&mut self, prompt: &str, len: usize) -> Result<usize> {
        let answer: String = Input::new().with_prompt(prompt).interact_text()?;
        checked_index(&answer, len)
    }
}

/// Validate a 1-based selection string against a menu of `len` entries.
pub fn checked_index(input: &str, len: usize) -> Result<usize> {
    let invalid = || Error::UserInput {
        input: input.trim().to_string(),
        max: len,
    };
    let n: usize = input.trim().parse().map_err(|_| invalid())?;
    if n == 0 || n > len {
        return Err(invalid().into());
    }
    Ok(n - 1)
}

/// Prompter that answers from a fixed queue, for tests.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, _prompt: &str) -> Result<String> {
        use anyhow::Context;
        self.answers
            .pop_front()
            .context("scripted prompter ran out of answers")
    }

    fn select(&mut self, prompt: &str, len: usize) -> Result<usize> {
        let answer = self.read_line(prompt)?;
        checked_index(&answer, len)
    }
}
