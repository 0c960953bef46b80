use anyhow::{Context, Result, anyhow};
use colored::*;
use dialoguer::Input;
use is_terminal::IsTerminal;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Source of line-oriented answers for the interactive menu
pub trait Prompter {
    /// Ask a question and return the raw answer, which may be empty
    fn text(&mut self, prompt: &str) -> Result<String>;
}

/// Interactive terminal input via dialoguer
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact()?;
        Ok(answer)
    }
}

/// Plain line reader used when stdin is piped
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        print!("{}: ", prompt);
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Err(anyhow!("stdin closed"));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Pick the terminal prompter on a TTY, a line reader otherwise
pub fn default_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompter)
    } else {
        Box::new(StdinPrompter)
    }
}

/// Replays a fixed list of answers, failing once they run out
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Every prompt shown so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for prompt '{}'", prompt))
    }
}

/// Ask until the answer parses as `T`
pub fn prompt_number<T: FromStr>(prompter: &mut dyn Prompter, prompt: &str) -> Result<T> {
    loop {
        let answer = prompter.text(prompt)?;
        match answer.trim().parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => println!(
                "{} Invalid input. Please enter a number.",
                "[WARNING]".yellow().bold()
            ),
        }
    }
}

/// Ask until the answer is a finite decimal. `NaN` and `inf` parse as `f64`
/// but cannot be stored or exported, so they are re-prompted too.
pub fn prompt_amount(prompter: &mut dyn Prompter, prompt: &str) -> Result<f64> {
    loop {
        let value: f64 = prompt_number(prompter, prompt)?;
        if value.is_finite() {
            return Ok(value);
        }
        println!(
            "{} Invalid input. Please enter a finite number.",
            "[WARNING]".yellow().bold()
        );
    }
}

/// True only when the answer is "yes", ignoring case and surrounding space
pub fn confirm_yes(prompter: &mut dyn Prompter, prompt: &str) -> Result<bool> {
    let answer = prompter.text(prompt)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
