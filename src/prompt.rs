//! Yes/no confirmation prompts.
//!
//! The runner only talks to the [`Prompt`] trait. [`ConsolePrompt`] reads the
//! operator's answers from a line-oriented input; [`ScriptedPrompt`] replays a
//! fixed list of answers and records what was asked.

use std::collections::VecDeque;
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use crate::error::{PostiError, Result};
use crate::theme::{Theme, Tone};

/// Yes/no question with a default answer.
pub trait Prompt {
    fn ask(&mut self, message: &str, default: bool) -> Result<bool>;
}

/// Interpret one answer line.
///
/// Empty input means `default`; `y`/`yes` and `n`/`no` are accepted in any
/// case. Anything else is `None` and the caller should ask again.
pub fn interpret_answer(response: &str, default: bool) -> Option<bool> {
    match response.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompt reading answers from `input` and writing questions to `output`.
pub struct ConsolePrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
    theme: Theme,
}

impl ConsolePrompt<StdinLock<'static>, Stdout> {
    /// Prompt bound to the process terminal.
    pub fn stdio(theme: Theme) -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout(), theme)
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            theme,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Show `label` and read one line of input, without its line ending.
    ///
    /// End of input is `PostiError::PromptClosed`.
    pub fn read_line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{} ", self.theme.paint(label, Tone::Accent))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(PostiError::PromptClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Print a plain notice line between reads.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn ask(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let label = format!("{message} {hint} >");
        loop {
            let response = self.read_line(&label)?;
            match interpret_answer(&response, default) {
                Some(answer) => return Ok(answer),
                None => self.say("Please answer yes or no.")?,
            }
        }
    }
}

/// Prompt replaying predetermined answers, for tests and non-terminal callers.
///
/// Asking after the answers run out behaves like closed input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Messages asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str, _default: bool) -> Result<bool> {
        self.asked.push(message.to_string());
        self.answers.pop_front().ok_or(PostiError::PromptClosed)
    }
}
