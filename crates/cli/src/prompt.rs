//! Interactive prompts for collecting variable values and answers.
//!
//! A terminal on stdin gets `dialoguer` prompts. Piped input falls back to a
//! plain line reader so runs can be scripted.

use coverletter_core::templates::Values;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};

/// Error type for prompting.
#[derive(Debug)]
pub enum PromptError {
    /// IO error during prompting.
    Io(io::Error),
    /// Input ended before an answer was given.
    Cancelled,
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptError::Io(e) => write!(f, "IO error: {e}"),
            PromptError::Cancelled => write!(f, "input cancelled by user"),
        }
    }
}

impl std::error::Error for PromptError {}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::Io(e)
    }
}

/// Source of one-line answers.
pub trait Prompter {
    /// Ask `prompt` and return the answer. An empty answer yields `default`
    /// when one is given.
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError>;
}

/// `dialoguer`-backed prompter for interactive terminals.
#[derive(Default)]
pub struct TermPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(d) = default {
            input = input.default(d.to_string());
        }
        input.interact_text().map_err(dialoguer_error_to_prompt_error)
    }
}

/// Line-at-a-time prompter over arbitrary reader/writer pairs.
pub struct LinePrompter<R, W> {
    input: R,
    pub(crate) output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        match default {
            Some(d) => write!(self.output, "{prompt} (default: {d}): ")?,
            None => write!(self.output, "{prompt}: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Cancelled);
        }
        let answer = line.trim_end_matches(['\n', '\r']);

        Ok(match default {
            Some(d) if answer.is_empty() => d.to_string(),
            _ => answer.to_string(),
        })
    }
}

/// Pick the prompter for this process: `dialoguer` on a terminal, plain
/// line reading otherwise.
pub fn for_session() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(TermPrompter::default())
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    }
}

/// Ask a yes/no question until the answer is `y` or `n`.
pub fn confirm(prompter: &mut dyn Prompter, question: &str) -> Result<bool, PromptError> {
    let prompt = format!("{question} (y/n)");
    loop {
        let answer = prompter.ask(&prompt, None)?;
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }
}

/// Prompt once per variable, in order, for its replacement text.
pub fn collect_values(
    prompter: &mut dyn Prompter,
    variables: &[String],
) -> Result<Values, PromptError> {
    let mut values = Values::new();
    for name in variables {
        let text = prompter.ask(&format!("Text for {name}"), None)?;
        values.insert(name.clone(), text);
    }
    Ok(values)
}

/// Convert dialoguer error to our PromptError.
fn dialoguer_error_to_prompt_error(e: dialoguer::Error) -> PromptError {
    match e {
        dialoguer::Error::IO(io_err) => {
            if io_err.kind() == io::ErrorKind::UnexpectedEof {
                PromptError::Cancelled
            } else {
                PromptError::Io(io_err)
            }
        }
    }
}
