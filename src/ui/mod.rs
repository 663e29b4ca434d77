//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The [Confirm] seam and its implementations

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::Result;

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_status, display_success, format_question,
};

/// A yes/no question with the words that count as each answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub positive: String,
    pub negative: String,
}

impl Question {
    /// A question answered with `y` or `n`
    pub fn yes_no(text: impl Into<String>) -> Self {
        Question::with_answers(text, "y", "n")
    }

    /// A question with custom answer words, e.g. `extract`/`exit`
    pub fn with_answers(
        text: impl Into<String>,
        positive: impl Into<String>,
        negative: impl Into<String>,
    ) -> Self {
        Question {
            text: text.into(),
            positive: positive.into(),
            negative: negative.into(),
        }
    }
}

/// Decides questions the installer would otherwise ask interactively.
pub trait Confirm {
    /// Returns `true` for the positive answer, `false` for the negative one.
    fn confirm(&self, question: &Question) -> Result<bool>;
}

impl<T: Confirm + ?Sized> Confirm for &T {
    fn confirm(&self, question: &Question) -> Result<bool> {
        (**self).confirm(question)
    }
}

/// Asks on the terminal and repeats until one of the two answers is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&self, question: &Question) -> Result<bool> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stderr();
        ask(&mut input, &mut output, question)
    }
}

/// Answers every question positively (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, question: &Question) -> Result<bool> {
        debug!("assuming '{}' for: {}", question.positive, question.text);
        Ok(true)
    }
}

/// Prompt on `output` and read answers from `input` until a valid one.
///
/// Answers are compared case-insensitively after trimming. End of input is
/// an error rather than an endless loop.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &Question) -> Result<bool> {
    let prompt = format_question(&question.text, &question.positive, &question.negative);
    let positive = question.positive.to_lowercase();
    let negative = question.negative.to_lowercase();

    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer given to: {}", question.text),
            )
            .into());
        }

        let reply = line.trim().to_lowercase();
        debug!("reply {}", reply);
        if reply == positive {
            return Ok(true);
        }
        if reply == negative {
            return Ok(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_positive() {
        let mut input = Cursor::new("y\n");
        let mut output = Vec::new();
        assert!(ask(&mut input, &mut output, &Question::yes_no("Overwrite?")).unwrap());
        assert_eq!(String::from_utf8(output).unwrap(), "Overwrite? (y/n): ");
    }

    #[test]
    fn test_ask_custom_answers_case_insensitive() {
        let question = Question::with_answers("Extract x.tar.gz or exit?", "extract", "exit");
        let mut input = Cursor::new("  EXIT \n");
        let mut output = Vec::new();
        assert!(!ask(&mut input, &mut output, &question).unwrap());
    }

    #[test]
    fn test_ask_repeats_until_valid() {
        let mut input = Cursor::new("maybe\nyes\nn\n");
        let mut output = Vec::new();
        assert!(!ask(&mut input, &mut output, &Question::yes_no("Skip?")).unwrap());

        let prompts = String::from_utf8(output).unwrap();
        assert_eq!(prompts.matches("Skip? (y/n): ").count(), 3);
    }

    #[test]
    fn test_ask_end_of_input_is_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(ask(&mut input, &mut output, &Question::yes_no("Skip?")).is_err());
    }

    #[test]
    fn test_assume_yes() {
        let question = Question::with_answers("Extract?", "extract", "exit");
        assert!(AssumeYes.confirm(&question).unwrap());
    }
}
