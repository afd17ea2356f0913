//! Asking the operator for permission, e.g. before overwriting a file.

use std::io::{self, BufRead, Write};

/// Something that can answer a yes/no question.
pub trait Confirm {
    /// Ask `question`, falling back to `default` on an empty answer.
    fn ask(&mut self, question: &str, default: bool) -> io::Result<bool>;
}

/// Answers every question with yes, for non-interactive use.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn ask(&mut self, _question: &str, _default: bool) -> io::Result<bool> {
        Ok(true)
    }
}

/// Interactive prompt reading answers line by line.
///
/// Accepts `yes`, `ye`, `y`, `no` and `n` in any case. Anything else repeats
/// the question. If the input ends without an answer, the question counts as
/// declined.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn ask(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let mut line = String::new();

        loop {
            write!(self.output, "{question} {hint} ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            match parse_answer(&line) {
                Some(answer) => return Ok(answer.unwrap_or(default)),
                None => writeln!(
                    self.output,
                    "Please respond with 'yes' or 'no' (or 'y' or 'n')."
                )?,
            }
        }
    }
}

/// `Some(None)` for an empty answer, `None` for an unrecognised one.
fn parse_answer(line: &str) -> Option<Option<bool>> {
    match line.trim().to_lowercase().as_str() {
        "" => Some(None),
        "yes" | "ye" | "y" => Some(Some(true)),
        "no" | "n" => Some(Some(false)),
        _ => None,
    }
}
