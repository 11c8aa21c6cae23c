//! Routing narration and program output to the terminal.

use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use miette::IntoDiagnostic;
use tarpit_core::{Channel, Line};
use tarpit_fiction::Feedback;

/// Writes drained lines: output always to stdout, feedback wherever the
/// user asked for it.
pub struct Output {
    feedback: Feedback,
    styled: bool,
}

impl Output {
    /// Style feedback only when it goes to a terminal.
    pub fn new(feedback: Feedback) -> Self {
        let styled = match feedback {
            Feedback::Stderr => io::stderr().is_terminal(),
            Feedback::Stdout => io::stdout().is_terminal(),
            Feedback::Quiet => false,
        };
        Self { feedback, styled }
    }

    /// Print `lines`, routing each by channel.
    pub fn write(&self, lines: Vec<Line>) -> miette::Result<()> {
        let mut stdout = io::stdout().lock();
        let mut stderr = io::stderr().lock();

        for line in lines {
            match (line.channel, self.feedback) {
                (Channel::Output, _) => writeln!(stdout, "{}", line.text),
                (Channel::Feedback, Feedback::Quiet) => Ok(()),
                (Channel::Feedback, Feedback::Stdout) => writeln!(stdout, "{}", self.style(&line.text)),
                (Channel::Feedback, Feedback::Stderr) => writeln!(stderr, "{}", self.style(&line.text)),
            }
            .into_diagnostic()?;
        }

        stdout.flush().into_diagnostic()?;
        stderr.flush().into_diagnostic()
    }

    /// Echoed commands stand out from the narration around them.
    fn style(&self, text: &str) -> String {
        if self.styled && text.starts_with('>') {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}
