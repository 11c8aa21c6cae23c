//! The two ways to play: at the terminal, or from files of commands.

use std::fs;
use std::path::PathBuf;

use miette::{Context, IntoDiagnostic};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tarpit_fiction::Session;
use tracing::debug;

use crate::output::Output;

/// Run every line of `files`, in order, as one stream of commands.
///
/// Stops early if the player quits.
pub fn batch(session: &mut Session, files: &[PathBuf]) -> miette::Result<()> {
    let output = Output::new(session.config().feedback);
    output.write(session.drain())?;

    for path in files {
        let text = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        debug!(path = %path.display(), lines = text.lines().count(), "running file");
        for line in text.lines() {
            if !session.is_active() {
                return Ok(());
            }
            session.submit(line);
            output.write(session.drain())?;
        }
    }
    Ok(())
}

/// Read commands from the terminal until the player quits or input ends.
pub fn interactive(session: &mut Session) -> miette::Result<()> {
    let output = Output::new(session.config().feedback);
    output.write(session.drain())?;

    let mut editor = DefaultEditor::new().into_diagnostic()?;
    while session.is_active() {
        match editor.readline("> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str()).into_diagnostic()?;
                }
                session.submit(&line);
                output.write(session.drain())?;
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).into_diagnostic(),
        }
    }
    Ok(())
}
