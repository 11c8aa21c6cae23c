//! Tarpit Adventure, the text adventure that's also a programming language.

mod output;
mod play;

use std::path::PathBuf;

use clap::Parser;
use miette::{Context, IntoDiagnostic};
use tarpit_fiction::{Feedback, Session, SessionConfig};

#[derive(Parser)]
#[command(
    name = "tarpit",
    about = "Tarpit Adventure, the text adventure that's also a programming language",
    disable_version_flag = true
)]
struct Cli {
    /// Perform the steps in FILE instead of reading from the terminal (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print feedback to stderr [default in interactive mode]
    #[arg(short = 'v', conflicts_with_all = ["stdout", "quiet"])]
    stderr: bool,

    /// Print feedback to stdout
    #[arg(short = 'V', conflicts_with = "quiet")]
    stdout: bool,

    /// Do not print feedback [default when running files]
    #[arg(short = 'q')]
    quiet: bool,

    /// Seed for every random choice the world makes
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Further parameters appear within the adventure somewhere
    #[arg(allow_negative_numbers = true)]
    parameters: Vec<String>,
}

impl Cli {
    fn feedback(&self) -> Feedback {
        if self.quiet {
            Feedback::Quiet
        } else if self.stdout {
            Feedback::Stdout
        } else if self.stderr || self.files.is_empty() {
            Feedback::Stderr
        } else {
            Feedback::Quiet
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let batch = !cli.files.is_empty();
    let config = SessionConfig::new()
        .with_seed(cli.seed)
        .with_feedback(cli.feedback())
        .with_echo(batch)
        .with_parameters(cli.parameters.iter().cloned());
    let mut session = Session::new(config)
        .into_diagnostic()
        .wrap_err("failed to start the adventure")?;

    if batch {
        play::batch(&mut session, &cli.files)
    } else {
        play::interactive(&mut session)
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let filter = EnvFilter::try_from_env("TARPIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
