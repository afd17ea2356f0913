//! Command-line interface: convert a GPX file's waypoints to a CSV file.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use gpx2csv::app::{run, Outcome, RunArgs};
use gpx2csv::confirm::{AssumeYes, Confirm, Prompt};
use gpx2csv::{CsvOptions, LineEnding};
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "gpx2csv",
    version,
    about = "A simple utility to convert GPX files to a CSV file."
)]
struct Cli {
    /// Path to the GPX file
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Path to the resulting CSV file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Overwrite an existing CSV file without asking
    #[arg(short, long)]
    force: bool,

    /// Row terminator of the CSV file
    #[arg(long, value_enum, default_value_t = LineEndingArg::Native)]
    line_ending: LineEndingArg,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LineEndingArg {
    Native,
    Lf,
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Native => LineEnding::native(),
            LineEndingArg::Lf => LineEnding::Lf,
            LineEndingArg::Crlf => LineEnding::Crlf,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    let args = RunArgs {
        input: cli.input,
        output: cli.output,
        options: CsvOptions {
            line_ending: cli.line_ending.into(),
        },
    };
    let mut confirm: Box<dyn Confirm> = if cli.force {
        Box::new(AssumeYes)
    } else {
        Box::new(Prompt::stdio())
    };

    match run(&args, confirm.as_mut()) {
        Ok(Outcome::Converted { .. } | Outcome::Declined) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
