//! # modelspec-validate entry point
//!
//! Parses arguments, sets up logging on stderr and runs the validation
//! pipeline. Exit status: 0 when every file is clean, 1 when any issue was
//! reported, 2 when the run could not start (bad arguments or schema).

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modelspec_cli::{run_validate, Outcome, ValidateOptions};

/// Exit status for failures that prevent validation from starting.
const EXIT_STARTUP_FAILURE: u8 = 2;

/// Validate ModelSpec files against JSON Schema.
///
/// Each path may be a file or a directory. Directories are searched
/// recursively for *.yaml, *.yml and *.json files.
#[derive(Parser, Debug)]
#[command(name = "modelspec-validate", version, about, long_about = None)]
struct Cli {
    /// Path to schema JSON file (e.g. schema/schema.json).
    #[arg(long, value_name = "SCHEMA")]
    schema: PathBuf,

    /// One or more YAML/JSON files or directories.
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    paths: Vec<PathBuf>,

    /// Disable semantic checks.
    #[arg(long)]
    no_semantic: bool,

    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Run options for these arguments.
    fn options(self, styled: bool) -> ValidateOptions {
        ValidateOptions {
            schema: self.schema,
            paths: self.paths,
            semantic: !self.no_semantic,
            styled,
        }
    }
}

/// Log filter directive for a `-v` count.
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Process exit status for the result of a run.
fn exit_status(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(_) => EXIT_STARTUP_FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level(cli.verbose)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let styled = std::io::stdout().is_terminal();
    colored::control::set_override(styled);

    let opts = cli.options(styled);
    let result = run_validate(&opts, &mut std::io::stdout().lock());
    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    ExitCode::from(exit_status(&result))
}
