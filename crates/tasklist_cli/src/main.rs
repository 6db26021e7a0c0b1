//! `tasklist` binary entry point.
//!
//! # Responsibility
//! - Resolve config, start logging when a log directory is configured.
//! - Seed and run one interactive view session on stdin/stdout.
//!
//! # Invariants
//! - The task list lives only for this process; nothing is written back.

mod app;
mod cli;
mod command;
mod config;
mod error;

use clap::Parser;
use cli::Cli;
use error::CliError;
use std::io;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tasklist: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let file = config::load_config(cli.config.as_deref())?;
    let settings = config::resolve(cli, file);

    if let Some(dir) = settings.log_dir.as_deref() {
        tasklist_core::init_logging(&settings.log_level, utf8_log_dir(dir)?)?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run_seeded(&cli.seed, cli.json, stdin.lock(), &mut out)?;
    Ok(())
}

/// The logger takes the directory as text; non-UTF-8 paths are rejected, not
/// converted lossily.
fn utf8_log_dir(dir: &Path) -> Result<&str, CliError> {
    dir.to_str().ok_or_else(|| CliError::LogDirNotUtf8(dir.to_path_buf()))
}
