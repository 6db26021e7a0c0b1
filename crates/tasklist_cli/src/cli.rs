//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tasklist")]
#[command(version)]
#[command(about = "Interactive in-memory task list")]
pub struct Cli {
    /// Log level (trace|debug|info|warn|error); overrides the config file
    #[arg(long)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; logging stays off when unset
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    /// Config file path (defaults to <config dir>/tasklist/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seed the list with a task before the prompt opens (repeatable)
    #[arg(long = "add", value_name = "TEXT")]
    pub seed: Vec<String>,
    /// Print the final list as JSON on exit
    #[arg(long)]
    pub json: bool,
}
