use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// POSTI - post-install interactive orchestrator
#[derive(Parser, Debug)]
#[command(name = "posti")]
#[command(about = "Run ordered post-install step profiles with dry-run and confirmation gates")]
#[command(version)]
pub struct Cli {
    /// Profile key to run without the interactive menu
    #[arg(long)]
    pub profile: Option<String>,

    /// Print commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Unattended mode: approve every step confirmation and never prompt.
    ///
    /// A failing single-command step aborts the whole run with a non-zero
    /// exit code.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Profile document to load (JSON, or a script generated by the designer).
    /// Defaults to the built-in profiles.
    #[arg(long, value_name = "FILE", global = true)]
    pub profiles: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log diagnostics to stderr at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available profiles and exit
    List,
    /// Validate a profile document
    Validate {
        /// Path to the profile document to validate
        file: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
