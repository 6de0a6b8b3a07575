//! Run configuration
//!
//! Merges command-line flags with the environment (`$SHELL`, `NO_COLOR`,
//! `FORCE_COLOR`) into the settings one run needs.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::executor::shell_from;
use crate::theme::supports_color;

/// How the dry-run setting is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DryRunMode {
    /// `--dry-run` was given
    On,
    /// Unattended without `--dry-run`: a real run
    Off,
    /// Interactive: ask "Enable dry-run mode?" (default yes)
    Ask,
}

impl DryRunMode {
    pub fn resolve(dry_run_flag: bool, auto_confirm: bool) -> Self {
        match (dry_run_flag, auto_confirm) {
            (true, _) => Self::On,
            (false, true) => Self::Off,
            (false, false) => Self::Ask,
        }
    }
}

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Profile preselected with `--profile`; `None` shows the menu
    pub profile: Option<String>,
    /// Profile document; `None` uses the built-in catalog
    pub profiles_path: Option<PathBuf>,
    pub dry_run: DryRunMode,
    pub auto_confirm: bool,
    pub color: bool,
    pub shell: String,
}

impl RunConfig {
    /// Build from CLI flags and an explicit `$SHELL` value.
    pub fn from_parts(cli: &Cli, shell_env: Option<String>, color: bool) -> Self {
        Self {
            profile: cli.profile.clone(),
            profiles_path: cli.profiles.clone(),
            dry_run: DryRunMode::resolve(cli.dry_run, cli.yes),
            auto_confirm: cli.yes,
            color,
            shell: shell_from(shell_env),
        }
    }

    /// Build from CLI flags and the process environment.
    pub fn from_env(cli: &Cli) -> Self {
        let shell = std::env::var("SHELL").ok();
        Self::from_parts(cli, shell, supports_color(cli.no_color))
    }
}
