//! Subcommand execution.
//!
//! [`Execute`] is the seam between the step runner and the operating system.
//! [`ExecutionContext`] is the real implementation: it either hands the
//! subcommand to the configured shell and waits for it, or, in dry-run mode,
//! only announces it.
//!
//! Execution is synchronous. Exactly one subcommand runs to completion before
//! the next is considered. Child processes inherit the terminal so that
//! interactive tools (`sudo`, package managers) can talk to the operator.

use std::io::Write;
use std::process::Command;

use tracing::{debug, warn};

use crate::console::Console;
use crate::error::{PostiError, Result};
use crate::theme::Tone;

/// Shell used when `$SHELL` is unset or blank.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Prefix shown in front of commands that are only simulated.
pub const DRY_RUN_PREFIX: &str = "[dry-run] ";

/// Runs one subcommand, really or simulated.
pub trait Execute {
    /// Whether subcommands are simulated instead of spawned.
    fn is_dry_run(&self) -> bool;

    /// Run `subcommand`, announcing it on `console` first when `announce` is set.
    ///
    /// Returns `PostiError::Command` on a non-zero exit and `PostiError::Spawn`
    /// when the shell could not be started.
    fn run<W: Write>(
        &mut self,
        subcommand: &str,
        announce: bool,
        console: &mut Console<W>,
    ) -> Result<()>;
}

/// Real-or-simulated execution context, created once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    dry_run: bool,
    shell: String,
}

impl ExecutionContext {
    pub fn new(dry_run: bool, shell: impl Into<String>) -> Self {
        Self {
            dry_run,
            shell: shell.into(),
        }
    }
}

/// Pick the shell from an optional `$SHELL` value.
pub fn shell_from(value: Option<String>) -> String {
    value
        .filter(|shell| !shell.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

impl Execute for ExecutionContext {
    fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn run<W: Write>(
        &mut self,
        subcommand: &str,
        announce: bool,
        console: &mut Console<W>,
    ) -> Result<()> {
        if announce {
            let prefix = if self.dry_run { DRY_RUN_PREFIX } else { "" };
            console.line(&format!("        {prefix}{subcommand}"), Tone::Info)?;
        }
        if self.dry_run {
            debug!(subcommand, "Dry-run: not spawning");
            return Ok(());
        }

        // Narration must be on screen before the child starts writing.
        console.flush()?;
        debug!(shell = %self.shell, subcommand, "Spawning subcommand");

        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(subcommand)
            .status()
            .map_err(|source| PostiError::Spawn {
                shell: self.shell.clone(),
                subcommand: subcommand.to_string(),
                source,
            })?;

        if status.success() {
            debug!(subcommand, "Subcommand succeeded");
            Ok(())
        } else {
            let exit_code = status.code().unwrap_or(-1);
            warn!(subcommand, exit_code, "Subcommand failed");
            Err(PostiError::command(exit_code, subcommand))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn console() -> Console<Vec<u8>> {
        Console::new(Vec::new(), Theme::plain())
    }

    fn output(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_shell_from_env_value() {
        assert_eq!(shell_from(Some("/usr/bin/zsh".to_string())), "/usr/bin/zsh");
        assert_eq!(shell_from(Some("  ".to_string())), DEFAULT_SHELL);
        assert_eq!(shell_from(None), DEFAULT_SHELL);
    }

    #[test]
    fn test_dry_run_announces_and_succeeds() {
        // The shell does not exist: any spawn attempt would fail.
        let mut ctx = ExecutionContext::new(true, "/nonexistent/shell");
        let mut console = console();
        ctx.run("exit 3", true, &mut console).unwrap();
        assert_eq!(output(console), "        [dry-run] exit 3\n");
    }

    #[test]
    fn test_dry_run_silent_without_announce() {
        let mut ctx = ExecutionContext::new(true, "/nonexistent/shell");
        let mut console = console();
        ctx.run("exit 3", false, &mut console).unwrap();
        assert!(output(console).is_empty());
    }

    #[test]
    fn test_real_run_success() {
        let mut ctx = ExecutionContext::new(false, "/bin/sh");
        let mut console = console();
        ctx.run("true", true, &mut console).unwrap();
        assert_eq!(output(console), "        true\n");
    }

    #[test]
    fn test_real_run_reports_exit_code() {
        let mut ctx = ExecutionContext::new(false, "/bin/sh");
        let mut console = console();
        match ctx.run("exit 3", false, &mut console) {
            Err(PostiError::Command { exit_code, subcommand }) => {
                assert_eq!(exit_code, 3);
                assert_eq!(subcommand, "exit 3");
            }
            other => panic!("expected Command error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_shell_is_spawn_error() {
        let mut ctx = ExecutionContext::new(false, "/nonexistent/shell");
        let mut console = console();
        let err = ctx.run("true", false, &mut console).unwrap_err();
        assert!(matches!(err, PostiError::Spawn { .. }));
        assert!(err.is_subcommand_failure());
    }
}
