//! Step Runner
//!
//! Walks a profile's steps strictly in list order and decides, per step,
//! whether to run it, how to run it, and what to do when it fails.
//!
//! # Per-step flow
//!
//! ```text
//! header ─▶ disabled? ──yes──▶ Disabled
//!              │no
//!              ▼
//!           split ─▶ no subcommands ──▶ EmptyNoop
//!              │
//!              ▼
//!        confirm && !auto_confirm ─▶ ask "Execute this step?" ──no──▶ SkippedByOperator
//!              │
//!              ▼
//!    one subcommand                      several subcommands
//!    ok   ─▶ Completed                   run all, count failures
//!    fail ─▶ auto_confirm: abort run     0 failed ─▶ Completed
//!            else ask "Continue…?"       n failed ─▶ auto_confirm: CompletedWithErrors
//!                                                    else ask "Continue…?"
//!
//! "Continue with remaining steps?"  yes ─▶ CompletedWithErrors
//!                                   no  ─▶ HaltedOnFailure, run stops
//! ```
//!
//! A failing single-subcommand step is fatal under `auto_confirm` while a
//! failing multi-subcommand step never is. This asymmetry is kept as-is until
//! a product decision says otherwise.

use std::fmt;
use std::io::Write;

use strum::Display;
use tracing::{info, warn};

use crate::console::Console;
use crate::error::Result;
use crate::executor::{DRY_RUN_PREFIX, Execute};
use crate::profiles::{Profile, Step};
use crate::prompt::Prompt;
use crate::splitter::split_subcommands;
use crate::theme::Tone;

const EXECUTE_QUESTION: &str = "Execute this step?";
const CONTINUE_QUESTION: &str = "Continue with remaining steps?";

/// How a single step resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RunOutcome {
    #[strum(serialize = "COMPLETED")]
    Completed,
    /// Ran with failures and the run went on (operator accepted, or a
    /// multi-subcommand step under auto-confirm).
    #[strum(serialize = "COMPLETED WITH ERRORS")]
    CompletedWithErrors { failed: usize },
    #[strum(serialize = "DISABLED")]
    Disabled,
    /// The command text held nothing to run.
    #[strum(serialize = "EMPTY")]
    EmptyNoop,
    #[strum(serialize = "SKIPPED")]
    SkippedByOperator,
    /// The operator declined to continue after a failure. Always the last outcome.
    #[strum(serialize = "HALTED")]
    HaltedOnFailure,
}

/// 1-based position of a step, rendered as `i/n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPosition {
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for StepPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

/// Drives one run of a profile.
pub struct StepRunner<'a, E: Execute, P: Prompt, W: Write> {
    executor: &'a mut E,
    prompt: &'a mut P,
    console: &'a mut Console<W>,
    auto_confirm: bool,
}

impl<'a, E: Execute, P: Prompt, W: Write> StepRunner<'a, E, P, W> {
    pub fn new(
        executor: &'a mut E,
        prompt: &'a mut P,
        console: &'a mut Console<W>,
        auto_confirm: bool,
    ) -> Self {
        Self {
            executor,
            prompt,
            console,
            auto_confirm,
        }
    }

    /// Run every step of `profile` in order and return one outcome per step
    /// processed.
    ///
    /// An empty profile yields no outcomes. A halt requested by the operator
    /// ends the list with `HaltedOnFailure`. Under auto-confirm, a failing
    /// single-subcommand step aborts the run with its `PostiError::Command`
    /// (or `Spawn`) error.
    pub fn run(&mut self, profile: &Profile) -> Result<Vec<RunOutcome>> {
        let steps = profile.steps();
        let total = steps.len();
        info!(
            profile = profile.key(),
            steps = total,
            dry_run = self.executor.is_dry_run(),
            auto_confirm = self.auto_confirm,
            "Starting run"
        );

        if steps.is_empty() {
            self.console.panel(
                "NO STEPS DEPLOYED",
                Some("Profile empty. Use POSTI Designer to add actions."),
                &[],
            )?;
            self.console
                .line(":: Nothing to execute for this profile ::", Tone::Warning)?;
            return Ok(Vec::new());
        }

        let mut outcomes = Vec::with_capacity(total);
        for (idx, step) in steps.iter().enumerate() {
            let position = StepPosition { index: idx + 1, total };
            let outcome = self.run_step(step, position)?;
            info!(
                step = %position,
                title = step.title(),
                outcome = %outcome,
                "Step resolved"
            );
            outcomes.push(outcome);

            if outcome == RunOutcome::HaltedOnFailure {
                self.console.line("Halting on operator request.", Tone::Warning)?;
                break;
            }
        }
        Ok(outcomes)
    }

    fn run_step(&mut self, step: &Step, position: StepPosition) -> Result<RunOutcome> {
        let subcommands = split_subcommands(step.command());

        self.console.step_border()?;
        self.console.line(&format!(">>> STEP {position}"), Tone::Success)?;
        let mut title = format!("[{position}] {}", step.title());
        if !step.enabled() {
            title.push_str(" [DISABLED]");
        }
        self.console.panel(&title, step.description(), &subcommands)?;

        if !step.enabled() {
            self.console
                .line("    Step is disabled - skipping execution.", Tone::Warning)?;
            return self.finish(position, RunOutcome::Disabled);
        }

        if subcommands.is_empty() {
            self.console.line("    Nothing to run for this step.", Tone::Warning)?;
            return self.finish(position, RunOutcome::EmptyNoop);
        }

        if step.confirm() && !self.auto_confirm && !self.prompt.ask(EXECUTE_QUESTION, true)? {
            self.console.line("    Skipped by operator request.", Tone::Warning)?;
            return self.finish(position, RunOutcome::SkippedByOperator);
        }

        let outcome = match subcommands.as_slice() {
            [single] => self.run_single(single)?,
            chain => self.run_chain(chain)?,
        };
        self.finish(position, outcome)
    }

    fn run_single(&mut self, subcommand: &str) -> Result<RunOutcome> {
        match self.executor.run(subcommand, true, &mut *self.console) {
            Ok(()) => Ok(RunOutcome::Completed),
            Err(err) if err.is_subcommand_failure() => {
                self.console.line(&format!("    Error: {err}"), Tone::Warning)?;
                if self.auto_confirm {
                    warn!(%err, "Aborting run: step failed under auto-confirm");
                    return Err(err);
                }
                self.continue_or_halt(1)
            }
            Err(err) => Err(err),
        }
    }

    fn run_chain(&mut self, subcommands: &[String]) -> Result<RunOutcome> {
        let total = subcommands.len();
        let dry_run = self.executor.is_dry_run();
        let prefix = if dry_run { DRY_RUN_PREFIX } else { "" };
        let mut failed = 0;

        for (idx, subcommand) in subcommands.iter().enumerate() {
            let label = self
                .console
                .theme()
                .paint(&format!("[{}/{total}]", idx + 1), Tone::Success);
            self.console.raw(&format!("    {label} {prefix}{subcommand}"))?;

            match self.executor.run(subcommand, false, &mut *self.console) {
                Ok(()) if dry_run => {
                    self.console.line("        -> dry-run (skipped)", Tone::Info)?
                }
                Ok(()) => self.console.line("        -> OK", Tone::Success)?,
                Err(err) if err.is_subcommand_failure() => {
                    failed += 1;
                    self.console.line(&format!("        -> {err}"), Tone::Warning)?;
                }
                Err(err) => return Err(err),
            }
        }

        if failed == 0 {
            return Ok(RunOutcome::Completed);
        }
        self.console.line(
            &format!("    Step finished with {failed} failed sub-command(s)."),
            Tone::Warning,
        )?;
        if self.auto_confirm {
            return Ok(RunOutcome::CompletedWithErrors { failed });
        }
        self.continue_or_halt(failed)
    }

    fn continue_or_halt(&mut self, failed: usize) -> Result<RunOutcome> {
        if self.prompt.ask(CONTINUE_QUESTION, false)? {
            Ok(RunOutcome::CompletedWithErrors { failed })
        } else {
            Ok(RunOutcome::HaltedOnFailure)
        }
    }

    fn finish(&mut self, position: StepPosition, outcome: RunOutcome) -> Result<RunOutcome> {
        let tone = match outcome {
            RunOutcome::Completed => Tone::Success,
            _ => Tone::Warning,
        };
        self.console.line(&format!("<<< STEP {position} {outcome}"), tone)?;
        self.console.step_border()?;
        self.console.blank()?;
        Ok(outcome)
    }
}

/// Per-kind outcome counts for the closing line of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub completed_with_errors: usize,
    pub disabled: usize,
    pub empty: usize,
    pub skipped: usize,
    pub halted: bool,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[RunOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                RunOutcome::Completed => summary.completed += 1,
                RunOutcome::CompletedWithErrors { .. } => summary.completed_with_errors += 1,
                RunOutcome::Disabled => summary.disabled += 1,
                RunOutcome::EmptyNoop => summary.empty += 1,
                RunOutcome::SkippedByOperator => summary.skipped += 1,
                RunOutcome::HaltedOnFailure => summary.halted = true,
            }
        }
        summary
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} completed, {} with errors, {} disabled, {} empty, {} skipped",
            self.completed, self.completed_with_errors, self.disabled, self.empty, self.skipped
        )?;
        if self.halted {
            write!(f, " (halted)")?;
        }
        Ok(())
    }
}

/// Convenience wrapper: build a [`StepRunner`] and run `profile`.
pub fn run_profile<E: Execute, P: Prompt, W: Write>(
    profile: &Profile,
    executor: &mut E,
    prompt: &mut P,
    console: &mut Console<W>,
    auto_confirm: bool,
) -> Result<Vec<RunOutcome>> {
    StepRunner::new(executor, prompt, console, auto_confirm).run(profile)
}
