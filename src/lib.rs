//! POSTI Library
//!
//! Core of the post-install orchestrator: a step runner that walks a profile's
//! shell steps in order, honoring enable/confirm flags, dry-run simulation and
//! the failure-recovery policy.

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod executor;
pub mod menu;
pub mod profile_file;
pub mod profiles;
pub mod prompt;
pub mod runner;
pub mod splitter;
pub mod theme;

// Re-export main types for convenience
pub use config::{DryRunMode, RunConfig};
pub use console::Console;
pub use error::{PostiError, Result};
pub use executor::{ExecutionContext, Execute};
pub use profiles::{Profile, ProfileSet, Step};
pub use prompt::{ConsolePrompt, Prompt, ScriptedPrompt};
pub use runner::{RunOutcome, RunSummary, StepRunner, run_profile};
pub use splitter::split_subcommands;
pub use theme::{Theme, Tone};
