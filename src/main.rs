//! POSTI - Main entry point
//!
//! Selects a profile, shows its pre-flight checklist and hands it to the step
//! runner. Exit status is non-zero when a run is fatally aborted.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use posti::cli::{Cli, Commands};
use posti::config::{DryRunMode, RunConfig};
use posti::console::Console;
use posti::executor::ExecutionContext;
use posti::menu::choose_profile;
use posti::profile_file;
use posti::profiles::{Profile, ProfileSet};
use posti::prompt::{ConsolePrompt, Prompt};
use posti::runner::{RunSummary, StepRunner};
use posti::theme::{Theme, Tone, stderr_supports_color, supports_color};

/// Exit status after Ctrl-C.
const INTERRUPTED_EXIT: i32 = 130;

/// Initialize diagnostics logging on stderr
///
/// Narration owns stdout; diagnostics never interleave with it.
fn init_logging(verbose: bool, ansi: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}

fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        println!("\nInterrupted by user.");
        std::process::exit(INTERRUPTED_EXIT);
    })
    .context("Failed to install Ctrl-C handler")
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose, stderr_supports_color(cli.no_color));
    info!("POSTI starting up");

    if let Err(e) = install_interrupt_handler() {
        warn!("{e:#}");
    }

    match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("✗ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let theme = Theme::new(supports_color(cli.no_color));
    match &cli.command {
        Some(Commands::Validate { file }) => validate(file),
        Some(Commands::List) => {
            let profiles = load_profiles(cli.profiles.as_deref())?;
            let mut console = Console::stdout(theme);
            console.matrix(&profiles)?;
            Ok(ExitCode::SUCCESS)
        }
        None => run(RunConfig::from_env(&cli)),
    }
}

fn validate(path: &Path) -> Result<ExitCode> {
    info!("Validating profile document: {}", path.display());
    match profile_file::load_from_file(path) {
        Ok(profiles) => {
            let steps: usize = profiles.iter().map(|p| p.steps().len()).sum();
            println!(
                "✓ Profile document is valid: {} profile(s), {} step(s)",
                profiles.len(),
                steps
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("✗ Profile validation failed: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn load_profiles(path: Option<&Path>) -> Result<ProfileSet> {
    match path {
        Some(path) => profile_file::load_from_file(path)
            .with_context(|| format!("Failed to load profiles from {}", path.display())),
        None => ProfileSet::builtin().context("Built-in profile data is invalid"),
    }
}

fn run(config: RunConfig) -> Result<ExitCode> {
    debug!(?config, "Resolved run configuration");
    let theme = Theme::new(config.color);
    let profiles = load_profiles(config.profiles_path.as_deref())?;

    let mut console = Console::stdout(theme);
    let mut prompt = ConsolePrompt::stdio(theme);
    console.banner()?;

    let profile: &Profile = match &config.profile {
        Some(key) => profiles.get(key)?,
        None => match choose_profile(&profiles, &mut console, &mut prompt)? {
            Some(profile) => profile,
            None => {
                let farewell = "Mission aborted. Powering down POSTI console.";
                console.line(farewell, Tone::Warning)?;
                return Ok(ExitCode::SUCCESS);
            }
        },
    };

    console.blank()?;
    let loaded = format!("Loaded profile: {}", profile.label());
    console.line(&loaded, Tone::Success)?;
    console.preflight(profile)?;
    console.flush()?;

    let dry_run = match config.dry_run {
        DryRunMode::On => true,
        DryRunMode::Off => false,
        DryRunMode::Ask => prompt.ask("Enable dry-run mode?", true)?,
    };
    info!(
        profile = profile.key(),
        dry_run,
        auto_confirm = config.auto_confirm,
        "Profile selected"
    );

    let mut context = ExecutionContext::new(dry_run, config.shell.as_str());
    let result = StepRunner::new(
        &mut context,
        &mut prompt,
        &mut console,
        config.auto_confirm,
    )
    .run(profile);

    match result {
        Ok(outcomes) => {
            let summary = RunSummary::from_outcomes(&outcomes);
            console.blank()?;
            console.line(&format!("Summary: {summary}"), Tone::Strong)?;
            console.line(
                "All done. Consider launching your new shell manually when ready.",
                Tone::Success,
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_subcommand_failure() => {
            debug!("Run aborted: {e}");
            console.line(&format!("Run aborted: {e}"), Tone::Warning)?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
