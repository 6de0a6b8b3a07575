//! Centralized palette for the console narration
//!
//! This module is the single source of truth for the colors used when POSTI
//! narrates a run. Components ask for a semantic [`Tone`] and the theme decides
//! the concrete color, so nothing else hardcodes escape sequences.
//!
//! # Usage
//! ```rust
//! use posti::theme::{Theme, Tone};
//!
//! let theme = Theme::new(false);
//! assert_eq!(theme.paint("plain", Tone::Success), "plain");
//! ```

use crossterm::style::{Attribute, Color, Stylize};
use crossterm::tty::IsTty;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Completed steps, step banners, menu numbers
    pub const SUCCESS: Color = Color::Green;

    /// Panel bodies, commands about to run
    pub const INFO: Color = Color::Cyan;

    /// Borders and prompts
    pub const ACCENT: Color = Color::Magenta;

    /// Skips, failures, halts
    pub const WARNING: Color = Color::Yellow;
}

// =============================================================================
// SEMANTIC TONES
// =============================================================================

/// Semantic role of a piece of narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Accent,
    Warning,
    /// Bold, no color change
    Strong,
}

/// Formatter turning text + tone into (optionally) colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Plain text theme, used by tests and `--no-color`.
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Render `text` in the given tone.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Success => text.with(Colors::SUCCESS).to_string(),
            Tone::Info => text.with(Colors::INFO).to_string(),
            Tone::Accent => text.with(Colors::ACCENT).to_string(),
            Tone::Warning => text.with(Colors::WARNING).to_string(),
            Tone::Strong => text.attribute(Attribute::Bold).to_string(),
        }
    }
}

/// Decide whether stdout narration should be colored.
///
/// Precedence: an explicit `--no-color` wins, then `NO_COLOR`, then
/// `FORCE_COLOR`, and finally whether stdout is a terminal.
pub fn supports_color(no_color_flag: bool) -> bool {
    color_from_env(no_color_flag, std::io::stdout().is_tty())
}

/// Same decision for the diagnostics log, which is written to stderr.
pub fn stderr_supports_color(no_color_flag: bool) -> bool {
    color_from_env(no_color_flag, std::io::stderr().is_tty())
}

fn color_from_env(no_color_flag: bool, is_tty: bool) -> bool {
    detect_color(
        no_color_flag,
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var_os("FORCE_COLOR").is_some(),
        is_tty,
    )
}

fn detect_color(no_color_flag: bool, no_color_env: bool, force_color: bool, is_tty: bool) -> bool {
    if no_color_flag || no_color_env {
        return false;
    }
    force_color || is_tty
}
