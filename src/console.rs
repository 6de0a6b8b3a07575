//! Console narration sink.
//!
//! Everything POSTI tells the operator goes through a [`Console`]: step
//! headers, boxed panels, status lines, the profile matrix and the pre-flight
//! checklist. The console owns its writer and a [`Theme`], so color is a
//! property of the sink handed to the runner rather than process-wide state.
//! Tests use `Console<Vec<u8>>` and inspect the captured text.

use std::io::{self, Stdout, Write};

use crate::profiles::{Profile, ProfileSet};
use crate::theme::{Theme, Tone};

/// Inner width of panels, in characters.
pub const SCREEN_WIDTH: usize = 64;

const BANNER_ART: &str = r"
 ____    ___    ____   _____   ___
|  _ \  / _ \  / ___| |_   _| |_ _|
| |_) || | | | \___ \   | |    | |
|  __/ | |_| |  ___) |  | |    | |
|_|     \___/  |____/   |_|   |___|
";

/// Width of the menu's label column.
const MATRIX_NAME_WIDTH: usize = 24;

/// Line-oriented narration writer.
pub struct Console<W: Write> {
    out: W,
    theme: Theme,
}

impl Console<Stdout> {
    /// Console writing to the process stdout.
    pub fn stdout(theme: Theme) -> Self {
        Self::new(io::stdout(), theme)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self { out, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one line in the given tone.
    pub fn line(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        writeln!(self.out, "{}", self.theme.paint(text, tone))
    }

    /// Write one line without styling. Callers may embed pre-painted segments.
    pub fn raw(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn banner(&mut self) -> io::Result<()> {
        let rule = "-".repeat(SCREEN_WIDTH);
        self.line(BANNER_ART, Tone::Success)?;
        self.line("POSTI :: Post install interactive orchestrator", Tone::Strong)?;
        self.line(&rule, Tone::Accent)?;
        self.line("Booting CRT simulation... stand by", Tone::Info)?;
        self.line(&rule, Tone::Accent)
    }

    /// Separator drawn around each step.
    pub fn step_border(&mut self) -> io::Result<()> {
        self.line(&"=".repeat(SCREEN_WIDTH + 10), Tone::Accent)
    }

    /// Boxed panel: centered title, wrapped details and an optional command list.
    ///
    /// Commands are numbered only when there is more than one.
    pub fn panel(
        &mut self,
        title: &str,
        details: Option<&str>,
        commands: &[String],
    ) -> io::Result<()> {
        let border = format!("+{}+", "=".repeat(SCREEN_WIDTH));
        self.line(&border, Tone::Accent)?;
        self.line(&format!("|{title:^SCREEN_WIDTH$}|"), Tone::Strong)?;

        if let Some(details) = details {
            for text in wrap(details, SCREEN_WIDTH - 1) {
                self.panel_row(&text)?;
            }
        }

        if !commands.is_empty() {
            let heading = "COMMANDS TO RUN:";
            self.line(&format!("|{heading:<SCREEN_WIDTH$}|"), Tone::Info)?;
            for (idx, command) in commands.iter().enumerate() {
                let label = if commands.len() > 1 {
                    format!("[{}] ", idx + 1)
                } else {
                    String::new()
                };
                let entry = format!("{label}{command}");
                let mut rows = wrap(&entry, SCREEN_WIDTH - 1);
                if rows.is_empty() {
                    rows.push(entry);
                }
                for text in rows {
                    self.panel_row(&text)?;
                }
            }
        }

        self.line(&border, Tone::Accent)
    }

    fn panel_row(&mut self, text: &str) -> io::Result<()> {
        let padded = format!(" {text}");
        self.line(&format!("|{padded:<SCREEN_WIDTH$}|"), Tone::Info)
    }

    /// Numbered profile menu, `00` aborts.
    pub fn matrix(&mut self, profiles: &ProfileSet) -> io::Result<()> {
        self.blank()?;
        self.line("// TARGET MATRIX", Tone::Strong)?;
        for (idx, profile) in profiles.iter().enumerate() {
            let number = self.theme.paint(&format!("{:02}", idx + 1), Tone::Success);
            let name: String = profile.label().chars().take(MATRIX_NAME_WIDTH).collect();
            self.raw(&format!(
                "  [{number}] {name:<MATRIX_NAME_WIDTH$} :: {}",
                profile.description()
            ))?;
        }
        let exit = self.theme.paint("00", Tone::Success);
        let name = "EXIT";
        self.raw(&format!("  [{exit}] {name:<MATRIX_NAME_WIDTH$} :: Abort mission"))
    }

    /// Advisory checklist shown before the run. Nothing is printed when the
    /// profile has no pre-flight items.
    pub fn preflight(&mut self, profile: &Profile) -> io::Result<()> {
        if profile.preflight().is_empty() {
            return Ok(());
        }
        self.blank()?;
        self.line("// PRE-FLIGHT CHECKLIST", Tone::Strong)?;
        for item in profile.preflight() {
            self.raw(&format!("  - {item}"))?;
        }
        self.blank()
    }
}

/// Greedy word wrap. Words longer than `width` are broken across lines.
/// Blank text yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(word.iter());
                current_len += word.len();
                break;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            // Word alone is wider than a line.
            let rest = word.split_off(width);
            lines.push(word.iter().collect());
            word = rest;
            if word.is_empty() {
                break;
            }
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}
