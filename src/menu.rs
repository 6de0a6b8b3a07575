//! Interactive profile selection.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::Result;
use crate::profiles::{Profile, ProfileSet};
use crate::prompt::ConsolePrompt;

/// What the operator typed at the profile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `0` or `00`
    Abort,
    /// Zero-based profile index
    Select(usize),
    Invalid,
}

/// Interpret a menu entry for a menu of `count` profiles numbered from 1.
pub fn parse_menu_choice(input: &str, count: usize) -> MenuChoice {
    let choice = input.trim();
    if choice == "0" || choice == "00" {
        return MenuChoice::Abort;
    }
    if choice.is_empty() || !choice.chars().all(|c| c.is_ascii_digit()) {
        return MenuChoice::Invalid;
    }
    match choice.parse::<usize>() {
        Ok(number) if (1..=count).contains(&number) => MenuChoice::Select(number - 1),
        _ => MenuChoice::Invalid,
    }
}

/// Show the profile matrix and read choices until one is valid.
///
/// Returns `None` when the operator aborts.
pub fn choose_profile<'p, R: BufRead, W: Write, O: Write>(
    profiles: &'p ProfileSet,
    console: &mut Console<O>,
    prompt: &mut ConsolePrompt<R, W>,
) -> Result<Option<&'p Profile>> {
    console.matrix(profiles)?;
    console.flush()?;
    loop {
        let input = prompt.read_line("» Select profile >")?;
        match parse_menu_choice(&input, profiles.len()) {
            MenuChoice::Abort => return Ok(None),
            MenuChoice::Select(index) => {
                if let Some(profile) = profiles.get_index(index) {
                    return Ok(Some(profile));
                }
                prompt.say("Enter a valid number.")?;
            }
            MenuChoice::Invalid => prompt.say("Enter a valid number.")?,
        }
    }
}
