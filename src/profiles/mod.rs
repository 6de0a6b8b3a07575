//! Profile and step model.
//!
//! Profiles arrive as loosely-typed JSON records (every field optional). They
//! are turned into [`Step`], [`Profile`] and [`ProfileSet`] once, at
//! construction, applying the defaulting rules below, so the runner never has
//! to second-guess a field:
//!
//! | Field                 | Default |
//! |-----------------------|---------|
//! | `step.title`          | `"Unnamed step"` when missing or blank |
//! | `step.description`    | none when missing or blank |
//! | `step.command`        | `""` (an empty step, nothing runs) |
//! | `step.confirm`        | `false` |
//! | `step.enabled`        | `true` |
//! | `profile.label`       | the profile key |
//! | `profile.description` | `""` |
//! | `profile.preflight`   | `[]` |
//! | `profile.steps`       | `[]` |

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{PostiError, Result};

/// Title used when a step has none.
pub const UNNAMED_STEP: &str = "Unnamed step";

/// Profile data compiled into the binary, used when no profile file is given.
const BUILTIN_PROFILES: &str = include_str!("builtin.json");

// ============================================================================
// Step
// ============================================================================

/// One unit of work: a titled shell command plus enable/confirm flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "StepRecord")]
pub struct Step {
    title: String,
    description: Option<String>,
    command: String,
    confirm: bool,
    enabled: bool,
}

impl Step {
    /// Create an enabled, unconfirmed step.
    pub fn new(title: &str, command: &str) -> Self {
        Self {
            title: normalize_title(title),
            description: None,
            command: command.to_string(),
            confirm: false,
            enabled: true,
        }
    }

    /// Set the description; blank text clears it.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = non_blank(description);
        self
    }

    /// Require operator confirmation before running.
    pub fn with_confirm(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Raw command text, possibly empty or chained with `&&`.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn confirm(&self) -> bool {
        self.confirm
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

fn normalize_title(title: &str) -> String {
    match title.trim() {
        "" => UNNAMED_STEP.to_string(),
        _ => title.to_string(),
    }
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Wire shape of a step; every field is optional and `null` means absent.
#[derive(Debug, Deserialize)]
struct StepRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    confirm: Option<bool>,
    #[serde(default)]
    enabled: Option<bool>,
}

impl From<StepRecord> for Step {
    fn from(record: StepRecord) -> Self {
        Step::new(
            record.title.as_deref().unwrap_or_default(),
            record.command.as_deref().unwrap_or_default(),
        )
        .with_description(record.description.as_deref().unwrap_or_default())
        .with_confirm(record.confirm.unwrap_or(false))
        .with_enabled(record.enabled.unwrap_or(true))
    }
}

// ============================================================================
// Profile
// ============================================================================

/// A named, ordered list of steps plus descriptive metadata.
///
/// Step order is execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    key: String,
    label: String,
    description: String,
    preflight: Vec<String>,
    steps: Vec<Step>,
}

impl Profile {
    /// Build a profile; a blank label falls back to the key.
    pub fn new(
        key: &str,
        label: &str,
        description: &str,
        preflight: Vec<String>,
        steps: Vec<Step>,
    ) -> Self {
        let label = if label.trim().is_empty() { key } else { label };
        Self {
            key: key.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            preflight,
            steps,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Advisory checklist for the operator. Never executed.
    pub fn preflight(&self) -> &[String] {
        &self.preflight
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Wire shape of a profile. The key lives in the enclosing document map.
#[derive(Debug, Deserialize)]
struct ProfileRecord {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    preflight: Vec<String>,
    #[serde(default)]
    steps: Vec<Step>,
}

impl ProfileRecord {
    fn into_profile(self, key: &str) -> Profile {
        Profile::new(
            key,
            self.label.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            self.preflight,
            self.steps,
        )
    }
}

// ============================================================================
// ProfileSet
// ============================================================================

/// Ordered mapping of profile key to profile. Document order is menu order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSet {
    profiles: IndexMap<String, Profile>,
}

impl ProfileSet {
    /// Parse a profile document: a JSON object of `key -> profile`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: IndexMap<String, ProfileRecord> = serde_json::from_str(json)?;
        Ok(records
            .into_iter()
            .map(|(key, record)| record.into_profile(&key))
            .collect())
    }

    /// The profiles compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_PROFILES)
    }

    /// Add or replace a profile, keeping the original position on replace.
    pub fn insert(&mut self, profile: Profile) {
        self.profiles.insert(profile.key().to_string(), profile);
    }

    /// Look up a profile by key.
    pub fn get(&self, key: &str) -> Result<&Profile> {
        self.profiles
            .get(key)
            .ok_or_else(|| PostiError::UnknownProfile {
                key: key.to_string(),
                available: self.sorted_keys(),
            })
    }

    /// Profile at a zero-based menu position.
    pub fn get_index(&self, index: usize) -> Option<&Profile> {
        self.profiles.get_index(index).map(|(_, profile)| profile)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.profiles.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Check document-level rules that defaulting cannot repair.
    ///
    /// Empty profiles and empty step commands are legal; they narrate as
    /// "nothing to execute".
    pub fn validate(&self) -> Result<()> {
        if self.profiles.is_empty() {
            return Err(PostiError::config("document contains no profiles"));
        }
        for key in self.profiles.keys() {
            if key.trim().is_empty() {
                return Err(PostiError::config("profile key must not be blank"));
            }
            if key.chars().any(char::is_whitespace) {
                return Err(PostiError::config(format!(
                    "profile key '{key}' must not contain whitespace"
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<Profile> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = Profile>>(iter: I) -> Self {
        let mut set = ProfileSet::default();
        for profile in iter {
            set.insert(profile);
        }
        set
    }
}

// ============================================================================
// Tests
// ============================================================================
