//! Error handling module for POSTI
//!
//! Provides centralized error handling with proper error types using thiserror.
//! The step runner, executor, prompt and profile loader all report through
//! [`PostiError`].

use thiserror::Error;

/// Main error type for POSTI
#[derive(Error, Debug)]
pub enum PostiError {
    /// A subcommand exited with a non-zero status.
    ///
    /// `exit_code` is `-1` when the process was terminated by a signal.
    #[error("Command failed with exit code {exit_code}: {subcommand}")]
    Command { exit_code: i32, subcommand: String },

    /// The configured shell could not be started for a subcommand
    #[error("Failed to start {shell} for `{subcommand}`: {source}")]
    Spawn {
        shell: String,
        subcommand: String,
        #[source]
        source: std::io::Error,
    },

    /// The caller asked for a profile key that does not exist
    #[error("Unknown profile '{key}'. Available: {}", .available.join(", "))]
    UnknownProfile { key: String, available: Vec<String> },

    /// Invalid profile document
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console input reached end-of-file while a prompt was waiting
    #[error("Input closed while waiting for an answer")]
    PromptClosed,

    /// IO errors (terminal, profile files)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for POSTI operations
pub type Result<T> = std::result::Result<T, PostiError>;

impl PostiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a command failure for `subcommand`
    pub fn command(exit_code: i32, subcommand: impl Into<String>) -> Self {
        Self::Command {
            exit_code,
            subcommand: subcommand.into(),
        }
    }

    /// True for failures that belong to a single subcommand (non-zero exit or
    /// a shell that would not start). The runner applies recovery policy to
    /// these and propagates everything else.
    pub fn is_subcommand_failure(&self) -> bool {
        matches!(self, Self::Command { .. } | Self::Spawn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostiError::config("profile key is blank");
        assert_eq!(err.to_string(), "Configuration error: profile key is blank");

        let err = PostiError::command(2, "false");
        assert_eq!(err.to_string(), "Command failed with exit code 2: false");
    }

    #[test]
    fn test_unknown_profile_lists_available() {
        let err = PostiError::UnknownProfile {
            key: "arch".to_string(),
            available: vec!["debian".to_string(), "fedora-cli".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown profile 'arch'. Available: debian, fedora-cli"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PostiError = io_err.into();
        assert!(matches!(err, PostiError::Io(_)));
    }

    #[test]
    fn test_json_cause_rendered_once_in_context_chain() {
        let json_err = serde_json::from_str::<bool>("null").unwrap_err();
        let detail = json_err.to_string();
        let err = anyhow::Error::from(PostiError::from(json_err))
            .context("Failed to load profiles from p.json");

        let rendered = format!("{err:#}");
        assert_eq!(rendered.matches(detail.as_str()).count(), 1, "{rendered}");
        assert!(rendered.starts_with("Failed to load profiles from p.json: "));
    }

    #[test]
    fn test_subcommand_failure_classification() {
        assert!(PostiError::command(1, "false").is_subcommand_failure());

        let spawn = PostiError::Spawn {
            shell: "/nonexistent/sh".to_string(),
            subcommand: "true".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(spawn.is_subcommand_failure());

        assert!(!PostiError::PromptClosed.is_subcommand_failure());
        assert!(!PostiError::config("bad").is_subcommand_failure());
    }
}
