//! Command splitting.
//!
//! A step's raw command text is turned into the ordered list of subcommands
//! the runner executes one by one. Only plain `a && b && c` chains are split;
//! anything that pipes or sequences (`|`, `;`, newline) is handed to the shell
//! untouched so its meaning is never changed.

/// Token joining subcommands that must run in sequence.
pub const CHAIN_OPERATOR: &str = "&&";

/// Characters that make a command composite. Their presence disables splitting.
const COMPOSITE_MARKERS: [char; 3] = ['|', ';', '\n'];

/// Split raw command text into ordered subcommands.
///
/// - Blank input yields no subcommands.
/// - Text without `&&`, or containing a pipe, semicolon or newline, is one
///   opaque subcommand.
/// - Otherwise the text is split on `&&` and empty pieces are dropped; if
///   fewer than two pieces remain the trimmed text is returned whole.
pub fn split_subcommands(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if !trimmed.contains(CHAIN_OPERATOR) || trimmed.contains(COMPOSITE_MARKERS) {
        return vec![trimmed.to_string()];
    }

    let parts: Vec<String> = trimmed
        .split(CHAIN_OPERATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if parts.len() > 1 {
        parts
    } else {
        vec![trimmed.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_input() {
        assert!(split_subcommands("").is_empty());
        assert!(split_subcommands("   \t ").is_empty());
    }

    #[test]
    fn test_single_command_is_trimmed() {
        assert_eq!(
            split_subcommands("  sudo dnf update  "),
            vec!["sudo dnf update"]
        );
    }

    #[test]
    fn test_chain_is_split_in_order() {
        assert_eq!(split_subcommands("a && b && c"), vec!["a", "b", "c"]);
        assert_eq!(
            split_subcommands("mkdir ~/.config&&mkdir ~/.config/git"),
            vec!["mkdir ~/.config", "mkdir ~/.config/git"]
        );
    }

    #[test]
    fn test_pipe_prevents_split() {
        assert_eq!(split_subcommands("a | b && c"), vec!["a | b && c"]);
        // `||` contains a pipe too
        assert_eq!(split_subcommands("a || b && c"), vec!["a || b && c"]);
    }

    #[test]
    fn test_semicolon_and_newline_prevent_split() {
        assert_eq!(split_subcommands("a; b && c"), vec!["a; b && c"]);
        assert_eq!(split_subcommands("a &&\nb"), vec!["a &&\nb"]);
    }

    #[test]
    fn test_degenerate_chain_falls_back_to_whole_text() {
        assert_eq!(split_subcommands("a &&"), vec!["a &&"]);
        assert_eq!(split_subcommands("&& a"), vec!["&& a"]);
        assert_eq!(split_subcommands("&&"), vec!["&&"]);
    }

    #[test]
    fn test_empty_pieces_are_dropped() {
        assert_eq!(split_subcommands("a && && b"), vec!["a", "b"]);
        assert_eq!(split_subcommands("a && b &&"), vec!["a", "b"]);
    }
}
