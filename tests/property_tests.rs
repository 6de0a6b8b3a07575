//! Property-Based Tests for POSTI
//!
//! Uses proptest for invariants of the command splitter and answer parsing.

use proptest::prelude::*;

use posti::prompt::interpret_answer;
use posti::splitter::{CHAIN_OPERATOR, split_subcommands};

/// Simple subcommand text: no operators, no separators, not blank.
fn subcommand_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 ./~-]{0,20}".prop_map(|s| s.trim().to_string())
}

proptest! {
    /// Chains of simple subcommands split back into exactly those subcommands.
    #[test]
    fn chain_split_preserves_order(parts in prop::collection::vec(subcommand_strategy(), 2..6)) {
        let raw = parts.join(" && ");
        prop_assert_eq!(split_subcommands(&raw), parts);
    }

    /// No piece of a split is ever empty or untrimmed.
    #[test]
    fn split_pieces_are_trimmed_and_non_empty(raw in "[a-z &|;]{0,40}") {
        for piece in split_subcommands(&raw) {
            prop_assert!(!piece.is_empty());
            prop_assert_eq!(piece.trim(), piece.as_str());
        }
    }

    /// Text containing a pipe, semicolon or newline is never split.
    #[test]
    fn composite_text_is_opaque(
        left in subcommand_strategy(),
        right in subcommand_strategy(),
        sep in prop_oneof![Just("|"), Just(";"), Just("\n")],
    ) {
        let raw = format!("{left} {sep} {right} && {left}");
        let trimmed = raw.trim().to_string();
        prop_assert_eq!(split_subcommands(&raw), vec![trimmed]);
    }

    /// Without the chain operator the result is the trimmed text, or nothing.
    #[test]
    fn text_without_operator_is_single(raw in "[a-z |;]{0,30}") {
        prop_assume!(!raw.contains(CHAIN_OPERATOR));
        let result = split_subcommands(&raw);
        if raw.trim().is_empty() {
            prop_assert!(result.is_empty());
        } else {
            prop_assert_eq!(result, vec![raw.trim().to_string()]);
        }
    }

    /// Splitting never loses the only subcommand to a trailing operator.
    #[test]
    fn trailing_operator_keeps_whole_text(cmd in subcommand_strategy()) {
        let raw = format!("{cmd} &&");
        prop_assert_eq!(split_subcommands(&raw), vec![raw.clone()]);
    }

    /// Unrecognized answers never resolve; recognized ones ignore case.
    #[test]
    fn answer_parsing(word in "[a-zA-Z]{1,5}", default in any::<bool>()) {
        let lower = word.to_lowercase();
        let expected = match lower.as_str() {
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        };
        prop_assert_eq!(interpret_answer(&word, default), expected);
    }
}
