//! Profile document loading.
//!
//! A profile document is either a plain JSON file or a generated runner
//! script that carries the JSON between two marker lines:
//!
//! ```text
//! # === POSTI PROFILE DATA START ===
//! PROFILE_DATA_JSON = r"""{ ... }"""
//! # === POSTI PROFILE DATA END ===
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PostiError, Result};
use crate::profiles::ProfileSet;

pub const DATA_START_MARKER: &str = "# === POSTI PROFILE DATA START ===";
pub const DATA_END_MARKER: &str = "# === POSTI PROFILE DATA END ===";

const DATA_VARIABLE: &str = "PROFILE_DATA_JSON";
const RAW_TRIPLE_QUOTE: &str = "r\"\"\"";
const TRIPLE_QUOTE: &str = "\"\"\"";

/// Load and validate a profile document from disk.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ProfileSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    debug!(
        path = %path.display(),
        bytes = content.len(),
        "Read profile document"
    );

    let set = parse_document(&content)?;
    set.validate()?;
    Ok(set)
}

/// Parse document text: JSON first, then embedded script data.
pub fn parse_document(content: &str) -> Result<ProfileSet> {
    if content.trim_start().starts_with('{') {
        return ProfileSet::from_json_str(content);
    }
    let blob = extract_embedded_data(content).ok_or_else(|| {
        PostiError::config(
            "no embedded profile data markers found; was this file generated by POSTI?",
        )
    })?;
    ProfileSet::from_json_str(blob)
}

/// Find the JSON literal between the data markers of a generated script.
pub fn extract_embedded_data(text: &str) -> Option<&str> {
    let start = text.find(DATA_START_MARKER)? + DATA_START_MARKER.len();
    let end = start + text[start..].find(DATA_END_MARKER)?;
    let block = &text[start..end];

    let assignment = block.find(DATA_VARIABLE)? + DATA_VARIABLE.len();
    let literal = block[assignment..]
        .trim_start()
        .strip_prefix('=')?
        .trim_start()
        .strip_prefix(RAW_TRIPLE_QUOTE)?;
    let close = literal.find(TRIPLE_QUOTE)?;
    Some(&literal[..close])
}
