//! Extraction of returned directory-entry names from a capture log.

use once_cell::sync::Lazy;
use regex::Regex;

/// A `searchResEntry` marker paired with the nearest following quoted value.
///
/// The lazy span keeps each marker from reaching past its own value to the
/// last quote in the log.
static ENTRY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)searchResEntry.*?"(.*?)""#).unwrap());

/// Collect entry names in order of appearance.
///
/// Duplicates are kept. A marker with no quoted value before the next marker
/// shares that later value and the skipped marker yields nothing. Quotes are
/// not unescaped; a capture ends at the first `"`.
pub fn extract_entries(text: &str) -> Vec<String> {
    let entries: Vec<String> = ENTRY_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    tracing::debug!(count = entries.len(), "Extracted search result entries");
    entries
}
