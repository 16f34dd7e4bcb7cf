//! File-name sanitising for attachments.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of characters that are neither ASCII alphanumeric nor whitespace.
static SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^[:alnum:][:space:]]+").unwrap());

/// Turn free text (usually a title) into a lowercase file-name fragment.
///
/// Each run of symbols becomes a single space, then every space becomes `_`.
pub fn clean_filename(text: &str) -> String {
    SYMBOLS.replace_all(text, " ").replace(' ', "_").to_lowercase()
}
