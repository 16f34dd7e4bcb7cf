//! Command implementations for the Scholar CLI
//!
//! Each command module parses nothing itself: `main` builds its arguments
//! and the module drives scholar-core, writing user-facing output to the
//! given writer.

pub mod add;
pub mod check;
pub mod config;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod open;
pub mod remove;
pub mod show;
pub mod types;

use anyhow::{Result, bail};
use tracing::warn;

use scholar_core::{Conversion, Entry};

/// Splits a `field=value` assignment.
pub(crate) fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => bail!("invalid assignment {assignment:?}, expected FIELD=VALUE"),
    }
}

/// Logs the fields a conversion had to leave empty and returns the entry.
pub(crate) fn report_missing(conversion: Conversion) -> Entry {
    if let Some(missing) = &conversion.missing {
        for err in missing.chain() {
            warn!("{err}");
        }
    }
    conversion.entry
}

/// Warns about a date the checker rejects.
pub(crate) fn warn_on_date(entry: &Entry) {
    if let Err(err) = entry.check() {
        warn!(key = %entry.key, "{err}");
    }
}
