//! `scholar check`: report entries whose date is not `YYYY[-MM[-DD]]`.

use std::io::Write;

use anyhow::Result;

use crate::app::App;

/// Returns the keys that failed the check.
pub async fn execute(app: &App, query: &[String], out: &mut impl Write) -> Result<Vec<String>> {
    let library = app.library()?;
    let mut entries = app.query(&library, query).await?;
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    let mut failed = Vec::new();
    for entry in &entries {
        if let Err(err) = entry.check() {
            writeln!(out, "{}: {}", entry.key, err)?;
            failed.push(entry.key.clone());
        }
    }

    if failed.is_empty() {
        writeln!(out, "All {} entries have valid dates", entries.len())?;
    } else {
        writeln!(out, "{} of {} entries have invalid dates", failed.len(), entries.len())?;
    }
    Ok(failed)
}
