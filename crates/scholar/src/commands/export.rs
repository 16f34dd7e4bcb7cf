//! `scholar export`: print entries in a bibliography format.

use std::io::Write;

use anyhow::Result;

use scholar_core::Format;

use crate::app::App;

#[derive(Debug, Default)]
pub struct ExportArgs {
    pub query: Vec<String>,
    pub format: Format,
}

/// Writes every matching entry, sorted by key.
pub async fn execute(app: &App, args: ExportArgs, out: &mut impl Write) -> Result<usize> {
    let library = app.library()?;
    let mut entries = app.query(&library, &args.query).await?;
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    let records: Vec<String> = entries.iter().map(|entry| entry.export(args.format)).collect();
    if !records.is_empty() {
        writeln!(out, "{}", records.join(args.format.record_separator()))?;
    }
    Ok(records.len())
}
