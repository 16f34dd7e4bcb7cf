//! `scholar remove`: delete an entry and its attachment.

use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::app::App;

/// Returns whether the entry was removed.
pub async fn execute(app: &App, query: &[String], out: &mut impl Write) -> Result<bool> {
    let library = app.library()?;
    let entry = app.find_one(&library, query).await?;

    let question = format!(
        "Remove {} ({})?",
        entry.key,
        entry.field("title").unwrap_or_default()
    );
    if !app.confirm(&question)? {
        info!(key = %entry.key, "Kept entry");
        return Ok(false);
    }

    library.remove(&entry)?;
    writeln!(out, "Removed {}", entry.key)?;
    Ok(true)
}
