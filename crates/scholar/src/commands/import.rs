//! `scholar import`: add every entry of a BibTeX or BibLaTeX file.
//!
//! The whole file is parsed before anything is written, so a bad record
//! leaves the library untouched.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use scholar_core::Entry;

use super::warn_on_date;
use crate::app::App;

#[derive(Debug, Default)]
pub struct ImportArgs {
    pub file: PathBuf,
    /// Library to import into instead of the selected one.
    pub to: Option<String>,
}

pub fn execute(app: &App, args: ImportArgs, out: &mut impl Write) -> Result<Vec<Entry>> {
    let path = scholar_util::expand_home(&args.file);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let mut entries = app
        .registry()
        .parse_bibliography(&source)
        .with_context(|| format!("could not import {}", path.display()))?;

    let library = app.library_named(args.to.as_deref())?;
    for entry in &mut entries {
        library.commit(entry)?;
        warn_on_date(entry);
    }
    info!(count = entries.len(), library = %library.root().display(), "Imported entries");

    writeln!(out, "Imported {} entries from {}", entries.len(), path.display())?;
    Ok(entries)
}
