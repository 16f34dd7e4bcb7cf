//! `scholar edit`: change the type of an entry, attach a file to it, or
//! edit its record by hand.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};

use scholar_core::Entry;

use super::{report_missing, warn_on_date};
use crate::app::App;

#[derive(Debug, Default)]
pub struct EditArgs {
    pub query: Vec<String>,
    pub entry_type: Option<String>,
    pub attach: Option<PathBuf>,
}

pub async fn execute(app: &App, args: EditArgs, out: &mut impl Write) -> Result<Entry> {
    let library = app.library()?;
    let mut entry = app.find_one(&library, &args.query).await?;

    if let Some(path) = &args.attach {
        let path = scholar_util::expand_home(path);
        if !path.is_file() {
            bail!("file '{}' not found", path.display());
        }
        let dest = library.attach(&mut entry, &path)?;
        writeln!(out, "Attached {}", dest.display())?;
        return Ok(entry);
    }

    if let Some(entry_type) = &args.entry_type {
        entry = report_missing(app.registry().convert(&entry, entry_type)?);
        library.update(&entry)?;
    }

    let entry = app.edit_entry(&library, &entry)?;
    warn_on_date(&entry);
    writeln!(out, "{}", entry.bib())?;
    Ok(entry)
}
