//! `scholar add`: create a new entry.
//!
//! The entry starts either from a normalized work record (JSON or YAML, as a
//! metadata service would report it) or empty from a type. Field assignments
//! are applied before the entry is committed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use scholar_core::{Entry, Work};

use super::{parse_assignment, report_missing, warn_on_date};
use crate::app::App;

/// Type used when neither a type nor a work record is given.
pub const DEFAULT_TYPE: &str = "misc";

#[derive(Debug, Default)]
pub struct AddArgs {
    pub entry_type: Option<String>,
    pub work: Option<PathBuf>,
    pub set: Vec<String>,
    pub attach: Option<PathBuf>,
    pub edit: bool,
}

fn read_work(path: &Path) -> Result<Work> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("could not read work record {}", path.display()))?;
    let work = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&data)?
    } else {
        serde_yaml::from_str(&data)?
    };
    Ok(work)
}

pub fn execute(app: &App, args: AddArgs, out: &mut impl Write) -> Result<Entry> {
    let registry = app.registry();

    let attachment = match &args.attach {
        Some(path) => {
            let path = scholar_util::expand_home(path);
            if !path.is_file() {
                bail!("file '{}' not found", path.display());
            }
            Some(path)
        }
        None => None,
    };

    let mut entry = match (&args.work, &args.entry_type) {
        (Some(path), entry_type) => {
            let work = read_work(&scholar_util::expand_home(path))?;
            let entry = registry.entry_from_work(&work)?;
            match entry_type {
                Some(entry_type) => report_missing(registry.convert(&entry, entry_type)?),
                None => entry,
            }
        }
        (None, entry_type) => registry.new_entry(entry_type.as_deref().unwrap_or(DEFAULT_TYPE))?,
    };

    for assignment in &args.set {
        let (field, value) = parse_assignment(assignment)?;
        entry.set_field(field, value);
    }

    let library = app.library()?;
    let record = library.commit(&mut entry)?;
    info!(path = %record.display(), "Entry added");

    if let Some(path) = attachment {
        library.attach(&mut entry, &path)?;
    }
    if args.edit {
        entry = app.edit_entry(&library, &entry)?;
    }
    warn_on_date(&entry);

    writeln!(out, "{}", entry.bib())?;
    Ok(entry)
}
