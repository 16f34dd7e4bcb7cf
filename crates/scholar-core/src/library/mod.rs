/*
 * library/mod.rs
 * Copyright (c) 2025 Scholar Developers
 *
 * On-disk library of entries.
 */

//! On-disk library of entries.
//!
//! A library is a directory with one subdirectory per entry, named after the
//! entry key. Each subdirectory holds the serialized record
//! ([`RECORD_FILE`]) and optionally one attached file:
//!
//! ```text
//! ~/ScholarLibrary/
//! ├── einstein1922/
//! │   ├── entry.yaml
//! │   └── einstein1922_the_meaning_of_relativity.pdf
//! └── bohr1913/
//!     └── entry.yaml
//! ```
//!
//! Single-user: there is no locking beyond the rename used by key repair.

mod key;
mod scan;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::entry::Entry;
use crate::error::{Error, Result};

pub use key::key_suffix;
pub use scan::{StoredEntry, default_concurrency};

/// Name of the record file inside each entry directory.
pub const RECORD_FILE: &str = "entry.yaml";

/// Directory name used to move an entry aside during key repair.
const REPAIR_DIR: &str = ".tmp.scholar";

/// Attachment titles are cut to this many characters.
const ATTACHMENT_TITLE_LEN: usize = 40;

/// Result of reconciling a directory name with its entry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconcile {
    /// The directory already carried the entry key.
    Unchanged,
    /// The directory was renamed to the (possibly disambiguated) key.
    Renamed { from: String, to: String },
}

/// A library rooted at a resolved directory.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
    concurrency: usize,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            concurrency: default_concurrency(),
        }
    }

    /// Caps the number of records read at the same time during a scan.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Directory of an entry (by its key, derived if unset).
    pub fn entry_dir(&self, entry: &Entry) -> PathBuf {
        self.root.join(entry.derived_key())
    }

    /// Path of an entry's record file.
    pub fn record_path(&self, entry: &Entry) -> PathBuf {
        self.entry_dir(entry).join(RECORD_FILE)
    }

    /// Path of an entry's attachment, if it has one.
    pub fn file_path(&self, entry: &Entry) -> Option<PathBuf> {
        if entry.file.is_empty() {
            None
        } else {
            Some(self.entry_dir(entry).join(&entry.file))
        }
    }

    /// Reads the record stored in the directory `dir_name`.
    pub fn read_entry(&self, dir_name: &str) -> Result<Entry> {
        let path = self.root.join(dir_name.trim()).join(RECORD_FILE);
        let data = fs::read_to_string(&path)?;
        let mut entry: Entry = serde_yaml::from_str(&data)?;
        entry.modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
        Ok(entry)
    }

    /// Stores a new entry under a unique key.
    ///
    /// The key is derived if unset and disambiguated against existing
    /// directories. Returns the path of the written record.
    pub fn commit(&self, entry: &mut Entry) -> Result<PathBuf> {
        let key = self.unique_key(entry.get_key());
        entry.key = key;
        fs::create_dir_all(self.entry_dir(entry))?;
        let path = self.write_record(entry)?;
        info!(key = %entry.key, path = %path.display(), "Committed entry");
        Ok(path)
    }

    /// Rewrites the record of an existing entry.
    pub fn update(&self, entry: &Entry) -> Result<PathBuf> {
        self.write_record(entry)
    }

    fn write_record(&self, entry: &Entry) -> Result<PathBuf> {
        let path = self.record_path(entry);
        let data = serde_yaml::to_string(entry)?;
        fs::write(&path, data)?;
        debug!(path = %path.display(), "Wrote record");
        Ok(path)
    }

    /// Deletes an entry directory with everything in it.
    pub fn remove(&self, entry: &Entry) -> Result<PathBuf> {
        let dir = self.entry_dir(entry);
        fs::remove_dir_all(&dir)?;
        info!(path = %dir.display(), "Removed entry");
        Ok(dir)
    }

    /// Copies `source` into the entry directory and records it on the entry.
    ///
    /// The copy is named `<key>_<title>.<ext>`, with the title sanitised and
    /// cut to 40 characters. Returns the destination path.
    pub fn attach(&self, entry: &mut Entry, source: &Path) -> Result<PathBuf> {
        let key = entry.get_key().to_string();
        let title: String = scholar_util::clean_filename(entry.field("title").unwrap_or_default())
            .chars()
            .take(ATTACHMENT_TITLE_LEN)
            .collect();
        let ext = source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let filename = format!("{}_{}{}", key, title, ext);

        let dest = self.entry_dir(entry).join(&filename);
        let bytes = fs::copy(source, &dest)?;
        info!(bytes, path = %dest.display(), "Attached file");

        entry.attach(filename);
        self.update(entry)?;
        Ok(dest)
    }

    /// A free name to move a directory aside to during key repair.
    ///
    /// Leftovers of an interrupted repair are skipped, not reused.
    fn repair_slot(&self) -> PathBuf {
        let slot = self.root.join(REPAIR_DIR);
        if !slot.exists() {
            return slot;
        }
        warn!(path = %slot.display(), "Stale repair directory, leaving it alone");
        (1..)
            .map(|n| self.root.join(format!("{}{}", REPAIR_DIR, key_suffix(n))))
            .find(|path| !path.exists())
            .unwrap_or(slot)
    }

    /// Makes the directory name of an entry equal to its key.
    ///
    /// When they differ, the directory is moved aside, a unique key is chosen
    /// for the entry, the directory is renamed to it and the record is
    /// rewritten. Running it again on the result reports
    /// [`Reconcile::Unchanged`].
    pub fn reconcile(&self, dir_name: &str, entry: &mut Entry) -> Result<Reconcile> {
        if dir_name == entry.get_key() {
            return Ok(Reconcile::Unchanged);
        }

        let from = self.root.join(dir_name);
        let aside = self.repair_slot();
        fs::rename(&from, &aside).map_err(|source| Error::KeyConflict {
            from: from.clone(),
            to: aside.clone(),
            source,
        })?;

        let key = self.unique_key(entry.get_key());
        let to = self.root.join(&key);
        if let Err(source) = fs::rename(&aside, &to) {
            // Put the directory back where it was.
            let _ = fs::rename(&aside, &from);
            return Err(Error::KeyConflict { from, to, source });
        }

        entry.key = key.clone();
        self.update(entry)?;
        info!(from = %dir_name, to = %key, "Renamed entry directory");

        Ok(Reconcile::Renamed {
            from: dir_name.to_string(),
            to: key,
        })
    }
}
