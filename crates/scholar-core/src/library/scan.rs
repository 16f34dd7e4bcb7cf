/*
 * library/scan.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Concurrent library scan.
//!
//! Every entry directory is read by its own task, gated by a semaphore so at
//! most [`Library::concurrency`] records are open at once. The scan returns
//! only after every task has finished. Key repair runs afterwards, one entry
//! at a time, because it shares the repair directory.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::{Library, RECORD_FILE, Reconcile};
use crate::entry::Entry;
use crate::error::Result;

/// An entry together with the name of the directory it was read from.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub dir: String,
    pub entry: Entry,
}

/// Default cap on concurrent record reads: four per available core, at
/// least four.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 4)
        .unwrap_or(4)
        .max(4)
}

async fn load_record(path: PathBuf) -> Result<Entry> {
    let data = tokio::fs::read_to_string(&path).await?;
    let mut entry: Entry = serde_yaml::from_str(&data)?;
    entry.modified = tokio::fs::metadata(&path)
        .await
        .and_then(|meta| meta.modified())
        .ok();
    Ok(entry)
}

impl Library {
    /// Reads every entry directory without touching the disk contents.
    ///
    /// Hidden directories and plain files are ignored. A directory whose
    /// record is missing or malformed is logged and skipped. Results are
    /// ordered by directory name.
    pub async fn load_entries(&self) -> Result<Vec<StoredEntry>> {
        let mut dirs = tokio::fs::read_dir(&self.root).await?;
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        while let Some(item) = dirs.next_entry().await? {
            let name = item.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            match item.file_type().await {
                Ok(file_type) if file_type.is_dir() => {}
                Ok(_) => continue,
                Err(err) => {
                    warn!(dir = %name, error = %err, "Could not stat library item, skipping");
                    continue;
                }
            }

            let record = item.path().join(RECORD_FILE);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let loaded = load_record(record).await;
                (name, loaded)
            });
        }

        let mut entries = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((dir, Ok(entry))) => entries.push(StoredEntry { dir, entry }),
                Ok((dir, Err(err))) => {
                    warn!(dir = %dir, error = %err, "Could not load entry, skipping");
                }
                Err(err) => warn!(error = %err, "Scan task failed"),
            }
        }
        entries.sort_by(|a, b| a.dir.cmp(&b.dir));

        debug!(
            root = %self.root.display(),
            count = entries.len(),
            "Scanned library"
        );
        Ok(entries)
    }

    /// Scans the library and repairs directory names that disagree with the
    /// entry key.
    ///
    /// A failed repair is logged and the entry is still returned as read.
    pub async fn entry_list(&self) -> Result<Vec<Entry>> {
        let stored = self.load_entries().await?;
        let mut entries = Vec::with_capacity(stored.len());

        for StoredEntry { dir, mut entry } in stored {
            match self.reconcile(&dir, &mut entry) {
                Ok(Reconcile::Unchanged) => {}
                Ok(Reconcile::Renamed { from, to }) => {
                    info!(from = %from, to = %to, "Repaired entry key");
                }
                Err(err) => warn!(dir = %dir, error = %err, "Could not repair entry key"),
            }
            entries.push(entry);
        }

        Ok(entries)
    }
}
