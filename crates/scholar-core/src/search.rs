/*
 * search.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Term search and sorting over a list of entries.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::entry::Entry;
use crate::library::default_concurrency;

/// Splits free query text into search terms on whitespace.
pub fn split_query(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// Lowercases and strips every whitespace character.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn haystack(parts: &[&str]) -> String {
    parts.iter().map(|part| normalize(part)).collect()
}

/// Matches a term against title, author and key.
pub fn matches_key(term: &str, entry: &Entry) -> bool {
    let key = entry.derived_key();
    let hay = haystack(&[
        entry.field("title").unwrap_or_default(),
        entry.field("author").unwrap_or_default(),
        &key,
    ]);
    hay.contains(&normalize(term))
}

/// Matches a term against title, author and attachment file name.
pub fn matches_file(term: &str, entry: &Entry) -> bool {
    let hay = haystack(&[
        entry.field("title").unwrap_or_default(),
        entry.field("author").unwrap_or_default(),
        &entry.file,
    ]);
    hay.contains(&normalize(term))
}

/// Entries for which `predicate` holds for every term, in input order.
///
/// The list is split into chunks that are filtered by concurrent tasks; the
/// call returns once all of them are done. No terms matches everything.
pub async fn search<P>(terms: &[String], entries: Vec<Entry>, predicate: P) -> Vec<Entry>
where
    P: Fn(&str, &Entry) -> bool + Send + Sync + 'static,
{
    if terms.is_empty() || entries.is_empty() {
        return entries;
    }

    let total = entries.len();
    let chunk_size = total.div_ceil(default_concurrency()).max(1);
    let terms: Arc<[String]> = terms.into();
    let predicate = Arc::new(predicate);
    let mut tasks = JoinSet::new();

    let mut remaining = entries.into_iter();
    for index in 0usize.. {
        let chunk: Vec<Entry> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let terms = Arc::clone(&terms);
        let predicate = Arc::clone(&predicate);
        tasks.spawn(async move {
            let hits: Vec<Entry> = chunk
                .into_iter()
                .filter(|entry| terms.iter().all(|term| (*predicate)(term.as_str(), entry)))
                .collect();
            (index, hits)
        });
    }

    let mut chunks = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(chunk) => chunks.push(chunk),
            Err(err) => warn!(error = %err, "Search task failed"),
        }
    }
    chunks.sort_by_key(|(index, _)| *index);

    let found: Vec<Entry> = chunks.into_iter().flat_map(|(_, hits)| hits).collect();
    debug!(total, found = found.len(), terms = ?terms, "Searched entries");
    found
}

/// Sort order for entry listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Most recently modified record first.
    #[default]
    Modified,
    /// Ascending by the value of a required field.
    Field(String),
}

impl SortBy {
    /// `"modified"` (or empty) sorts by modification time; anything else
    /// names a required field.
    pub fn parse(name: &str) -> Self {
        match name {
            "" | "modified" => SortBy::Modified,
            field => SortBy::Field(field.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SortBy::Modified => "modified",
            SortBy::Field(field) => field,
        }
    }

    /// The next order in the cycle modified, title, author, date.
    pub fn next(&self) -> SortBy {
        match self.name() {
            "modified" => SortBy::Field("title".into()),
            "title" => SortBy::Field("author".into()),
            "author" => SortBy::Field("date".into()),
            _ => SortBy::Modified,
        }
    }

    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortBy::Modified => b.modified.cmp(&a.modified),
            SortBy::Field(field) => field_value(a, field).cmp(field_value(b, field)),
        }
    }
}

fn field_value<'a>(entry: &'a Entry, field: &str) -> &'a str {
    entry.required.get(field).map_or("", String::as_str)
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable sort, so equal entries keep their relative order.
pub fn sort_entries(entries: &mut [Entry], sort_by: &SortBy) {
    entries.sort_by(|a, b| sort_by.compare(a, b));
}
