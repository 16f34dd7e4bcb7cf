/*
 * work.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Mapping of normalized publication metadata onto library entries.
//!
//! A [`Work`] is what a metadata service reports for a DOI, already reduced
//! to plain fields. Field names follow Crossref where they differ.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::schema::Registry;

/// A person as reported by a metadata service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, alias = "given")]
    pub first: String,
    #[serde(default, alias = "family")]
    pub last: String,
}

/// Normalized publication metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Work {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(alias = "author")]
    pub authors: Vec<Person>,
    #[serde(alias = "editor")]
    pub editors: Vec<Person>,
    pub date: String,
    #[serde(alias = "container-title")]
    pub container_title: String,
    pub volume: String,
    pub issue: String,
    pub pages: String,
    #[serde(alias = "DOI")]
    pub doi: String,
    #[serde(alias = "ISBN")]
    pub isbn: String,
    #[serde(alias = "ISSN")]
    pub issn: String,
    pub publisher: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// Joins people as `Last, First and Last2, First2`.
fn join_people(people: &[Person]) -> String {
    people
        .iter()
        .map(|p| format!("{}, {}", p.last, p.first))
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Zero-pads every `-`-separated segment of a date to two digits.
///
/// `2006-1-2` becomes `2006-01-02`. An empty date stays empty.
pub fn normalize_date(date: &str) -> Result<String> {
    if date.is_empty() {
        return Ok(String::new());
    }
    let segments = date
        .split('-')
        .map(|segment| {
            segment
                .parse::<u32>()
                .map(|n| format!("{:02}", n))
                .map_err(|_| Error::InvalidDate {
                    date: date.to_string(),
                    segment: segment.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join("-"))
}

fn put(entry: &mut Entry, field: &str, value: &str) {
    if !value.is_empty() {
        entry.set_field(field, value);
    }
}

impl Registry {
    /// Builds a new entry from metadata.
    ///
    /// Journal articles become `article`, proceedings articles become
    /// `inproceedings` and everything else is treated as an `article`.
    pub fn entry_from_work(&self, work: &Work) -> Result<Entry> {
        let mut entry = match work.kind.as_str() {
            "proceedings-article" => {
                let mut entry = self.new_entry("inproceedings")?;
                put(&mut entry, "booktitle", &work.container_title);
                put(&mut entry, "isbn", &work.isbn);
                put(&mut entry, "publisher", &work.publisher);
                entry
            }
            kind => {
                let mut entry = self.new_entry("article")?;
                put(&mut entry, "journaltitle", &work.container_title);
                if kind == "journal-article" {
                    put(&mut entry, "issn", &work.issn);
                }
                entry
            }
        };

        put(&mut entry, "author", &join_people(&work.authors));
        put(&mut entry, "editor", &join_people(&work.editors));
        put(&mut entry, "date", &normalize_date(&work.date)?);
        put(&mut entry, "title", &work.title);
        put(&mut entry, "volume", &work.volume);
        put(&mut entry, "pages", &work.pages);
        put(&mut entry, "number", &work.issue);
        put(&mut entry, "doi", &work.doi);
        put(&mut entry, "abstract", &work.abstract_text);

        debug!(kind = %work.kind, entry_type = %entry.entry_type, "Mapped work");
        Ok(entry)
    }
}
