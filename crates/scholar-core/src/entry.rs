/*
 * entry.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! The bibliographic entry record.

use std::collections::BTreeMap;
use std::time::SystemTime;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DateFormatError;
use crate::export::{Format, export};

/// One bibliographic record.
///
/// `required` holds exactly the required field set of the owning type (only
/// the values change after creation). `optional` is sparse: a missing key and
/// an empty value both mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "type", default)]
    pub entry_type: String,

    #[serde(default)]
    pub key: String,

    #[serde(rename = "req", default)]
    pub required: BTreeMap<String, String>,

    #[serde(rename = "opt", default)]
    pub optional: BTreeMap<String, String>,

    /// Attached file name, relative to the entry directory.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,

    /// Modification time of the record file, stamped at scan time.
    #[serde(skip)]
    pub modified: Option<SystemTime>,
}

impl Entry {
    /// Returns the value of a field, looking in required then optional fields.
    ///
    /// Empty values are reported as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.required
            .get(name)
            .or_else(|| self.optional.get(name))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Sets a field, writing to the required map if the field is required
    /// and to the optional map otherwise.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        match self.required.get_mut(name) {
            Some(slot) => *slot = value.into(),
            None => {
                self.optional.insert(name.to_string(), value.into());
            }
        }
    }

    /// Records an attached file name on the entry.
    pub fn attach(&mut self, file: impl Into<String>) {
        self.file = file.into();
    }

    /// Surname of the first author: everything before the first comma.
    pub fn first_author_last(&self) -> &str {
        let author = self.required.get("author").map_or("", String::as_str);
        author.split(',').next().unwrap_or_default()
    }

    /// First four characters of the date, without parsing.
    pub fn year(&self) -> &str {
        let date = self.required.get("date").map_or("", String::as_str);
        match date.char_indices().nth(4) {
            Some((end, _)) => &date[..end],
            None => date,
        }
    }

    /// The key this entry would get: the stored key, or one derived as
    /// `lowercase(first author surname) + year`.
    ///
    /// Keys name library directories, so path separators and leading dots
    /// are stripped. Does not memoize; see [`Entry::get_key`].
    pub fn derived_key(&self) -> String {
        if self.key.is_empty() {
            let key = format!("{}{}", self.first_author_last().to_lowercase(), self.year());
            path_safe(&key)
        } else {
            path_safe(&self.key)
        }
    }

    /// Returns the entry key, deriving and storing it first if unset.
    ///
    /// For example `Einstein, Albert` with date `1922-01-01` gives
    /// `einstein1922`. A key that is already set is never regenerated, only
    /// cleaned of path separators.
    pub fn get_key(&mut self) -> &str {
        let key = self.derived_key();
        if key != self.key {
            self.key = key;
        }
        &self.key
    }

    /// Checks that the date is `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
    ///
    /// Advisory: nothing in the crate refuses an entry that fails it.
    pub fn check(&self) -> Result<(), DateFormatError> {
        let date = self.required.get("date").map_or("", String::as_str);
        if is_valid_date(date) {
            Ok(())
        } else {
            Err(DateFormatError {
                date: date.to_string(),
            })
        }
    }

    /// Renders the entry in the given export format.
    pub fn export(&self, format: Format) -> String {
        export(self, format)
    }

    /// Renders the entry as BibLaTeX.
    pub fn bib(&self) -> String {
        export(self, Format::Biblatex)
    }
}
/// Drops `/` and `\` and any leading dots, so a key is a single path
/// Drops `/` and `\\` and any leading dots, so a key is a single path
/// component that stays inside its library.
fn path_safe(key: &str) -> String {
    let key: String = key.chars().filter(|ch| !matches!(ch, '/' | '\\')).collect();
    key.trim_start_matches('.').to_string()
}

fn is_valid_date(date: &str) -> bool {
    let segments: Vec<&str> = date.split('-').collect();
    let widths_ok = match segments.as_slice() {
        [year] => year.len() == 4,
        [year, month] => year.len() == 4 && month.len() == 2,
        [year, month, day] => year.len() == 4 && month.len() == 2 && day.len() == 2,
        _ => false,
    };
    if !widths_ok || !segments.iter().all(|s| s.bytes().all(|b| b.is_ascii_digit())) {
        return false;
    }

    let padded = match segments.len() {
        1 => format!("{date}-01-01"),
        2 => format!("{date}-01"),
        _ => date.to_string(),
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d").is_ok()
}
