/*
 * export/bibtex.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! BibTeX output.
//!
//! BibTeX predates several BibLaTeX fields and types, so names go through a
//! fixed dictionary, dates are split into `year` and `month`, and `url` /
//! `urldate` are folded into a single `howpublished` field.

use super::{Exporter, filled, push_bib_field};
use crate::entry::Entry;

/// BibLaTeX type or field name -> BibTeX name.
const DICT: &[(&str, &str)] = &[
    ("report", "techreport"),
    ("online", "misc"),
    ("patent", "misc"),
    ("langid", "language"),
    ("location", "address"),
    ("journaltitle", "journal"),
    ("institution", "school"),
];

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Bibtex;

impl Bibtex {
    fn rename(name: &str) -> &str {
        DICT.iter()
            .find(|(from, _)| *from == name)
            .map_or(name, |(_, to)| *to)
    }
}

/// Three-letter abbreviation for a `01`..`12` month number.
fn month_text(month: &str) -> Option<&'static str> {
    if month.len() != 2 {
        return None;
    }
    let index: usize = month.parse().ok()?;
    MONTHS.get(index.checked_sub(1)?).copied()
}

/// Accumulates the pieces of the synthetic `howpublished` field.
#[derive(Default)]
struct HowPublished<'a> {
    explicit: Option<&'a str>,
    url: Option<&'a str>,
    urldate: Option<&'a str>,
}

impl HowPublished<'_> {
    fn render(&self) -> Option<String> {
        let reference = self.url.map(|url| {
            let mut text = format!("\\textsc{{url:}} \\url{{{}}}", url);
            if let Some(date) = self.urldate {
                text.push_str(&format!(" (accessed {})", date));
            }
            text
        });
        match (self.explicit, reference) {
            (Some(explicit), Some(reference)) => Some(format!("{}, {}", explicit, reference)),
            (Some(explicit), None) => Some(explicit.to_string()),
            (None, reference) => reference,
        }
    }
}

impl Exporter for Bibtex {
    fn export(&self, entry: &Entry) -> String {
        let mut bib = format!(
            "@{}{{{}",
            Self::rename(&entry.entry_type),
            entry.derived_key()
        );
        let mut how = HowPublished::default();

        let fields = filled(&entry.required).chain(
            filled(&entry.optional).filter(|(field, _)| *field != "abstract"),
        );
        for (field, value) in fields {
            match field {
                "date" => {
                    let mut parts = value.split('-');
                    if let Some(year) = parts.next() {
                        push_bib_field(&mut bib, "year", year);
                    }
                    if let Some(month) = parts.next().and_then(month_text) {
                        push_bib_field(&mut bib, "month", month);
                    }
                }
                "url" => how.url = Some(value),
                "urldate" => how.urldate = Some(value),
                "howpublished" => how.explicit = Some(value),
                _ => push_bib_field(&mut bib, Self::rename(field), value),
            }
        }

        if let Some(value) = how.render() {
            push_bib_field(&mut bib, "howpublished", &value);
        }
        if let Some(value) = entry.optional.get("abstract").filter(|v| !v.is_empty()) {
            push_bib_field(&mut bib, "abstract", value);
        }
        if !entry.file.is_empty() {
            push_bib_field(&mut bib, "file", &entry.file);
        }

        bib.push_str("\n}");
        bib
    }
}
