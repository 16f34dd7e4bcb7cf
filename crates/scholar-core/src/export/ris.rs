/*
 * export/ris.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! RIS output.
//!
//! One `TAG  - value` line per datum, opened by `TY` and closed by `ER`.
//! Name lists become repeated `AU`/`ED` lines, page ranges become `SP`/`EP`,
//! and fields without a tag are dropped.

use std::fmt::Write;

use super::{Exporter, filled};
use crate::entry::Entry;

/// Entry type -> RIS reference type.
const TYPES: &[(&str, &str)] = &[
    ("online", "ELEC"),
    ("article", "JOUR"),
    ("thesis", "THES"),
    ("inproceedings", "CPAPER"),
    ("book", "BOOK"),
    ("inbook", "CHAP"),
    ("incollection", "CHAP"),
    ("patent", "PAT"),
    ("report", "RPRT"),
];

/// Reference type for entry types without a mapping.
const GENERIC_TYPE: &str = "GEN";

/// Field name -> RIS tag.
const TAGS: &[(&str, &str)] = &[
    ("title", "TI"),
    ("journaltitle", "JO"),
    ("booktitle", "T2"),
    ("doi", "DO"),
    ("number", "M1"),
    ("abstract", "N2"),
    ("publisher", "PB"),
    ("isbn", "SN"),
    ("issn", "SN"),
    ("ISBN", "SN"),
    ("ISSN", "SN"),
    ("url", "UR"),
    ("volume", "VL"),
];

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ris;

fn push_line(out: &mut String, tag: &str, value: &str) {
    let _ = write!(out, "\n{}  - {}", tag, value);
}

/// `2006-01-02` -> `2006/01//`, `2006` -> `2006//`.
fn ris_date(date: &str) -> String {
    let mut parts = date.split('-');
    let mut out = parts.next().unwrap_or_default().to_string();
    if let Some(month) = parts.next() {
        out.push('/');
        out.push_str(month);
    }
    out.push_str("//");
    out
}

impl Exporter for Ris {
    fn export(&self, entry: &Entry) -> String {
        let ty = lookup(TYPES, &entry.entry_type).unwrap_or(GENERIC_TYPE);
        let mut ris = format!("TY  - {}", ty);

        for (field, value) in filled(&entry.required).chain(filled(&entry.optional)) {
            match field {
                "author" => {
                    for name in value.split(" and ") {
                        push_line(&mut ris, "AU", name);
                    }
                }
                "editor" => {
                    for name in value.split(" and ") {
                        push_line(&mut ris, "ED", name);
                    }
                }
                "date" => push_line(&mut ris, "Y1", &ris_date(value)),
                "urldate" => push_line(&mut ris, "Y2", &ris_date(value)),
                "pages" => {
                    let mut pages = value.split('-').filter(|p| !p.is_empty());
                    let start = pages.next().unwrap_or(value);
                    let end = pages.last().unwrap_or(start);
                    push_line(&mut ris, "SP", start);
                    push_line(&mut ris, "EP", end);
                }
                _ => {
                    if let Some(tag) = lookup(TAGS, field) {
                        push_line(&mut ris, tag, value);
                    }
                }
            }
        }

        ris.push_str("\nER  - ");
        ris
    }
}
