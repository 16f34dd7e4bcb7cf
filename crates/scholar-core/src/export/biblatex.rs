/*
 * export/biblatex.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! BibLaTeX output.

use super::{Exporter, filled, push_bib_field};
use crate::entry::Entry;

/// `@type{key,\n  field = {value},...\n}` with fields in this order:
/// required (sorted), optional (sorted, except `abstract`), `abstract`,
/// then `file`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Biblatex;

impl Exporter for Biblatex {
    fn export(&self, entry: &Entry) -> String {
        let mut bib = format!("@{}{{{}", entry.entry_type, entry.derived_key());

        for (field, value) in filled(&entry.required) {
            push_bib_field(&mut bib, field, value);
        }
        for (field, value) in filled(&entry.optional) {
            if field != "abstract" {
                push_bib_field(&mut bib, field, value);
            }
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
