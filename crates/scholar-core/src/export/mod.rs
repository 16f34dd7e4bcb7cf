/*
 * export/mod.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Bibliography export.
//!
//! Each format is an [`Exporter`]: a pure function from an [`Entry`] to
//! text. Output depends only on entry content. Fields are visited in sorted
//! order (the field maps are ordered) and empty values are skipped
//! everywhere.

mod biblatex;
mod bibtex;
mod ris;

use std::fmt;
use std::str::FromStr;

pub use biblatex::Biblatex;
pub use bibtex::Bibtex;
pub use ris::Ris;

use crate::entry::Entry;

/// Renders an entry in one bibliography dialect.
pub trait Exporter {
    fn export(&self, entry: &Entry) -> String;
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Biblatex,
    Bibtex,
    Ris,
}

impl Format {
    /// Resolves a format name. Unknown names fall back to BibLaTeX.
    pub fn from_name(name: &str) -> Self {
        match name {
            "bibtex" => Format::Bibtex,
            "ris" => Format::Ris,
            _ => Format::Biblatex,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Biblatex => "biblatex",
            Format::Bibtex => "bibtex",
            Format::Ris => "ris",
        }
    }

    pub fn all() -> &'static [Format] {
        &[Format::Biblatex, Format::Bibtex, Format::Ris]
    }

    /// Separator written between consecutive records of this format.
    pub fn record_separator(&self) -> &'static str {
        match self {
            Format::Ris => "\n",
            _ => "\n\n",
        }
    }

    fn exporter(&self) -> &'static dyn Exporter {
        match self {
            Format::Biblatex => &Biblatex,
            Format::Bibtex => &Bibtex,
            Format::Ris => &Ris,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Format::from_name(s))
    }
}

/// Renders `entry` in `format`.
pub fn export(entry: &Entry, format: Format) -> String {
    format.exporter().export(entry)
}

/// Non-empty fields of a map, in field-name order.
pub(crate) fn filled<'a>(
    fields: &'a std::collections::BTreeMap<String, String>,
) -> impl Iterator<Item = (&'a str, &'a str)> {
    fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| (field.as_str(), value.as_str()))
}

/// Appends `,\n  field = {value}` to a BibTeX-style record.
pub(crate) fn push_bib_field(out: &mut String, field: &str, value: &str) {
    out.push_str(",\n  ");
    out.push_str(field);
    out.push_str(" = {");
    out.push_str(value);
    out.push('}');
}
