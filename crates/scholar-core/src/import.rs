/*
 * import.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Import of BibTeX and BibLaTeX sources.

use std::collections::BTreeMap;

use biblatex::{Bibliography, ChunksExt};
use tracing::debug;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::schema::Registry;

impl Registry {
    /// Builds an entry of `type_name` from flat field values.
    ///
    /// Required fields of the type are taken from `fields` and left empty
    /// when absent. `file` becomes the attachment and everything else is
    /// kept as an optional field under its own name.
    pub fn entry_from_fields(
        &self,
        type_name: &str,
        key: &str,
        mut fields: BTreeMap<String, String>,
    ) -> Result<Entry> {
        let mut entry = self.new_entry(type_name)?;
        entry.key = key.to_string();
        if let Some(file) = fields.remove("file") {
            entry.attach(file);
        }
        for (field, slot) in entry.required.iter_mut() {
            *slot = fields.remove(field).unwrap_or_default();
        }
        entry.optional.extend(fields);
        Ok(entry)
    }

    /// Parses every record of a BibTeX or BibLaTeX source into entries.
    ///
    /// All or nothing: a syntax error fails with [`Error::Bibliography`] and a
    /// record of an unregistered type with [`Error::TypeNotFound`].
    pub fn parse_bibliography(&self, source: &str) -> Result<Vec<Entry>> {
        let bibliography =
            Bibliography::parse(source).map_err(|err| Error::Bibliography(err.to_string()))?;

        let entries = bibliography
            .iter()
            .map(|record| {
                let fields = record
                    .fields
                    .iter()
                    .map(|(name, value)| (name.to_lowercase(), value.format_verbatim()))
                    .collect();
                let type_name = record.entry_type.to_string().to_lowercase();
                self.entry_from_fields(&type_name, &record.key, fields)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = entries.len(), "Parsed bibliography");
        Ok(entries)
    }
}
