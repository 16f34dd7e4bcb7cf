/*
 * schema.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Entry type schemas and the registry that owns them.
//!
//! A schema source is a YAML mapping of type name to its description and
//! field sets:
//!
//! ```yaml
//! article:
//!   desc: An article in a journal.
//!   req:
//!     author: Author(s) of the article.
//!     title: Title of the article.
//!   opt:
//!     doi: DOI code of the article.
//! ```
//!
//! The registry is built once by the composition root and passed by
//! reference to everything that needs schema lookups.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::Entry;
use crate::error::{Error, Result};

/// Bundled BibLaTeX schema used when no types file is configured.
pub const DEFAULT_TYPES: &str = include_str!("../resources/types.yaml");

/// A named record type: what an entry of this type must and may contain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryType {
    /// Filled in from the mapping key at load time.
    #[serde(skip)]
    pub name: String,

    #[serde(rename = "desc", default)]
    pub description: String,

    /// Required field name -> human-readable description.
    #[serde(rename = "req", default)]
    pub required: BTreeMap<String, String>,

    /// Optional field name -> human-readable description.
    #[serde(rename = "opt", default)]
    pub optional: BTreeMap<String, String>,
}

impl EntryType {
    /// Returns an entry of this type with every field present and empty.
    pub fn instantiate(&self) -> Entry {
        Entry {
            entry_type: self.name.clone(),
            required: self
                .required
                .keys()
                .map(|field| (field.clone(), String::new()))
                .collect(),
            optional: self
                .optional
                .keys()
                .map(|field| (field.clone(), String::new()))
                .collect(),
            ..Entry::default()
        }
    }

    fn write_info(&self, w: &mut impl Write, level: u8) -> io::Result<()> {
        writeln!(w, "{}: {}", self.name, self.description)?;
        if level > 0 {
            for (field, desc) in &self.required {
                writeln!(w, "  {} -> {}", field, desc)?;
            }
        }
        if level > 1 {
            for (field, desc) in &self.optional {
                writeln!(w, "     ({}) -> {}", field, desc)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} (req: {}, opt: {})",
            self.name,
            self.required.len(),
            self.optional.len()
        )
    }
}

/// All entry types known to the process, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: BTreeMap<String, EntryType>,
}

impl Registry {
    /// Parses a registry from a YAML schema source.
    pub fn from_reader(source: impl Read) -> Result<Self> {
        let mut registry = Registry::default();
        registry.load_types(source)?;
        Ok(registry)
    }

    /// Parses a registry from a YAML string.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Self::from_reader(source.as_bytes())
    }

    /// The registry built from the bundled BibLaTeX schema.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(DEFAULT_TYPES)
    }

    /// Replaces the registry contents with the types parsed from `source`.
    ///
    /// On a parse error the previous contents are kept.
    pub fn load_types(&mut self, source: impl Read) -> Result<()> {
        let mut types: BTreeMap<String, EntryType> = serde_yaml::from_reader(source)?;
        for (name, entry_type) in types.iter_mut() {
            entry_type.name = name.clone();
        }
        debug!(count = types.len(), "Loaded entry types");
        self.types = types;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EntryType> {
        self.types.get(name)
    }

    /// Sorted type names.
    pub fn names(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    /// Iterates over the types in name order.
    pub fn iter(&self) -> impl Iterator<Item = &EntryType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an empty entry of the named type.
    ///
    /// Fails with [`Error::TypeNotFound`] listing the valid names.
    pub fn new_entry(&self, type_name: &str) -> Result<Entry> {
        match self.types.get(type_name) {
            Some(entry_type) => Ok(entry_type.instantiate()),
            None => Err(Error::type_not_found(
                "NewEntry",
                type_name,
                self.names(),
                None,
            )),
        }
    }

    /// Human-readable listing of all types, sorted by name.
    ///
    /// Level 0 prints names and descriptions, level 1 adds required fields,
    /// level 2 adds optional fields.
    pub fn types_info(&self, level: u8) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_types_info(&mut buf, level);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Writer-targeted variant of [`Registry::types_info`].
    pub fn write_types_info(&self, w: &mut impl Write, level: u8) -> io::Result<()> {
        for entry_type in self.types.values() {
            entry_type.write_info(w, level)?;
            writeln!(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{ErrorKind, is_error};

    pub(crate) const MOCK_TYPES: &str = r#"# Mock Entry Types

article:
  desc: An article in a journal, magazine, newspaper, or other periodical.
  req:
    author: Author(s) of the article.
    title: Title of the article.
    journaltitle: Title of the journal.
    date: YYYY-MM-DD format.
    obscure: Obscure field for testing purposes.
  opt:
    doi: DOI code of the article.

book:
  desc: A single-volume book with one or more authors.
  req:
    author: Author(s) of the book.
    title: Title of the book.
    date: YYYY-MM-DD format.
  opt:
    editor: Editor(s) of the book.
    isbn: ISBN number of the book.
    publisher: Publisher of the book.
    doi: DOI code of the book.

misc:
  desc: A fallback for entries which do not fit into any other category.
  req:
    author: Author(s) of the work.
    title: Title of the work.
    date: YYYY-MM-DD format.
  opt:
    url: URL of the work.
    urldate: Access date in YYYY-MM-DD format.
"#;

    pub(crate) fn mock_registry() -> Registry {
        Registry::from_yaml_str(MOCK_TYPES).unwrap()
    }

    #[test]
    fn test_load_types() {
        let registry = mock_registry();
        assert_eq!(registry.names(), vec!["article", "book", "misc"]);
        for name in ["article", "book", "misc"] {
            assert_eq!(registry.get(name).unwrap().name, name);
        }
    }

    #[test]
    fn test_load_types_replaces_previous() {
        let mut registry = mock_registry();
        registry
            .load_types("thesis:\n  desc: A thesis.\n  req:\n    author: A\n".as_bytes())
            .unwrap();
        assert_eq!(registry.names(), vec!["thesis"]);
        assert!(registry.get("article").is_none());
    }

    #[test]
    fn test_load_types_malformed_keeps_previous() {
        let mut registry = mock_registry();
        let result = registry.load_types("article: [not, a, mapping".as_bytes());
        assert!(matches!(result, Err(Error::Yaml(_))));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_new_entry() {
        let registry = mock_registry();
        let entry = registry.new_entry("book").unwrap();
        assert_eq!(entry.entry_type, "book");
        assert_eq!(entry.required.len(), 3);
        assert!(entry.required.values().all(String::is_empty));
        assert_eq!(entry.optional.len(), 4);
        assert!(entry.key.is_empty());
    }

    #[test]
    fn test_new_entry_type_not_found() {
        let registry = mock_registry();
        let err = registry.new_entry("test").unwrap_err();
        assert!(is_error(ErrorKind::TypeNotFound, &err));
        match err {
            Error::TypeNotFound {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested, "test");
                assert_eq!(available, vec!["article", "book", "misc"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_types_info_levels() {
        let registry = mock_registry();

        let level0 = registry.types_info(0);
        assert!(level0.starts_with("article: An article"));
        assert!(!level0.contains("->"));

        let level1 = registry.types_info(1);
        assert!(level1.contains("  author -> Author(s) of the article.\n"));
        assert!(!level1.contains("(doi)"));

        let level2 = registry.types_info(2);
        assert!(level2.contains("     (doi) -> DOI code of the article.\n"));

        // Sorted by name, each block separated by a blank line.
        let book = level0.find("book:").unwrap();
        let misc = level0.find("misc:").unwrap();
        assert!(book < misc);
        assert!(level0.contains("\n\nbook:"));
    }

    #[test]
    fn test_write_types_info_matches_string() {
        let registry = mock_registry();
        let mut buf = Vec::new();
        registry.write_types_info(&mut buf, 2).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), registry.types_info(2));
    }

    #[test]
    fn test_entry_type_display() {
        let registry = mock_registry();
        assert_eq!(
            registry.get("misc").unwrap().to_string(),
            "\"misc\" (req: 3, opt: 2)"
        );
    }

    #[test]
    fn test_bundled_types_parse() {
        let registry = Registry::bundled().unwrap();
        for name in ["article", "book", "inproceedings", "misc", "online", "report"] {
            assert!(registry.get(name).is_some(), "missing bundled type {name}");
        }
        let article = registry.get("article").unwrap();
        for field in ["author", "title", "journaltitle", "date"] {
            assert!(article.required.contains_key(field));
        }
    }
}
