/*
 * lib.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Core of the scholar reference manager.
//!
//! - [`schema`]: entry types and the [`Registry`] that owns them
//! - [`entry`]: the [`Entry`] record, key derivation and date checks
//! - [`convert`]: lossless conversion between entry types
//! - [`export`]: BibLaTeX, BibTeX and RIS rendering
//! - [`import`]: reading BibTeX and BibLaTeX sources back into entries
//! - [`library`]: the on-disk store, key repair and the concurrent scan
//! - [`search`]: term search and sort orders
//! - [`work`]: mapping of normalized publication metadata
//! - [`display`]: terminal rendering

pub mod convert;
pub mod display;
pub mod entry;
pub mod error;
pub mod export;
pub mod import;
pub mod library;
pub mod schema;
pub mod search;
pub mod work;

pub use convert::Conversion;
pub use display::{format_line, write_details};
pub use entry::Entry;
pub use error::{DateFormatError, Error, ErrorKind, Result, is_error};
pub use export::{Exporter, Format, export};
pub use library::{Library, RECORD_FILE, Reconcile, StoredEntry};
pub use schema::{DEFAULT_TYPES, EntryType, Registry};
pub use search::{SortBy, matches_file, matches_key, search, sort_entries, split_query};
pub use work::{Person, Work, normalize_date};
