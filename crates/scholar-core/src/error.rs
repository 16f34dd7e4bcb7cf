/*
 * error.rs
 * Copyright (c) 2025 Scholar Developers
 *
 * Error types for scholar-core.
 */

//! Error types for scholar-core.
//!
//! Two kinds form the taxonomy that callers branch on:
//!
//! - [`Error::TypeNotFound`]: an unknown entry type was requested. Fatal for
//!   the operation that asked for it.
//! - [`Error::FieldNotFound`]: a required field of the target type could not
//!   be located while converting an entry. Advisory; the conversion still
//!   produced a usable entry.
//!
//! Both carry an optional `previous` error so several conditions can be
//! chained into one value. [`is_error`] classifies a chain at any depth.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for scholar-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of taxonomy errors, used with [`is_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeNotFound,
    FieldNotFound,
}

#[derive(Error, Debug)]
pub enum Error {
    /// An entry type that is not in the registry was requested.
    #[error("{op}: type not found: {requested:?} is not a valid entry type, available types: {available:?}")]
    TypeNotFound {
        op: &'static str,
        requested: String,
        available: Vec<String>,
        #[source]
        previous: Option<Box<Error>>,
    },

    /// A required field of the target type is missing from the source entry.
    #[error(
        "{op}: field not found: required field {target_type}[{field}] was not found in entry of type {source_type:?}, replacing with an empty string"
    )]
    FieldNotFound {
        op: &'static str,
        field: String,
        source_type: String,
        target_type: String,
        #[source]
        previous: Option<Box<Error>>,
    },

    /// A metadata date segment is not numeric.
    #[error("invalid date {date:?}: segment {segment:?} is not a number")]
    InvalidDate { date: String, segment: String },

    /// Key repair could not move an entry directory into place.
    #[error("could not rename {} to {}: {source}", .from.display(), .to.display())]
    KeyConflict {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A BibTeX or BibLaTeX source could not be parsed.
    #[error("could not parse bibliography: {0}")]
    Bibliography(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Returns the taxonomy kind of this error, if it has one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::TypeNotFound { .. } => Some(ErrorKind::TypeNotFound),
            Error::FieldNotFound { .. } => Some(ErrorKind::FieldNotFound),
            _ => None,
        }
    }

    pub(crate) fn type_not_found(
        op: &'static str,
        requested: impl Into<String>,
        available: Vec<String>,
        previous: Option<Error>,
    ) -> Self {
        Error::TypeNotFound {
            op,
            requested: requested.into(),
            available,
            previous: previous.map(Box::new),
        }
    }

    pub(crate) fn field_not_found(
        op: &'static str,
        field: impl Into<String>,
        source_type: impl Into<String>,
        target_type: impl Into<String>,
        previous: Option<Error>,
    ) -> Self {
        Error::FieldNotFound {
            op,
            field: field.into(),
            source_type: source_type.into(),
            target_type: target_type.into(),
            previous: previous.map(Box::new),
        }
    }

    /// Iterates over this error and every chained scholar-core error behind it.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::TypeNotFound { previous, .. } | Error::FieldNotFound { previous, .. } => {
                previous.as_deref()
            }
            _ => None,
        })
    }
}

/// Reports whether `err`, or any error in its source chain, is of `kind`.
///
/// The chain is followed through [`std::error::Error::source`], so errors
/// wrapped by other libraries are classified as well.
pub fn is_error(kind: ErrorKind, err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        // Chained errors are boxed, so both shapes show up in the chain.
        let ours = e
            .downcast_ref::<Error>()
            .or_else(|| e.downcast_ref::<Box<Error>>().map(|b| b.as_ref()));
        if ours.and_then(Error::kind) == Some(kind) {
            return true;
        }
        current = e.source();
    }
    false
}

/// Date validation failure from [`crate::Entry::check`].
///
/// Advisory only and deliberately outside the [`ErrorKind`] taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date format (date {date}). Please use YYYY[-MM[-DD]]")]
pub struct DateFormatError {
    pub date: String,
}
