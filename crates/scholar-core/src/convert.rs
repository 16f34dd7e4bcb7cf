/*
 * convert.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Lossless conversion of an entry from one type to another.

use std::collections::BTreeSet;

use tracing::debug;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::schema::Registry;

/// Outcome of a conversion that found its target type.
#[derive(Debug)]
pub struct Conversion {
    /// The converted entry. Always complete and usable.
    pub entry: Entry,

    /// Chain of [`Error::FieldNotFound`] for every required field of the
    /// target type that the source entry did not have. Safe to ignore.
    pub missing: Option<Error>,
}

impl Conversion {
    /// Names of the required fields that were filled with empty strings.
    pub fn missing_fields(&self) -> Vec<&str> {
        self.missing
            .iter()
            .flat_map(|err| err.chain())
            .filter_map(|err| match err {
                Error::FieldNotFound { field, .. } => Some(field.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Registry {
    /// Converts `entry` into an entry of type `target`.
    ///
    /// Required fields of the target are looked up in the source's required
    /// then optional fields. Missing ones are set to an empty string and
    /// reported through [`Conversion::missing`]. Every other non-empty source
    /// field is carried into the target's optional fields, so converting back
    /// restores the original values.
    ///
    /// Fails with [`Error::TypeNotFound`] if `target` is not registered.
    pub fn convert(&self, entry: &Entry, target: &str) -> Result<Conversion> {
        let mut to = self.new_entry(target).map_err(|err| match err {
            Error::TypeNotFound {
                requested,
                available,
                ..
            } => Error::type_not_found(
                "Convert",
                requested.clone(),
                available.clone(),
                Some(Error::type_not_found("NewEntry", requested, available, None)),
            ),
            other => other,
        })?;
        to.key = entry.key.clone();
        to.attach(entry.file.clone());

        let mut seen = BTreeSet::new();
        let mut missing: Option<Error> = None;

        for (field, slot) in to.required.iter_mut() {
            match entry
                .required
                .get(field)
                .or_else(|| entry.optional.get(field))
            {
                Some(value) => *slot = value.clone(),
                None => {
                    missing = Some(Error::field_not_found(
                        "Convert",
                        field.clone(),
                        entry.entry_type.clone(),
                        target,
                        missing,
                    ));
                    slot.clear();
                }
            }
            seen.insert(field.clone());
        }

        for (field, value) in entry.required.iter().chain(entry.optional.iter()) {
            if !seen.insert(field.clone()) {
                continue;
            }
            if !value.is_empty() {
                to.optional.insert(field.clone(), value.clone());
            }
        }

        debug!(
            key = %entry.key,
            from = %entry.entry_type,
            to = %target,
            missing = missing.is_some(),
            "Converted entry"
        );

        Ok(Conversion { entry: to, missing })
    }
}
