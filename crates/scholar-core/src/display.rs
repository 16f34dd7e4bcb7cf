/*
 * display.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Terminal rendering of entries.
//!
//! Colours come from `colored`, which already honours `NO_COLOR` and
//! non-terminal output; `colored::control::set_override(false)` forces plain
//! text.

use std::io::{self, Write};

use colored::Colorize;

use crate::entry::Entry;

/// Pads or cuts `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let cut: String = text.chars().take(width).collect();
    format!("{:<width$}", cut, width = width)
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One listing line: title, year and authors sized to a terminal `width`.
pub fn format_line(entry: &Entry, width: usize) -> String {
    let title_width = (width / 3 * 2).saturating_sub(4);
    let author_width = width / 3;
    let value = |field: &str| entry.required.get(field).map_or("", String::as_str);

    format!(
        "{}  {}  {}\n",
        fit(value("title"), title_width).green().bold(),
        format!("({})", fit(entry.year(), 4)).yellow().bold(),
        fit(value("author"), author_width).red().bold(),
    )
}

/// Writes the detail block of an entry.
///
/// Title, authors (one per line), date and attachment come first, then the
/// remaining required fields and the optional ones, each sorted by name with
/// empty values left out. The abstract always goes last.
pub fn write_details(w: &mut impl Write, entry: &Entry) -> io::Result<()> {
    writeln!(
        w,
        "{} {}",
        format!("[{}]", entry.entry_type.to_uppercase()).bold(),
        entry.derived_key().bold()
    )?;

    let value = |field: &str| entry.required.get(field).map_or("", String::as_str);
    writeln!(w, "Title:\n  {}", value("title").green().bold())?;
    writeln!(w, "Author(s):")?;
    for author in value("author").split(" and ").filter(|a| !a.is_empty()) {
        writeln!(w, "  {}", author.red().bold())?;
    }
    writeln!(w, "Date:\n  {}", value("date").yellow().bold())?;
    if !entry.file.is_empty() {
        writeln!(w, "File:\n  {}", entry.file.red().underline())?;
    }

    let skip = ["title", "author", "date"];
    let required = entry
        .required
        .iter()
        .filter(|(field, _)| !skip.contains(&field.as_str()));
    let optional = entry
        .optional
        .iter()
        .filter(|(field, _)| field.as_str() != "abstract");
    for (field, value) in required.chain(optional) {
        if !value.is_empty() {
            writeln!(w, "{}:\n  {}", capitalize(field), value.yellow().bold())?;
        }
    }

    if let Some(text) = entry.field("abstract") {
        writeln!(w, "Abstract:\n  {}", text.yellow().bold())?;
    }
    Ok(())
}
