//! `scholar list`: one line per entry.

use std::io::Write;

use anyhow::Result;

use scholar_core::{SortBy, format_line, sort_entries};

use crate::app::App;

pub const DEFAULT_WIDTH: usize = 120;

#[derive(Debug)]
pub struct ListArgs {
    pub query: Vec<String>,
    pub sort: SortBy,
    pub width: usize,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            query: Vec::new(),
            sort: SortBy::default(),
            width: DEFAULT_WIDTH,
        }
    }
}

pub async fn execute(app: &App, args: ListArgs, out: &mut impl Write) -> Result<usize> {
    let library = app.library()?;
    let mut entries = app.query(&library, &args.query).await?;
    sort_entries(&mut entries, &args.sort);

    for entry in &entries {
        write!(out, "{}", format_line(entry, args.width))?;
    }
    Ok(entries.len())
}
