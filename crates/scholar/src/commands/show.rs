//! `scholar show`: details of one entry.

use std::io::Write;

use anyhow::Result;

use scholar_core::write_details;

use crate::app::App;

pub async fn execute(app: &App, query: &[String], out: &mut impl Write) -> Result<()> {
    let library = app.library()?;
    let entry = app.find_one(&library, query).await?;
    write_details(out, &entry)?;
    Ok(())
}
