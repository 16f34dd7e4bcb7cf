//! `scholar types`: describe the available entry types.

use std::io::Write;

use anyhow::Result;

use crate::app::App;

#[derive(Debug)]
pub struct TypesArgs {
    /// 0: names, 1: plus required fields, 2: plus optional fields
    pub level: u8,
}

pub fn execute(app: &App, args: TypesArgs, out: &mut impl Write) -> Result<()> {
    app.registry().write_types_info(out, args.level)?;
    Ok(())
}
