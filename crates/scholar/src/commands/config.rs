//! `scholar config`: show or edit the configuration.

use std::io::Write;

use anyhow::Result;

use crate::app::App;

#[derive(Debug, Default)]
pub struct ConfigArgs {
    /// Print the files in use instead of opening the editor.
    pub which: bool,
}

pub fn execute(app: &App, args: ConfigArgs, out: &mut impl Write) -> Result<()> {
    if args.which {
        writeln!(out, "Configuration file used: {}", app.settings.config_path.display())?;
        writeln!(out, "Types file used: {}", app.settings.types_path.display())?;
        return Ok(());
    }
    app.launch_editor(&app.settings.config_path)
}
