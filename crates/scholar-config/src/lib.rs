//! Configuration for Scholar.
//!
//! Two files drive the application: `config.yaml` (libraries, editor,
//! prompts) and `types.yaml` (the entry type schema). Both are discovered
//! through [`SearchPaths`] and created from templates on first run.

mod config;
mod error;
mod locate;

use std::fs::File;
use std::path::{Path, PathBuf};

use scholar_core::{DEFAULT_TYPES, Registry};
use tracing::debug;

pub use config::{CONFIG_TEMPLATE, Config, General};
pub use error::{ConfigError, Result};
pub use locate::{CONFIG_FILE, Located, SearchPaths, TYPES_FILE};

/// Everything loaded at start-up.
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    pub config_path: PathBuf,
    pub types_path: PathBuf,
    pub registry: Registry,
}

/// Reads an entry type schema from a file.
pub fn load_registry(path: &Path) -> Result<Registry> {
    let registry = Registry::from_reader(File::open(path)?)?;
    debug!(path = %path.display(), types = registry.len(), "Loaded entry types");
    Ok(registry)
}

/// Locates and loads both configuration files.
pub fn load_settings(
    paths: &SearchPaths,
    config: Option<&Path>,
    types: Option<&Path>,
) -> Result<Settings> {
    let config_file = paths.resolve(config, CONFIG_FILE, CONFIG_TEMPLATE)?;
    let types_file = paths.resolve(types, TYPES_FILE, DEFAULT_TYPES)?;

    Ok(Settings {
        config: Config::load(&config_file.path)?,
        registry: load_registry(&types_file.path)?,
        config_path: config_file.path,
        types_path: types_file.path,
    })
}
