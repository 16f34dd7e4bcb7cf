//! Where configuration files are looked for.
//!
//! A file named on the command line wins. Otherwise the current directory is
//! searched, then `~/.config/scholar/`. When neither has the file, its
//! template is written to the home location and used from there.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.yaml";

/// Name of the entry types file.
pub const TYPES_FILE: &str = "types.yaml";

/// A file found (or created) by [`SearchPaths::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub path: PathBuf,
    /// The template was written because no file existed.
    pub created: bool,
}

/// Directories searched for configuration files, in order.
#[derive(Debug, Clone)]
pub struct SearchPaths {
    pub cwd: PathBuf,
    pub config_home: PathBuf,
}

impl SearchPaths {
    pub fn new(cwd: impl Into<PathBuf>, config_home: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            config_home: config_home.into(),
        }
    }

    /// The process working directory and `~/.config/scholar`.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd, home.join(".config").join("scholar")))
    }

    /// Finds `file_name`, writing `template` to the home location if it does
    /// not exist anywhere.
    ///
    /// An explicit path must exist.
    pub fn resolve(&self, explicit: Option<&Path>, file_name: &str, template: &str) -> Result<Located> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(Located {
                    path: path.to_path_buf(),
                    created: false,
                });
            }
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        for dir in [&self.cwd, &self.config_home] {
            let path = dir.join(file_name);
            if path.is_file() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Located {
                    path,
                    created: false,
                });
            }
        }

        fs::create_dir_all(&self.config_home)?;
        let path = self.config_home.join(file_name);
        fs::write(&path, template)?;
        info!(path = %path.display(), "Wrote new {}", file_name);
        Ok(Located {
            path,
            created: true,
        })
    }
}
