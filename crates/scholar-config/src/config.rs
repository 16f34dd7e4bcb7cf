//! The `config.yaml` model.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Template written when no configuration file exists.
pub const CONFIG_TEMPLATE: &str = include_str!("../resources/config.yaml");

fn default_interactive() -> bool {
    true
}

/// The `general` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct General {
    /// Library used when none is named.
    #[serde(default)]
    pub default: String,

    #[serde(default)]
    pub editor: String,

    #[serde(default = "default_interactive")]
    pub interactive: bool,

    #[serde(default)]
    pub mailto: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            default: String::new(),
            editor: String::new(),
            interactive: true,
            mailto: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: General,

    /// Library name -> directory. `~` is expanded on load.
    #[serde(default)]
    pub libraries: BTreeMap<String, PathBuf>,

    /// File the configuration was read from.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Parses a configuration and expands `~` in library paths.
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let mut config: Config = serde_yaml::from_str(yaml)?;
        for path in config.libraries.values_mut() {
            *path = scholar_util::expand_home(&*path);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&yaml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            libraries = config.libraries.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Sorted library names.
    pub fn library_names(&self) -> Vec<String> {
        self.libraries.keys().cloned().collect()
    }

    /// Directory of the named library, or of the default one.
    pub fn library_path(&self, name: Option<&str>) -> Result<&Path> {
        let name = match name {
            Some(name) => name,
            None if self.general.default.is_empty() => return Err(ConfigError::NoDefaultLibrary),
            None => self.general.default.as_str(),
        };
        self.libraries
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| ConfigError::UnknownLibrary {
                name: name.to_string(),
                available: self.library_names(),
            })
    }

    /// Editor command: the configured one, then `$EDITOR`, then `vi`.
    pub fn editor(&self) -> String {
        if !self.general.editor.is_empty() {
            return self.general.editor.clone();
        }
        std::env::var("EDITOR")
            .ok()
            .filter(|editor| !editor.is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }
}
