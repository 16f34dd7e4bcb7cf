//! Error types for scholar-config

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No library called {name:?} was found, available libraries: {available:?}")]
    UnknownLibrary { name: String, available: Vec<String> },

    #[error("No default library is configured")]
    NoDefaultLibrary,

    #[error("File not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Could not determine the home directory")]
    NoHome,

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to load entry types: {0}")]
    Types(#[from] scholar_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
