//! Shared utilities for the Scholar crates.

pub mod filename;
pub mod path;
pub mod version;

pub use filename::clean_filename;
pub use path::expand_home;
pub use version::cli_version;
