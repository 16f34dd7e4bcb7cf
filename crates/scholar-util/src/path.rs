//! Home directory expansion for user-supplied paths.

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` on its own and `~/...` are expanded; `~user` forms and paths
/// without a tilde are returned unchanged. When the home directory cannot be
/// determined the path is also returned unchanged.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
