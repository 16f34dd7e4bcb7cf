//! Version string reported by `scholar --version`.

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Workspace version, suffixed with `-dev` while it is still 0.x.y.
pub fn cli_version() -> &'static str {
    if PKG_VERSION.starts_with("0.") {
        concat!(env!("CARGO_PKG_VERSION"), "-dev")
    } else {
        PKG_VERSION
    }
}
