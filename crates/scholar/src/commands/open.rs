//! `scholar open`: open an entry's attachment or its web page.

use anyhow::{Result, anyhow};

use scholar_core::{Entry, Library};

use crate::app::{App, open_with_system};

/// What opening an entry shows: the attachment, else the `url` field, else
/// the DOI resolver page.
pub fn open_target(library: &Library, entry: &Entry) -> Option<String> {
    if let Some(path) = library.file_path(entry) {
        return Some(path.display().to_string());
    }
    if let Some(url) = entry.field("url") {
        return Some(url.to_string());
    }
    entry.field("doi").map(|doi| format!("https://doi.org/{doi}"))
}

pub async fn execute(app: &App, query: &[String]) -> Result<()> {
    let library = app.library()?;
    let entry = app.find_one(&library, query).await?;
    let target = open_target(&library, &entry)
        .ok_or_else(|| anyhow!("no file, url or doi associated with {}", entry.key))?;
    open_with_system(&target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_target_preference() {
        let library = Library::new("/lib");
        let mut entry = Entry {
            key: "bohr1913".into(),
            ..Entry::default()
        };
        assert_eq!(open_target(&library, &entry), None);

        entry.optional.insert("doi".into(), "10.1/x".into());
        assert_eq!(
            open_target(&library, &entry).as_deref(),
            Some("https://doi.org/10.1/x")
        );

        entry.optional.insert("url".into(), "https://example.org".into());
        assert_eq!(
            open_target(&library, &entry).as_deref(),
            Some("https://example.org")
        );

        entry.attach("bohr1913_atoms.pdf");
        let expected = std::path::Path::new("/lib")
            .join("bohr1913")
            .join("bohr1913_atoms.pdf");
        assert_eq!(
            open_target(&library, &entry),
            Some(expected.display().to_string())
        );
    }
}
