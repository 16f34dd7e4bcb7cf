/*
 * library/key.rs
 * Copyright (c) 2025 Scholar Developers
 */

//! Unique key assignment.

use super::Library;

/// Suffix for the `n`th disambiguation attempt, starting at 1.
///
/// Bijective base 26: `a`..`z`, then `aa`, `ab`, ... so the sequence never
/// runs out.
pub fn key_suffix(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

impl Library {
    /// First key from `candidate`, `candidate` + `a`, `candidate` + `b`, ...
    /// that does not name an existing directory entry in the library.
    pub fn unique_key(&self, candidate: &str) -> String {
        if !self.root.join(candidate).exists() {
            return candidate.to_string();
        }
        (1..)
            .map(|n| format!("{}{}", candidate, key_suffix(n)))
            .find(|key| !self.root.join(key).exists())
            .unwrap_or_else(|| candidate.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_key_suffix_sequence() {
        assert_eq!(key_suffix(1), "a");
        assert_eq!(key_suffix(2), "b");
        assert_eq!(key_suffix(26), "z");
        assert_eq!(key_suffix(27), "aa");
        assert_eq!(key_suffix(28), "ab");
        assert_eq!(key_suffix(52), "az");
        assert_eq!(key_suffix(53), "ba");
        assert_eq!(key_suffix(702), "zz");
        assert_eq!(key_suffix(703), "aaa");
    }

    #[test]
    fn test_unique_key_probes_suffixes() {
        let temp = TempDir::new().unwrap();
        let library = Library::new(temp.path());

        assert_eq!(library.unique_key("einstein1922"), "einstein1922");
        fs::create_dir(temp.path().join("einstein1922")).unwrap();
        assert_eq!(library.unique_key("einstein1922"), "einstein1922a");
        fs::create_dir(temp.path().join("einstein1922a")).unwrap();
        assert_eq!(library.unique_key("einstein1922"), "einstein1922b");
    }

    #[test]
    fn test_unique_key_past_z() {
        let temp = TempDir::new().unwrap();
        let library = Library::new(temp.path());

        fs::create_dir(temp.path().join("k")).unwrap();
        for n in 1..=26 {
            fs::create_dir(temp.path().join(format!("k{}", key_suffix(n)))).unwrap();
        }
        assert_eq!(library.unique_key("k"), "kaa");
    }

    #[test]
    fn test_unique_key_counts_plain_files() {
        let temp = TempDir::new().unwrap();
        let library = Library::new(temp.path());
        fs::write(temp.path().join("bohr1913"), b"").unwrap();
        assert_eq!(library.unique_key("bohr1913"), "bohr1913a");
    }
}
