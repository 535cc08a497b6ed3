//! Best-effort creation of directory-valued entries.

use super::keys::is_directory_key;
use super::value::ConfigValue;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Create every directory named by a `*DIRECTORY` entry and return the ones
/// that exist afterwards.
///
/// Attempt and ignore: a directory that cannot be created (permissions, bad
/// path, non-string value) is logged at debug level and skipped. Nothing here
/// may fail the merge that called it.
pub fn provision_directories(entries: &BTreeMap<String, ConfigValue>) -> Vec<PathBuf> {
    let mut existing = Vec::new();

    for (key, value) in entries.iter().filter(|(key, _)| is_directory_key(key)) {
        let Some(raw) = value.as_str().filter(|s| !s.trim().is_empty()) else {
            tracing::debug!("Skipping {}: not a path ({})", key, value);
            continue;
        };
        let path = PathBuf::from(raw);

        if path.is_dir() {
            existing.push(path);
            continue;
        }

        match fs::create_dir_all(&path) {
            Ok(()) => {
                tracing::debug!("Created {} at {}", key, path.display());
                existing.push(path);
            }
            Err(e) => {
                tracing::debug!("Could not create {} at {}: {}", key, path.display(), e);
            }
        }
    }

    existing
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn creates_nested_directories() {
        let tmp = TempDir::new().expect("tmp");
        let target = tmp.path().join("a").join("b").join("data");
        let mut entries = BTreeMap::new();
        entries.insert("DATA_DIRECTORY".to_string(), ConfigValue::from(target.to_string_lossy().to_string()));

        let existing = provision_directories(&entries);
        assert!(target.is_dir());
        assert_eq!(existing, vec![target]);
    }

    #[test]
    fn ignores_keys_without_the_suffix() {
        let tmp = TempDir::new().expect("tmp");
        let target = tmp.path().join("not-created");
        let mut entries = BTreeMap::new();
        entries.insert("DATA_DIR".to_string(), ConfigValue::from(target.to_string_lossy().to_string()));

        assert!(provision_directories(&entries).is_empty());
        assert!(!target.exists());
    }

    #[test]
    fn swallows_failures() {
        let tmp = TempDir::new().expect("tmp");
        // A regular file blocks creating a directory beneath it.
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "x").expect("write");
        let target = blocker.join("data");

        let mut entries = BTreeMap::new();
        entries.insert("DATA_DIRECTORY".to_string(), ConfigValue::from(target.to_string_lossy().to_string()));
        entries.insert("EMPTY_DIRECTORY".to_string(), ConfigValue::from(""));
        entries.insert("NULL_DIRECTORY".to_string(), ConfigValue::Null);
        entries.insert("PORT_DIRECTORY".to_string(), ConfigValue::Integer(8));

        assert!(provision_directories(&entries).is_empty());
        assert!(!target.exists());
    }
}
