//! File-backed key-value store.
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes go to a temporary sibling
//! file first and are renamed into place, so a crash mid-write leaves either
//! the old value or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StoreError, validate_key};

/// A store that keeps one file per key in a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        // Unique per write: other processes may share the data directory.
        let tmp = self
            .dir
            .join(format!(".{key}.json.{}.tmp", uuid::Uuid::new_v4().simple()));
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        std::fs::write(&tmp, value).map_err(io_err)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(e));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("sts-file-store-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).unwrap();
        store.set("language", "ar").unwrap();

        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(reopened.get("language").unwrap().as_deref(), Some("ar"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_concurrent_writers_to_one_key() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).unwrap();

        std::thread::scope(|scope| {
            for writer in 0..8 {
                let store = store.clone();
                scope.spawn(move || {
                    for round in 0..25 {
                        store.set("cart", &format!("{writer}-{round}")).unwrap();
                    }
                });
            }
        });

        assert!(store.get("cart").unwrap().unwrap().ends_with("-24"));
        let leftovers = std::fs::read_dir(&dir)
            .unwrap()
            .filter(|entry| {
                entry
                    .as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".tmp")
            })
            .count();
        assert_eq!(leftovers, 0);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_key_and_remove() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get("orderSent").unwrap(), None);
        store.remove("orderSent").unwrap();

        store.set("orderSent", "true").unwrap();
        store.remove("orderSent").unwrap();
        assert_eq!(store.get("orderSent").unwrap(), None);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).unwrap();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
