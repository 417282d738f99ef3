use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{Error, KvStore, Result};

/// The JSON file key-value store.
///
/// All entries are kept in memory and the whole file is written back
/// after each modification. The new content goes to a temporary file
/// of the same directory first, which then replaces the store file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store located at the given path. A missing file is
    /// an empty store, it is created on the first modification.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();

        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|err| Error::ParseFileError(err, path.clone()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("storage file {} not found, starting empty", path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(Error::ReadFileError(err, path)),
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.entries).map_err(Error::SerializeEntriesError)?;
        let write_err = |err| Error::WriteFileError(err, self.path.clone());

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.persist(&self.path).map_err(|err| write_err(err.error))?;

        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::JsonFileStore;
    use crate::storage::{Error, KvStore};

    #[test]
    fn persists_across_opens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("current_mailbox").unwrap(), None);
        store.set("current_mailbox", "lay-k").unwrap();
        store.set("read_lay-k", r#"["1"]"#).unwrap();
        store.delete("read_lay-k").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.get("current_mailbox").unwrap().as_deref(),
            Some("lay-k")
        );
        assert_eq!(store.get("read_lay-k").unwrap(), None);
    }

    #[test]
    fn replaces_file_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"read_lay-k":"[]"}"#).unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("starred_lay-k", r#"["2"]"#).unwrap();
        store.delete("read_lay-k").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["store.json"]);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("read_lay-k").unwrap(), None);
        assert_eq!(
            store.get("starred_lay-k").unwrap().as_deref(),
            Some(r#"["2"]"#)
        );
    }

    #[test]
    fn missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        let err = store.set("current_mailbox", "lay-k").unwrap_err();
        assert!(matches!(err, Error::WriteFileError(..)));
    }

    #[test]
    fn malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::ParseFileError(..)));
    }
}
