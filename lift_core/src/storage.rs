//! String-keyed value storage with file locking.
//!
//! Collections are stored whole under a key: every write replaces the full
//! value. `FileStore` keeps one JSON file per key and serializes concurrent
//! writers with an exclusive lock plus an atomic rename.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key holding the JSON array of training records
pub const TRAINING_RECORDS_KEY: &str = "trainingRecords";

/// Key holding the JSON array of saved exercises
pub const SAVED_EXERCISES_KEY: &str = "savedExercises";

/// Whole-value key-value storage
pub trait KeyValueStore {
    /// Read the value stored under `key`. Absent keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: `<dir>/<key>.json`
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            tracing::debug!("No value stored under {:?} at {:?}", key, path);
            return Ok(None);
        }

        let file = File::open(&path)?;
        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        // Unique temp file in the same directory so the rename stays atomic
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

/// In-memory store, used by tests and embedders without a data directory
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store that serves reads from memory and refuses every write
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct ReadOnlyStore(pub MemoryStore);

#[cfg(test)]
impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only store",
        )))
    }
}

/// Load a JSON collection stored under `key`.
///
/// Missing keys, unreadable files and malformed JSON all yield an empty
/// collection; the latter two are logged as warnings.
pub fn load_collection<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let contents = match store.get(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read {:?}: {}. Using empty collection.", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&contents) {
        Ok(items) => {
            tracing::info!("Loaded {} entries from {:?}", items.len(), key);
            items
        }
        Err(e) => {
            tracing::warn!("Failed to parse {:?}: {}. Using empty collection.", key, e);
            Vec::new()
        }
    }
}

/// Serialize and store a full collection under `key`
pub fn save_collection<T, S>(store: &mut S, key: &str, items: &[T]) -> Result<()>
where
    T: serde::Serialize,
    S: KeyValueStore + ?Sized,
{
    let contents = serde_json::to_string(items)?;
    store.set(key, &contents)?;
    tracing::debug!("Saved {} entries under {:?}", items.len(), key);
    Ok(())
}
