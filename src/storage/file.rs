//! File-backed key-value store
//!
//! Each key lives in `{dir}/{key}.json`. Uses file locking for concurrent
//! access safety and temp file + rename for atomic writes.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

use fs2::FileExt;

use super::kv::{validate_key, KeyValueStore, StoreError};

/// Store keeping one file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;

        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(key, e)),
        };

        // Shared lock for reading, released when the file is dropped
        FileExt::lock_shared(&file).map_err(|e| StoreError::io(key, e))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| StoreError::io(key, e))?;

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|source| StoreError::InvalidUtf8 {
                key: key.to_string(),
                source,
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(key, e))?;

        let temp_path = path.with_extension("json.tmp");

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StoreError::io(key, e))?;

            FileExt::lock_exclusive(&file).map_err(|e| StoreError::io(key, e))?;

            file.write_all(value.as_bytes())
                .and_then(|_| file.flush())
                .and_then(|_| file.sync_all())
                .map_err(|e| StoreError::io(key, e))?;
        }

        fs::rename(&temp_path, &path).map_err(|e| StoreError::io(key, e))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}
