//! File-backed storage: one `<key>.json` file per key.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::traits::{KeyValueStore, validate_key};
use crate::error::{NumlogError, Result};

#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a key.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        match fs::read_to_string(self.key_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, text: &str) -> Result<()> {
        validate_key(key)?;
        let persistence = |e: std::io::Error| NumlogError::Persistence(format!("{}: {}", key, e));

        // Write-then-rename so readers never see a partial file
        let temp = self.temp_path(key);
        let mut file = File::create(&temp).map_err(persistence)?;
        file.write_all(text.as_bytes()).map_err(persistence)?;
        file.sync_all().map_err(persistence)?;
        drop(file);

        fs::rename(&temp, self.key_path(key)).map_err(persistence)?;
        log::debug!("Wrote {} bytes to {}", text.len(), self.key_path(key).display());
        Ok(())
    }
}
