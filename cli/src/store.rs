use chess_solitaire_core::{StatsBook, StatsStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps the stats book as a single JSON document on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonFileStore {
    fn load(&self) -> Result<Option<StatsBook>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Unavailable(err.to_string())),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    fn save(&mut self, book: &StatsBook) -> Result<(), StoreError> {
        let text =
            serde_json::to_string_pretty(book).map_err(|err| StoreError::Write(err.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StoreError::Write(err.to_string()))?;
        }
        fs::write(&self.path, text).map_err(|err| StoreError::Write(err.to_string()))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Write(err.to_string())),
        }
    }
}
