// Storage port: one named slot of durable text.
//
// The whole history persists as a single JSON document, so the port is
// as small as it gets: get/set/remove on one string slot. The file
// backend is what production uses; the in-memory backend keeps store
// tests off the disk.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not read history storage: {0}")]
    Read(#[source] io::Error),
    #[error("could not write history storage: {0}")]
    Write(#[source] io::Error),
    #[error("could not encode history for storage: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One durable string slot. A missing slot is `Ok(None)`, not an error.
pub trait StorageSlot {
    fn get(&self) -> Result<Option<String>, StorageError>;
    fn set(&self, value: &str) -> Result<(), StorageError>;
    fn remove(&self) -> Result<(), StorageError>;
}

/// File-backed slot. Parent directories are created on first write.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageSlot for FileSlot {
    fn get(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(e)),
        }
    }

    fn set(&self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::Write)?;
            }
        }
        std::fs::write(&self.path, value).map_err(StorageError::Write)
    }

    fn remove(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write(e)),
        }
    }
}

/// In-memory slot for tests. Clones share one cell, so a test can keep a
/// handle for inspection while the store owns another.
#[derive(Clone, Default)]
pub struct MemorySlot {
    cell: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self) -> MutexGuard<'_, Option<String>> {
        match self.cell.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn get(&self) -> Result<Option<String>, StorageError> {
        Ok(self.cell().clone())
    }

    fn set(&self, value: &str) -> Result<(), StorageError> {
        *self.cell() = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        *self.cell() = None;
        Ok(())
    }
}
